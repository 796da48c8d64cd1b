use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One seismic event as published by the feed, keyed by the provider's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,

    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub depth: Option<f64>,

    pub magnitude: Option<f64>,
    pub magnitude_type: Option<String>,
    pub event_type: Option<String>,
    pub significance: Option<i32>,
    pub alert_level: Option<String>,
    pub status: String,
    pub tsunami: Option<bool>,
    pub felt: Option<i32>,
    pub cdi: Option<f64>,
    pub mmi: Option<f64>,

    pub station_count: Option<i32>,
    pub min_distance: Option<f64>,
    pub rms: Option<f64>,
    pub azimuthal_gap: Option<f64>,
    pub network: String,
    pub code: String,
    pub contributing_ids: String,
    pub contributing_sources: String,
    pub product_types: String,

    pub occurred_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(with = "minutes")]
    pub timezone_offset: Duration,

    pub place: String,
    pub title: String,
    pub url: String,
    pub detail_url: String,
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Quake {}>", self.id)
    }
}

/// Spatial envelope of a feed snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_longitude: f64,
    pub max_longitude: f64,
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_depth: f64,
    pub max_depth: f64,
}

mod minutes {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(d.num_minutes())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::minutes(i64::deserialize(d)?))
    }
}
