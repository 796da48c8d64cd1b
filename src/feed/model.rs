use crate::decode::coerce::text;
use crate::decode::timestamp::normalize_epoch_ms;
use crate::decode::{decode_bounding_box, BoundingBox};
use crate::error::{Result, UsgsDecodeError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedLevel {
    Significant,
    M4_5,
    M2_5,
    M1_0,
    All,
}

impl FeedLevel {
    pub const ALL: [FeedLevel; 5] = [
        FeedLevel::Significant,
        FeedLevel::M4_5,
        FeedLevel::M2_5,
        FeedLevel::M1_0,
        FeedLevel::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedLevel::Significant => "significant",
            FeedLevel::M4_5 => "4.5",
            FeedLevel::M2_5 => "2.5",
            FeedLevel::M1_0 => "1.0",
            FeedLevel::All => "all",
        }
    }
}

impl FromStr for FeedLevel {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|l| l.as_str() == s).ok_or(())
    }
}

impl fmt::Display for FeedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedPeriod {
    Hour,
    Day,
    Week,
    Month,
}

impl FeedPeriod {
    pub const ALL: [FeedPeriod; 4] = [
        FeedPeriod::Hour,
        FeedPeriod::Day,
        FeedPeriod::Week,
        FeedPeriod::Month,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedPeriod::Hour => "hour",
            FeedPeriod::Day => "day",
            FeedPeriod::Week => "week",
            FeedPeriod::Month => "month",
        }
    }
}

impl FromStr for FeedPeriod {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|p| p.as_str() == s).ok_or(())
    }
}

impl fmt::Display for FeedPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fetched feed snapshot.
///
/// The raw GeoJSON document is kept so `events()` can be walked as many times
/// as needed without going back to the network.
#[derive(Debug, Clone)]
pub struct Feed {
    pub level: FeedLevel,
    pub period: FeedPeriod,
    pub source_url: String,
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub api_version: String,
    /// Declared by the provider; may differ from what `events()` yields.
    pub event_count: u64,
    payload: Value,
}

impl Feed {
    /// Build a feed from a parsed GeoJSON document. `requested_url` stands in
    /// for `metadata.url` when the provider leaves it out.
    pub fn from_payload(
        level: FeedLevel,
        period: FeedPeriod,
        requested_url: &str,
        payload: Value,
    ) -> Result<Self> {
        let mut feed = Feed {
            level,
            period,
            source_url: requested_url.to_string(),
            title: String::new(),
            generated_at: DateTime::<Utc>::default(),
            api_version: String::new(),
            event_count: 0,
            payload: Value::Null,
        };
        feed.replace_payload(payload)?;
        let declared_url = text(feed.payload["metadata"].get("url"));
        if !declared_url.is_empty() {
            feed.source_url = declared_url;
        }
        Ok(feed)
    }

    /// Swap in a freshly fetched document, replacing the snapshot metadata.
    /// Level, period and source url stay as they were.
    pub fn replace_payload(&mut self, payload: Value) -> Result<()> {
        let metadata = payload
            .get("metadata")
            .filter(|m| m.is_object())
            .ok_or_else(|| UsgsDecodeError::MalformedFeed("missing metadata".to_string()))?;
        let features = payload
            .get("features")
            .and_then(|f| f.as_array())
            .ok_or_else(|| UsgsDecodeError::MalformedFeed("missing features array".to_string()))?;

        let generated_at = normalize_epoch_ms("generated", metadata.get("generated"))?;
        let event_count = metadata
            .get("count")
            .and_then(|c| c.as_u64())
            .unwrap_or(features.len() as u64);

        self.title = text(metadata.get("title"));
        self.api_version = text(metadata.get("api"));
        self.generated_at = generated_at;
        self.event_count = event_count;
        self.payload = payload;
        Ok(())
    }

    /// Raw features in source order.
    pub fn events(&self) -> std::slice::Iter<'_, Value> {
        self.payload
            .get("features")
            .and_then(|f| f.as_array())
            .map(|f| f.as_slice())
            .unwrap_or(&[])
            .iter()
    }

    pub fn bounding_box(&self) -> Result<BoundingBox> {
        decode_bounding_box(self.payload.get("bbox"))
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Feed {}_{} @ {}>", self.level, self.period, self.generated_at)
    }
}
