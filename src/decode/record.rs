use super::coerce::{optional_text, text, CoercionPolicy};
use super::model::Event;
use super::timestamp::{normalize_epoch_ms, timezone_offset};
use crate::error::UsgsDecodeError;
use serde_json::Value;

/// Decode one GeoJSON feature (`{id, geometry: {coordinates}, properties}`).
pub fn decode_event(raw: &Value, policy: CoercionPolicy) -> Result<Event, UsgsDecodeError> {
    let coordinates = raw
        .get("geometry")
        .and_then(|g| g.get("coordinates"))
        .ok_or(UsgsDecodeError::MissingGeometry)?;
    let coordinates = coordinates
        .as_array()
        .ok_or_else(|| UsgsDecodeError::MalformedCoordinates(coordinates.to_string()))?;
    if coordinates.len() < 3 {
        return Err(UsgsDecodeError::MalformedCoordinates(format!(
            "expected [lon, lat, depth], got {} values",
            coordinates.len()
        )));
    }

    let props = raw
        .get("properties")
        .filter(|p| p.is_object())
        .ok_or(UsgsDecodeError::MissingProperties)?;
    let prop = |key: &str| props.get(key);

    // Timestamps come first: a feed without them is broken as a whole.
    let occurred_at = normalize_epoch_ms("time", prop("time"))?;
    let updated_at = normalize_epoch_ms("updated", prop("updated"))?;

    let id = raw
        .get("id")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or(UsgsDecodeError::MissingId)?
        .to_string();

    Ok(Event {
        longitude: policy.float("longitude", coordinates.first())?,
        latitude: policy.float("latitude", coordinates.get(1))?,
        depth: policy.float("depth", coordinates.get(2))?,

        magnitude: policy.float("mag", prop("mag"))?,
        magnitude_type: optional_text(prop("magType")),
        event_type: optional_text(prop("type")),
        significance: policy.int("sig", prop("sig"))?,
        alert_level: optional_text(prop("alert")),
        status: text(prop("status")),
        tsunami: policy.bool("tsunami", prop("tsunami"))?,
        felt: policy.int("felt", prop("felt"))?,
        cdi: policy.float("cdi", prop("cdi"))?,
        mmi: policy.float("mmi", prop("mmi"))?,

        station_count: policy.int("nst", prop("nst"))?,
        min_distance: policy.float("dmin", prop("dmin"))?,
        rms: policy.float("rms", prop("rms"))?,
        azimuthal_gap: policy.float("gap", prop("gap"))?,
        network: text(prop("net")),
        code: text(prop("code")),
        contributing_ids: text(prop("ids")),
        contributing_sources: text(prop("sources")),
        product_types: text(prop("types")),

        occurred_at,
        updated_at,
        timezone_offset: timezone_offset(policy, prop("tz"))?,

        place: text(prop("place")),
        title: text(prop("title")),
        url: text(prop("url")),
        detail_url: text(prop("detail")),

        id,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    pub(crate) fn feature(id: &str, mag: Value) -> Value {
        json!({
            "type": "Feature",
            "id": id,
            "geometry": { "type": "Point", "coordinates": [-117.5, 35.7, 8.2] },
            "properties": {
                "mag": mag,
                "place": "12km SW of Searles Valley, CA",
                "time": 1609459200123i64,
                "updated": 1609459260456i64,
                "tz": -480,
                "url": format!("https://earthquake.usgs.gov/earthquakes/eventpage/{}", id),
                "detail": format!("https://earthquake.usgs.gov/detail/{}.geojson", id),
                "felt": null,
                "cdi": null,
                "mmi": null,
                "alert": null,
                "status": "automatic",
                "tsunami": 0,
                "sig": 52,
                "net": "ci",
                "code": id.trim_start_matches("ci"),
                "ids": format!(",{},", id),
                "sources": ",ci,",
                "types": ",nearby-cities,origin,phase-data,",
                "nst": 21,
                "dmin": 0.07,
                "rms": 0.17,
                "gap": 51.0,
                "magType": "ml",
                "type": "earthquake",
                "title": format!("M 1.6 - {}", id)
            }
        })
    }

    #[test]
    fn decodes_full_feature() {
        let event = decode_event(&feature("ci40000001", json!(1.6)), CoercionPolicy::Strict).unwrap();
        assert_eq!(event.id, "ci40000001");
        assert_eq!(event.longitude, Some(-117.5));
        assert_eq!(event.depth, Some(8.2));
        assert_eq!(event.magnitude, Some(1.6));
        assert_eq!(event.magnitude_type.as_deref(), Some("ml"));
        assert_eq!(event.tsunami, Some(false));
        assert_eq!(event.significance, Some(52));
        assert_eq!(event.station_count, Some(21));
        assert_eq!(event.felt, None);
        assert_eq!(event.alert_level, None);
        assert_eq!(event.timezone_offset, Duration::minutes(-480));
        assert_eq!(event.occurred_at.timestamp_millis(), 1609459200123);
        assert_eq!(event.updated_at.timestamp_millis(), 1609459260456);
        assert_eq!(event.to_string(), "<Quake ci40000001>");
    }

    #[test]
    fn missing_strings_become_empty() {
        let raw = json!({
            "id": "us1",
            "geometry": { "coordinates": [1.0, 2.0, null] },
            "properties": { "time": 1609459200000i64, "updated": 1609459200000i64 }
        });
        let event = decode_event(&raw, CoercionPolicy::Lenient).unwrap();
        assert_eq!(event.depth, None);
        assert_eq!(event.place, "");
        assert_eq!(event.network, "");
        assert_eq!(event.magnitude, None);
        assert_eq!(event.tsunami, None);
        assert_eq!(event.timezone_offset, Duration::zero());
    }

    #[test]
    fn structural_faults() {
        let mut raw = feature("ci1", json!(1.0));
        raw.as_object_mut().unwrap().remove("geometry");
        assert_eq!(
            decode_event(&raw, CoercionPolicy::Lenient).unwrap_err(),
            UsgsDecodeError::MissingGeometry
        );

        let mut raw = feature("ci1", json!(1.0));
        raw.as_object_mut().unwrap().remove("properties");
        assert_eq!(
            decode_event(&raw, CoercionPolicy::Lenient).unwrap_err(),
            UsgsDecodeError::MissingProperties
        );

        let mut raw = feature("ci1", json!(1.0));
        raw["properties"]["updated"] = Value::Null;
        let err = decode_event(&raw, CoercionPolicy::Lenient).unwrap_err();
        assert!(matches!(err, UsgsDecodeError::MalformedTimestamp { .. }));

        let mut raw = feature("ci1", json!(1.0));
        raw["geometry"]["coordinates"] = json!([1.0]);
        let err = decode_event(&raw, CoercionPolicy::Lenient).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn coercion_follows_policy() {
        let raw = feature("ci2", json!("not a number"));
        let lenient = decode_event(&raw, CoercionPolicy::Lenient).unwrap();
        assert_eq!(lenient.magnitude, Some(0.0));

        let err = decode_event(&raw, CoercionPolicy::Strict).unwrap_err();
        assert!(!err.is_structural());
    }

    #[test]
    fn missing_id_is_per_record() {
        let mut raw = feature("ci3", json!(1.0));
        raw.as_object_mut().unwrap().remove("id");
        let err = decode_event(&raw, CoercionPolicy::Lenient).unwrap_err();
        assert_eq!(err, UsgsDecodeError::MissingId);
        assert!(!err.is_structural());
    }
}
