use super::model::BoundingBox;
use crate::error::{IngestError, Result};
use serde_json::Value;

/// Decode a feed `bbox` array.
///
/// Canonical order is `[min_lon, max_lon, min_lat, max_lat, min_depth,
/// max_depth]`; trailing extra elements are ignored.
pub fn decode_bounding_box(raw: Option<&Value>) -> Result<BoundingBox> {
    let values: Vec<f64> = match raw.and_then(|v| v.as_array()) {
        Some(arr) => arr.iter().map_while(|v| v.as_f64()).collect(),
        None => Vec::new(),
    };
    if values.len() < 6 {
        return Err(IngestError::MalformedBoundingBox(values.len()));
    }
    if values.len() > 6 {
        log::warn!("bbox has {} values, ignoring the extras", values.len());
    }

    Ok(BoundingBox {
        min_longitude: values[0],
        max_longitude: values[1],
        min_latitude: values[2],
        max_latitude: values[3],
        min_depth: values[4],
        max_depth: values[5],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn positional_mapping() {
        let bbox = decode_bounding_box(Some(&json!([-180, 180, -90, 90, 0, 700]))).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                min_longitude: -180.0,
                max_longitude: 180.0,
                min_latitude: -90.0,
                max_latitude: 90.0,
                min_depth: 0.0,
                max_depth: 700.0,
            }
        );
    }

    #[test]
    fn too_short() {
        let err = decode_bounding_box(Some(&json!([-180, 180, -90, 90, 0]))).unwrap_err();
        assert!(matches!(err, IngestError::MalformedBoundingBox(5)));
        assert!(matches!(
            decode_bounding_box(None).unwrap_err(),
            IngestError::MalformedBoundingBox(0)
        ));
        assert!(matches!(
            decode_bounding_box(Some(&json!([1, 2, "x", 4, 5, 6]))).unwrap_err(),
            IngestError::MalformedBoundingBox(2)
        ));
    }
}
