use super::coerce::CoercionPolicy;
use crate::error::UsgsDecodeError;
use chrono::{DateTime, Duration, Utc};
use log::warn;
use serde_json::Value;

/// Digit count of an epoch expressed in milliseconds (2001..2286).
const EPOCH_MS_DIGITS: usize = 13;

/// Normalize a provider epoch-milliseconds value into an absolute UTC time.
///
/// Thirteen-digit literals are split textually into whole seconds and the
/// trailing millisecond remainder, so no float division is ever involved on
/// the common path. Other integers are split with euclidean division and
/// floats are rounded to the nearest millisecond first.
pub fn normalize_epoch_ms(field: &str, value: Option<&Value>) -> Result<DateTime<Utc>, UsgsDecodeError> {
    let literal = match value {
        None | Some(Value::Null) => return Err(UsgsDecodeError::timestamp(field, "absent")),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => {
            return Err(UsgsDecodeError::timestamp(
                field,
                format!("not numeric: {}", other),
            ))
        }
    };

    let (secs, millis) = if literal.len() == EPOCH_MS_DIGITS
        && literal.bytes().all(|b| b.is_ascii_digit())
    {
        let (whole, rest) = literal.split_at(EPOCH_MS_DIGITS - 3);
        let secs = whole
            .parse::<i64>()
            .map_err(|e| UsgsDecodeError::timestamp(field, e.to_string()))?;
        let millis = rest
            .parse::<u32>()
            .map_err(|e| UsgsDecodeError::timestamp(field, e.to_string()))?;
        (secs, millis)
    } else if let Ok(ms) = literal.parse::<i64>() {
        split_millis(ms)
    } else if let Some(ms) = literal.parse::<f64>().ok().filter(|f| f.is_finite()) {
        split_millis(ms.round() as i64)
    } else {
        return Err(UsgsDecodeError::timestamp(
            field,
            format!("not numeric: {}", literal),
        ));
    };

    DateTime::from_timestamp(secs, millis * 1_000_000)
        .ok_or_else(|| UsgsDecodeError::timestamp(field, format!("out of range: {}", literal)))
}

fn split_millis(ms: i64) -> (i64, u32) {
    (ms.div_euclid(1000), ms.rem_euclid(1000) as u32)
}

/// Timezone offset in minutes; absence means UTC.
pub fn timezone_offset(policy: CoercionPolicy, value: Option<&Value>) -> Result<Duration, UsgsDecodeError> {
    let minutes = policy.int("tz", value)?.unwrap_or(0);
    Ok(Duration::minutes(i64::from(minutes)))
}

pub fn to_epoch_ms(at: &DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

/// Stored epoch milliseconds back to UTC. Values chrono cannot represent
/// are logged and read as the Unix epoch.
pub fn from_epoch_ms(ms: i64) -> DateTime<Utc> {
    match DateTime::from_timestamp_millis(ms) {
        Some(at) => at,
        None => {
            warn!("stored epoch {}ms is out of range, reading it as 1970-01-01", ms);
            DateTime::<Utc>::UNIX_EPOCH
        }
    }
}
