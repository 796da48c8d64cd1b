use crate::error::UsgsDecodeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// What to do with an optional property whose value is present but cannot be
/// read as the expected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoercionPolicy {
    /// Store the type's zero value (0, 0.0, false).
    #[default]
    Lenient,
    /// Reject the record; the reconciliation pass counts it as skipped.
    Strict,
}

impl FromStr for CoercionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown coercion policy: {}", other)),
        }
    }
}

impl CoercionPolicy {
    fn fallback<T: Default>(self, field: &str, raw: &Value) -> Result<Option<T>, UsgsDecodeError> {
        match self {
            Self::Lenient => {
                log::debug!("coercing `{}` from {} to default", field, raw);
                Ok(Some(T::default()))
            }
            Self::Strict => Err(UsgsDecodeError::Coercion {
                field: field.to_string(),
                raw: raw.to_string(),
            }),
        }
    }

    pub fn float(self, field: &str, value: Option<&Value>) -> Result<Option<f64>, UsgsDecodeError> {
        let raw = match value {
            None | Some(Value::Null) => return Ok(None),
            Some(v) => v,
        };
        let parsed = match raw {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        };
        match parsed {
            Some(f) => Ok(Some(f)),
            None => self.fallback(field, raw),
        }
    }

    pub fn int(self, field: &str, value: Option<&Value>) -> Result<Option<i32>, UsgsDecodeError> {
        let raw = match value {
            None | Some(Value::Null) => return Ok(None),
            Some(v) => v,
        };
        let parsed = match raw {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .and_then(|i| i32::try_from(i).ok()),
            Value::String(s) => s.trim().parse::<i32>().ok(),
            Value::Bool(b) => Some(i32::from(*b)),
            _ => None,
        };
        match parsed {
            Some(i) => Ok(Some(i)),
            None => self.fallback(field, raw),
        }
    }

    pub fn bool(self, field: &str, value: Option<&Value>) -> Result<Option<bool>, UsgsDecodeError> {
        let raw = match value {
            None | Some(Value::Null) => return Ok(None),
            Some(v) => v,
        };
        let parsed = match raw {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|f| f != 0.0),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        };
        match parsed {
            Some(b) => Ok(Some(b)),
            None => self.fallback(field, raw),
        }
    }
}

/// String property, empty when absent so the record stays renderable.
pub fn text(value: Option<&Value>) -> String {
    optional_text(value).unwrap_or_default()
}

pub fn optional_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}
