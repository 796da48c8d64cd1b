use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

/// Faults raised while turning one raw feed feature into an `Event`.
///
/// Geometry, properties and timestamps are structural: a feed that lacks them
/// cannot be trusted and the whole batch is aborted. The rest only disqualify
/// the record they were found in.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UsgsDecodeError {
    #[error("the geometry information was not returned by the feed")]
    MissingGeometry,

    #[error("an event did not have any property information")]
    MissingProperties,

    #[error("malformed coordinates: {0}")]
    MalformedCoordinates(String),

    #[error("malformed timestamp in `{field}`: {reason}")]
    MalformedTimestamp { field: String, reason: String },

    #[error("malformed feed: {0}")]
    MalformedFeed(String),

    #[error("event has no usable id")]
    MissingId,

    #[error("cannot coerce `{field}` from {raw}")]
    Coercion { field: String, raw: String },
}

impl UsgsDecodeError {
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::MissingId | Self::Coercion { .. })
    }

    pub(crate) fn timestamp(field: &str, reason: impl Into<String>) -> Self {
        Self::MalformedTimestamp {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("invalid feed parameters: level={level} period={period}")]
    InvalidFeedParameters { level: String, period: String },

    #[error("feed unavailable: HTTP {status_code}")]
    FeedUnavailable { status_code: u16 },

    #[error("malformed bounding box: expected 6 numbers, got {0}")]
    MalformedBoundingBox(usize),

    #[error("USGS decode error: {0}")]
    Decode(#[from] UsgsDecodeError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
