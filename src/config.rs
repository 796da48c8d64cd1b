use crate::decode::CoercionPolicy;
use crate::feed::USGS_SUMMARY_URL;
use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://quakes.db?mode=rwc";

/// Runtime settings, read from the environment (and `.env` when present).
///
/// | variable | default |
/// |---|---|
/// | `DATABASE_URL` | `sqlite://quakes.db?mode=rwc` |
/// | `QUAKEFEED_BASE_URL` | USGS summary feeds |
/// | `QUAKEFEED_COERCION` | `lenient` (`strict` skips records with unreadable values) |
/// | `QUAKEFEED_FETCH_TIMEOUT_SECS` | unset, no timeout |
/// | `QUAKEFEED_LOG_DIR` | unset, log to stderr |
#[derive(Debug, Clone, PartialEq)]
pub struct IngestConfig {
    pub database_url: String,
    pub feed_base_url: String,
    pub coercion: CoercionPolicy,
    pub fetch_timeout: Option<Duration>,
    pub log_dir: Option<PathBuf>,
}

impl IngestConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let coercion = match get("QUAKEFEED_COERCION") {
            Some(v) => v.parse::<CoercionPolicy>().map_err(|e| anyhow!(e))?,
            None => CoercionPolicy::default(),
        };
        let fetch_timeout = match get("QUAKEFEED_FETCH_TIMEOUT_SECS") {
            Some(v) => {
                let secs = v
                    .parse::<u64>()
                    .map_err(|e| anyhow!("QUAKEFEED_FETCH_TIMEOUT_SECS={}: {}", v, e))?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            feed_base_url: get("QUAKEFEED_BASE_URL").unwrap_or_else(|| USGS_SUMMARY_URL.to_string()),
            coercion,
            fetch_timeout,
            log_dir: get("QUAKEFEED_LOG_DIR").map(PathBuf::from),
        })
    }
}
