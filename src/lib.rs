//! Ingests USGS GeoJSON summary feeds into a deduplicated SQLite catalog of
//! seismic events.
//!
//! Pipeline: [`feed::FeedClient`] fetches a snapshot, [`decode`] turns raw
//! features into [`decode::Event`]s, [`ingest::ReconciliationEngine`] merges
//! them into the store by event id and [`ingest::CommitGate`] keeps the whole
//! pass staged until it is confirmed.

pub mod commands;
pub mod config;
pub mod decode;
pub mod error;
pub mod feed;
pub mod ingest;
pub mod storage;

pub use error::{IngestError, Result, UsgsDecodeError};
