use super::model::{FeedLevel, FeedPeriod};

/// USGS real-time GeoJSON summary feeds.
pub const USGS_SUMMARY_URL: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

pub fn url_feed(base: &str, level: FeedLevel, period: FeedPeriod) -> String {
    format!("{}/{}_{}.geojson", base.trim_end_matches('/'), level, period)
}
