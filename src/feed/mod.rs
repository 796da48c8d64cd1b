pub mod client;
pub mod model;
pub mod urls;

pub use client::FeedClient;
pub use model::{Feed, FeedLevel, FeedPeriod};
pub use urls::*;
