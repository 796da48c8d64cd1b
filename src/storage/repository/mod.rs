pub mod feed_repo;
pub mod quake_repo;

pub use feed_repo::FeedRepository;
pub use quake_repo::QuakeRepository;
