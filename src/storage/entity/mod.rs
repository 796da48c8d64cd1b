pub mod bounding_box;
pub mod feed;
pub mod feed_quake;
pub mod quake;

pub use bounding_box::Entity as BoundingBox;
pub use feed::Entity as Feed;
pub use feed_quake::Entity as FeedQuake;
pub use quake::Entity as Quake;
