pub mod bbox;
pub mod coerce;
pub mod model;
pub mod record;
pub mod timestamp;

pub use bbox::decode_bounding_box;
pub use coerce::CoercionPolicy;
pub use model::{BoundingBox, Event};
pub use record::decode_event;
