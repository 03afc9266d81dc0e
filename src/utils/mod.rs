//! Various unsorted utilities.

pub use self::point_key::PointKey;
pub use self::progress::Progress;

mod point_key;
mod progress;
