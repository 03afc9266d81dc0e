//! Non-persistent geometric queries.
//!
//! * Point projection on triangles and polygonal meshes, see [`point`].
//! * Overlap tests between axis-aligned boxes and triangles, see
//!   [`intersection_test_aabb_triangle`].

pub use self::intersection_test::intersection_test_aabb_triangle;
pub use self::point::{PolyMeshProjection, PolyMeshProjector};

mod intersection_test;
pub mod point;
