//! Point projection.

pub use self::point_poly_mesh::{PolyMeshProjection, PolyMeshProjector};

mod point_poly_mesh;
mod point_triangle;
