/*!
voxelator
=========

**voxelator** turns an arbitrary polygonal mesh into a mesh made of unit cubes, keeping the
material of each region of the source surface, and encodes the occupied voxel grid as a
layered RGBA spritesheet (one tile per depth layer).

The entry point is [`pipeline::Voxelizer`]. The individual stages (grid sampling, material
sampling, mesh assembly, UV flattening and spritesheet encoding) are exposed in their own
modules and can be driven separately.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)]
#![deny(unused_qualifications)]

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod partitioning;
pub mod pipeline;
pub mod query;
pub mod shape;
pub mod spritesheet;
pub mod transformation;
pub mod utils;
pub mod voxelization;

/// Aliases for mathematical types.
pub mod math {
    pub use na::{Point2, Point3, Vector3};
    use na::UnitQuaternion;

    /// The scalar type used throughout this crate.
    pub type Real = f32;

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The rotation type.
    pub type Rotation<N> = UnitQuaternion<N>;

    /// The texture-coordinate type.
    pub type TexCoord = Point2<Real>;
}
