//! The voxelization pipeline.
//!
//! [`Voxelizer::build`] chains the stages of a voxelization:
//! 1. The source object is duplicated with its placement baked in, and a [`VoxelGrid`]
//!    is computed from its bounding box.
//! 2. A [`PointSampler`] generates one point per cell touching the source surface (or
//!    volume).
//! 3. The [`MaterialSampler`] finds the source material closest to each point.
//! 4. The occupied cells are encoded as a spritesheet, and a mesh made of one cube per
//!    occupied cell is assembled.
//! 5. The UVs of each face of that mesh are collapsed to a single point.
//!
//! [`Voxelizer::voxelize`] additionally saves the spritesheet as a PNG file.
//!
//! [`VoxelGrid`]: crate::voxelization::VoxelGrid
//! [`PointSampler`]: crate::voxelization::PointSampler
//! [`MaterialSampler`]: crate::voxelization::MaterialSampler

pub use self::error::VoxelizeError;
pub use self::options::VoxelizeOptions;
pub use self::voxelizer::{voxelize, MeshObject, Voxelization, VoxelizeOutput, Voxelizer};

mod error;
mod options;
mod voxelizer;
