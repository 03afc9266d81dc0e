//! Voxel grid computation and sampling.
//!
//! A [`VoxelGrid`] is computed from the bounding box of the mesh to voxelize. A
//! [`PointSampler`] then generates one point per cell touched by the mesh surface (or
//! volume), and the [`MaterialSampler`] turns these points into an [`OccupancyMap`]
//! recording the material of the source mesh closest to each occupied cell.

pub use self::material_sampler::MaterialSampler;
pub use self::occupancy_map::{OccupancyMap, Occupant};
pub use self::point_sampler::{LatticeSampler, PointSampler, SampleDomain};
pub use self::voxel_grid::{GridIndex, VoxelGrid, VoxelSample, MAX_RESOLUTION};

mod material_sampler;
mod occupancy_map;
mod point_sampler;
mod voxel_grid;
