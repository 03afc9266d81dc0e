//! Mesh generation and transformation utilities.

pub use self::cube::unit_cube_mesh;
pub use self::mesh_assembler::MeshAssembler;
pub use self::uv_flatten::{flatten_uvs, UV_SHRINK_FACTOR};
pub use self::uv_transfer::transfer_uvs;
#[cfg(feature = "wavefront")]
pub use self::wavefront::WavefrontError;

mod cube;
mod mesh_assembler;
mod uv_flatten;
mod uv_transfer;
#[cfg(feature = "wavefront")]
mod wavefront;
