//! Shapes handled by the voxelization pipeline.

pub use self::material::{
    material_slots_color, ColorInput, LinkedNode, Material, Rgba, ShaderNode,
};
pub use self::poly_mesh::{Face, FaceTriangle, PolyMesh, PolyMeshBuilderError};
pub use self::source_object::SourceObject;
pub use self::triangle::{Triangle, TrianglePointLocation};

mod material;
mod poly_mesh;
mod source_object;
mod triangle;
