use crate::math::Real;

/// Errors raised while voxelizing a mesh.
#[derive(thiserror::Error, Debug)]
pub enum VoxelizeError {
    /// The resolution is zero or too large.
    #[error("the resolution must be in [1, 250], found {0}.")]
    InvalidResolution(u32),
    /// The source object has a zero or non-finite extent.
    #[error("the source object has a degenerate extent ({0}).")]
    DegenerateSource(Real),
    /// The source object has no face.
    #[error("the source object `{0}` has no face.")]
    EmptySource(String),
    /// The spritesheet could not be written.
    #[error("failed to write the spritesheet: {0}")]
    Io(#[from] std::io::Error),
    /// The spritesheet could not be encoded.
    #[error("failed to encode the spritesheet: {0}")]
    Image(#[from] image::ImageError),
}
