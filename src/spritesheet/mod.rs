//! Layered raster encoding of occupied voxel grids.

pub use self::spritesheet_encoder::SpritesheetEncoder;
pub use self::spritesheet_image::SpritesheetImage;
pub use self::spritesheet_path::resolve_spritesheet_path;

mod spritesheet_encoder;
mod spritesheet_image;
mod spritesheet_path;
