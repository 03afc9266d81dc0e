use crate::pipeline::VoxelizeError;
use crate::shape::Rgba as Color;
use image::{ImageBuffer, ImageFormat, Rgba};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A layered RGBA8 image encoding an occupied voxel grid.
///
/// The image is made of `layers` square tiles of side `tile` laid out from left to right,
/// one per depth layer of the grid. Row 0 is the top of the image.
#[derive(Clone, Debug)]
pub struct SpritesheetImage {
    tile: u32,
    layers: u32,
    pixels: ImageBuffer<Rgba<u8>, Vec<u8>>,
}

impl SpritesheetImage {
    /// A fully transparent spritesheet with `layers` tiles of side `tile`.
    pub fn new(tile: u32, layers: u32) -> Self {
        Self {
            tile,
            layers,
            pixels: ImageBuffer::from_pixel(
                tile * layers,
                tile,
                Rgba(Color::TRANSPARENT.to_rgba8()),
            ),
        }
    }

    /// The side length, in pixels, of each tile.
    #[inline]
    pub fn tile(&self) -> u32 {
        self.tile
    }

    /// The number of tiles.
    #[inline]
    pub fn layers(&self) -> u32 {
        self.layers
    }

    /// The width of the image, in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// The height of the image, in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// The pixel at column `x` and row `y` (row 0 being the top of the image).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels.get_pixel(x, y).0
    }

    /// Sets the pixel at column `x` and row `y` (row 0 being the top of the image).
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        self.pixels.put_pixel(x, y, Rgba(rgba));
    }

    /// The raw RGBA8 bytes of the image, row by row from the top.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// The number of pixels with a non-zero alpha.
    pub fn num_opaque_pixels(&self) -> usize {
        self.pixels.pixels().filter(|px| px.0[3] != 0).count()
    }

    /// Writes this image as a PNG file.
    pub fn save(&self, path: &Path) -> Result<(), VoxelizeError> {
        let mut file = BufWriter::new(File::create(path)?);
        self.pixels.write_to(&mut file, ImageFormat::Png)?;
        file.flush()?;
        log::info!(
            "Saved the {}x{} spritesheet to {}",
            self.width(),
            self.height(),
            path.display()
        );
        Ok(())
    }
}
