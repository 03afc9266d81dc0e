use crate::spritesheet::SpritesheetImage;
use crate::utils::Progress;
use crate::voxelization::OccupancyMap;
use na::Vector3;

/// Rasterizes an [`OccupancyMap`] into a [`SpritesheetImage`].
///
/// Every depth layer `z` of the grid becomes a square tile of side `max(dx, dy)` placed at
/// columns `[z * tile, (z + 1) * tile)`, with the `dx × dy` layer centered in it. The cell
/// `(x, y)` of a layer is drawn `y` rows above the bottom of its tile.
#[derive(Copy, Clone, Debug, Default)]
pub struct SpritesheetEncoder;

impl SpritesheetEncoder {
    /// Encodes the occupied cells of a grid with dimensions `dims`.
    ///
    /// Occupied cells outside of the grid are skipped. Unoccupied pixels are transparent.
    pub fn encode(&self, occupancy: &OccupancyMap, dims: &Vector3<u32>) -> SpritesheetImage {
        let tile = dims.x.max(dims.y);
        let mut result = SpritesheetImage::new(tile, dims.z);
        let height = result.height();
        let off_x = (tile - dims.x) / 2;
        let off_y = (tile - dims.y) / 2;

        log::debug!(
            "Spritesheet dimensions: {} x {}",
            result.width(),
            result.height()
        );

        let mut layers = vec![Vec::new(); dims.z as usize];
        for (index, occupant) in occupancy {
            let in_grid = (0..3).all(|i| index[i] >= 0 && (index[i] as u32) < dims[i]);

            if in_grid {
                layers[index.z as usize].push((index.x as u32, index.y as u32, occupant.color));
            }
        }

        let mut progress = Progress::new("Spritesheet fill", layers.len());

        for (z, layer) in layers.iter().enumerate() {
            let x0 = z as u32 * tile;

            for (ix, iy, color) in layer {
                let x = x0 + off_x + ix;
                let y = off_y + iy;
                result.set_pixel(x, height - 1 - y, color.to_rgba8());
            }

            progress.step();
        }

        result
    }
}
