use std::path::PathBuf;

/// The parameters of a voxelization.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(default))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelizeOptions {
    /// The number of cubes along the largest side of the source object, in `[1, 250]`.
    pub resolution: u32,
    /// Voxelize the inside of the source object too, not only its surface.
    pub fill_volume: bool,
    /// Don't weld the corners shared by neighboring cubes.
    pub separate_cubes: bool,
    /// Where to save the spritesheet. If `None` (or blank), the spritesheet is saved to
    /// `<output_dir>/<source>_voxel_slices_<resolution>.png`.
    pub spritesheet_path: Option<String>,
    /// The directory the spritesheet is saved to if no explicit path is given.
    pub output_dir: PathBuf,
}

impl Default for VoxelizeOptions {
    fn default() -> Self {
        Self {
            resolution: 16,
            fill_volume: false,
            separate_cubes: false,
            spritesheet_path: None,
            output_dir: PathBuf::from("."),
        }
    }
}

impl VoxelizeOptions {
    /// Sets the resolution.
    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    /// Enables or disables volume filling.
    pub fn with_fill_volume(mut self, fill_volume: bool) -> Self {
        self.fill_volume = fill_volume;
        self
    }

    /// Enables or disables cube welding.
    pub fn with_separate_cubes(mut self, separate_cubes: bool) -> Self {
        self.separate_cubes = separate_cubes;
        self
    }

    /// Sets an explicit spritesheet path.
    pub fn with_spritesheet_path(mut self, path: impl Into<String>) -> Self {
        self.spritesheet_path = Some(path.into());
        self
    }

    /// Sets the directory the spritesheet is saved to by default.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}
