use std::path::{Path, PathBuf};

/// The path the spritesheet of `source_name` voxelized at `resolution` is saved to.
///
/// An explicit path is trimmed and used as is, unless it is empty in which case the
/// default `<output_dir>/<source_name>_voxel_slices_<resolution>.png` is used. The
/// `.png` extension is appended if missing (case-insensitive check).
pub fn resolve_spritesheet_path(
    explicit: Option<&str>,
    output_dir: &Path,
    source_name: &str,
    resolution: u32,
) -> PathBuf {
    match explicit.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) if path.to_lowercase().ends_with(".png") => PathBuf::from(path),
        Some(path) => PathBuf::from(format!("{path}.png")),
        None => output_dir.join(format!("{source_name}_voxel_slices_{resolution}.png")),
    }
}
