use crate::{red_cube, test_dir};
use voxelator::pipeline::{voxelize, VoxelizeError, VoxelizeOptions};

#[test]
fn spritesheet_is_saved_to_the_default_path() {
    let dir = test_dir("default_path");
    let options = VoxelizeOptions::default()
        .with_resolution(2)
        .with_output_dir(&dir);
    let output = voxelize(&red_cube("Cube"), options).unwrap();

    let path = output.spritesheet_export.unwrap();
    assert_eq!(path, dir.join("Cube_voxel_slices_2.png"));

    let saved = image::open(&path).unwrap().to_rgba8();
    assert_eq!(saved.dimensions(), (4, 2));
    assert_eq!(saved.as_raw(), output.voxelization.spritesheet.as_raw());
}

#[test]
fn png_extension_is_appended() {
    let dir = test_dir("explicit_path");
    let explicit = dir.join("slices");
    let options = VoxelizeOptions::default()
        .with_resolution(3)
        .with_spritesheet_path(format!("  {}  ", explicit.display()));
    let output = voxelize(&red_cube("Cube"), options).unwrap();

    let path = output.spritesheet_export.unwrap();
    assert_eq!(path, dir.join("slices.png"));
    assert!(path.exists());
}

#[test]
fn export_failure_keeps_the_voxelization() {
    let dir = test_dir("missing_dir");
    let options = VoxelizeOptions::default()
        .with_resolution(2)
        .with_spritesheet_path(dir.join("does/not/exist.png").display().to_string());
    let output = voxelize(&red_cube("Cube"), options).unwrap();

    assert!(matches!(
        output.spritesheet_export,
        Err(VoxelizeError::Io(_)) | Err(VoxelizeError::Image(_))
    ));
    assert_eq!(output.voxelization.occupancy.len(), 8);
    assert_eq!(output.voxelization.object.mesh.num_faces(), 48);
}
