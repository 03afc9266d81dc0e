mod mesh_assembly;
mod multi_material;
mod preconditions;
mod spritesheet_export;
mod unit_cube;

use std::sync::Arc;
use voxelator::shape::{Material, Rgba, SourceObject};
use voxelator::transformation::unit_cube_mesh;

/// A unit cube centered at the origin, with a single red material.
pub fn red_cube(name: &str) -> SourceObject {
    let mesh = unit_cube_mesh().with_materials(vec![Some(Arc::new(Material::flat(
        "red",
        Rgba::opaque(1.0, 0.0, 0.0),
    )))]);
    SourceObject::new(name, mesh)
}

/// A fresh directory for the files written by a test.
pub fn test_dir(test_name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir()
        .join("voxelator-tests")
        .join(test_name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
