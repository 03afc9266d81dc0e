use crate::red_cube;
use voxelator::na::Vector3;
use voxelator::pipeline::{VoxelizeError, VoxelizeOptions, Voxelizer};
use voxelator::shape::{PolyMesh, SourceObject};
use voxelator::voxelization::{VoxelGrid, MAX_RESOLUTION};

#[test]
fn invalid_resolutions_are_rejected() {
    for resolution in [0, 251, 1000] {
        let options = VoxelizeOptions::default().with_resolution(resolution);
        let result = Voxelizer::new(options).build(&red_cube("cube"));
        assert!(matches!(result, Err(VoxelizeError::InvalidResolution(r)) if r == resolution));
    }

    let aabb = red_cube("cube").mesh.local_aabb();
    assert!(VoxelGrid::new(&aabb, 1).is_ok());
    assert!(VoxelGrid::new(&aabb, MAX_RESOLUTION).is_ok());
}

#[test]
fn degenerate_sources_are_rejected() {
    let flattened = red_cube("flat").with_scale(Vector3::zeros());
    let result = Voxelizer::new(VoxelizeOptions::default()).build(&flattened);
    assert!(matches!(result, Err(VoxelizeError::DegenerateSource(_))));

    let empty = SourceObject::new("empty", PolyMesh::default());
    let result = Voxelizer::new(VoxelizeOptions::default()).build(&empty);
    assert!(matches!(result, Err(VoxelizeError::EmptySource(name)) if name == "empty"));
}

#[test]
fn flat_sources_get_a_single_layer() {
    // Squash the cube along z: the grid keeps at least one layer.
    let flat = red_cube("flat").with_scale(Vector3::new(1.0, 1.0, 0.0));
    let options = VoxelizeOptions::default().with_resolution(3);
    let vox = Voxelizer::new(options).build(&flat).unwrap();

    assert_eq!(vox.grid.dims(), Vector3::new(3, 3, 1));
    assert_eq!(vox.occupancy.len(), 9);
    assert_eq!(vox.spritesheet.width(), 3);
    assert_eq!(vox.spritesheet.num_opaque_pixels(), 9);
}
