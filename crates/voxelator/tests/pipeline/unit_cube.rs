use crate::red_cube;
use voxelator::na::{Point3, Vector3};
use voxelator::pipeline::{VoxelizeOptions, Voxelizer};
use voxelator::voxelization::GridIndex;

#[test]
fn unit_cube_at_resolution_2() {
    let options = VoxelizeOptions::default().with_resolution(2);
    let vox = Voxelizer::new(options).build(&red_cube("cube")).unwrap();

    assert_eq!(vox.grid.dims(), Vector3::new(2, 2, 2));
    assert_eq!(vox.occupancy.len(), 8);
    assert_eq!(vox.spritesheet.width(), 4);
    assert_eq!(vox.spritesheet.height(), 2);
    assert_eq!(vox.spritesheet.num_opaque_pixels(), 8);

    for x in 0..4 {
        for y in 0..2 {
            assert_eq!(vox.spritesheet.pixel(x, y), [255, 0, 0, 255]);
        }
    }

    for (index, occupant) in &vox.occupancy {
        assert!(vox.grid.contains(index));
        assert_eq!(occupant.material, Some(0));
    }
}

#[test]
fn resolution_1_gives_a_single_voxel() {
    let options = VoxelizeOptions::default().with_resolution(1);
    let vox = Voxelizer::new(options).build(&red_cube("cube")).unwrap();

    assert_eq!(vox.grid.dims(), Vector3::new(1, 1, 1));
    assert_eq!(vox.occupancy.len(), 1);
    assert!(vox.occupancy.contains(&GridIndex::new(0, 0, 0)));
    assert_eq!((vox.spritesheet.width(), vox.spritesheet.height()), (1, 1));
    assert_eq!(vox.spritesheet.num_opaque_pixels(), 1);
    assert_eq!(vox.object.mesh.vertices().len(), 8);
    assert_eq!(vox.object.mesh.num_faces(), 6);
}

#[test]
fn opaque_pixels_match_occupied_cells() {
    for (resolution, fill_volume, expected) in [(4, false, 56), (4, true, 64), (7, false, 218)] {
        let options = VoxelizeOptions::default()
            .with_resolution(resolution)
            .with_fill_volume(fill_volume);
        let vox = Voxelizer::new(options).build(&red_cube("cube")).unwrap();
        let sheet = &vox.spritesheet;

        assert_eq!(vox.occupancy.len(), expected);
        assert_eq!(sheet.num_opaque_pixels(), vox.occupancy.len());
        assert_eq!(
            (sheet.width() * sheet.height()) as usize - sheet.num_opaque_pixels(),
            (sheet.width() * sheet.height()) as usize - vox.occupancy.len()
        );
        assert!(vox.occupancy.indices().all(|i| vox.grid.contains(i)));
    }
}

#[test]
fn voxel_mesh_is_named_centered_and_unit_sized() {
    let options = VoxelizeOptions::default().with_resolution(4);
    let source = red_cube("Suzanne")
        .with_translation(Vector3::new(10.0, -3.0, 2.0))
        .with_scale(Vector3::new(3.0, 3.0, 3.0));
    let vox = Voxelizer::new(options).build(&source).unwrap();

    assert_eq!(vox.object.name, "Suzanne_voxel_mesh");
    assert_eq!(vox.object.translation, Vector3::zeros());

    let aabb = vox.object.mesh.local_aabb();
    approx::assert_relative_eq!(aabb.center(), Point3::origin(), epsilon = 1.0e-4);
    approx::assert_relative_eq!(aabb.extents(), Vector3::repeat(4.0), epsilon = 1.0e-4);

    // Every face uses the single red material.
    let mesh = &vox.object.mesh;
    assert_eq!(mesh.materials().len(), 1);
    assert!((0..mesh.num_faces() as u32)
        .all(|f| mesh.face_material(f).map(|m| m.name.as_str()) == Some("red")));

    // The source is left untouched.
    assert_eq!(source.mesh.vertices().len(), 8);
    assert_eq!(source.translation, Vector3::new(10.0, -3.0, 2.0));
}

#[test]
fn translated_cubes_get_a_closed_shell() {
    let shifts = [
        Vector3::zeros(),
        Vector3::new(0.1, 0.0, 0.0),
        Vector3::new(0.3, -0.7, 1.3),
        Vector3::new(12.34, 5.67, -8.9),
    ];

    for shift in shifts {
        let source = red_cube("cube").with_translation(shift);

        for resolution in 1..=20u32 {
            let options = VoxelizeOptions::default().with_resolution(resolution);
            let vox = Voxelizer::new(options).build(&source).unwrap();
            let n = resolution as usize;
            let shell = n.pow(3) - n.saturating_sub(2).pow(3);

            assert_eq!(vox.grid.dims(), Vector3::repeat(resolution));
            assert_eq!(
                vox.occupancy.len(),
                shell,
                "resolution {}, shift {:?}",
                resolution,
                shift
            );
            assert_eq!(vox.spritesheet.num_opaque_pixels(), shell);

            // Every boundary layer is complete.
            for axis in 0..3 {
                for layer in [0, resolution as i32 - 1] {
                    let count = vox.occupancy.indices().filter(|i| i[axis] == layer).count();
                    assert_eq!(count, n * n, "axis {}, layer {}", axis, layer);
                }
            }
        }
    }
}
