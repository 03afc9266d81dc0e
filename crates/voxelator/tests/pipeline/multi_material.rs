use std::sync::Arc;
use voxelator::math::Rotation;
use voxelator::na::Vector3;
use voxelator::pipeline::{VoxelizeOptions, Voxelizer};
use voxelator::shape::{Material, Rgba, SourceObject};
use voxelator::transformation::unit_cube_mesh;

/// A unit cube whose `+x` face uses a blue material, the other faces a red one.
fn red_cube_with_blue_side() -> SourceObject {
    let mesh = unit_cube_mesh()
        .with_materials(vec![
            Some(Arc::new(Material::flat("red", Rgba::opaque(1.0, 0.0, 0.0)))),
            Some(Arc::new(Material::flat("blue", Rgba::opaque(0.0, 0.0, 1.0)))),
        ])
        // Faces: -z, +z, -y, +y, -x, +x.
        .with_face_materials(&[0, 0, 0, 0, 0, 1]);
    SourceObject::new("cube", mesh)
}

#[test]
fn rotated_side_keeps_its_material() {
    let source = red_cube_with_blue_side().with_rotation(Rotation::from_axis_angle(
        &Vector3::z_axis(),
        core::f32::consts::FRAC_PI_2,
    ));
    let options = VoxelizeOptions::default().with_resolution(4);
    let vox = Voxelizer::new(options).build(&source).unwrap();
    let mesh = &vox.object.mesh;

    let names: Vec<_> = mesh
        .materials()
        .iter()
        .map(|m| m.as_ref().map(|m| m.name.as_str()))
        .collect();
    assert_eq!(names, [Some("red"), Some("blue")]);

    // The local +x side now faces +y. Only the faces away from the cube edges are
    // checked: the cells along the edges are as close to both sides.
    let mut top = 0;
    let mut bottom = 0;

    for face in 0..mesh.num_faces() as u32 {
        let Some(normal) = mesh.face_normal(face) else {
            continue;
        };
        let center = mesh.face_center(face);
        let away_from_edges = center.x.abs() < 1.0 && center.z.abs() < 1.0;
        let name = mesh.face_material(face).map(|m| m.name.as_str());

        if !away_from_edges {
            continue;
        }

        if normal.y > 0.9 && (center.y - 2.0).abs() < 1.0e-3 {
            assert_eq!(name, Some("blue"), "face {} at {}", face, center);
            top += 1;
        } else if normal.y < -0.9 && (center.y + 2.0).abs() < 1.0e-3 {
            assert_eq!(name, Some("red"), "face {} at {}", face, center);
            bottom += 1;
        }
    }

    assert_eq!((top, bottom), (4, 4));

    // The blue cells of the occupancy map all lie on the top layer.
    let blue = Rgba::opaque(0.0, 0.0, 1.0);
    for (index, occupant) in &vox.occupancy {
        if occupant.material == Some(1) {
            assert_eq!(occupant.color, blue);
            assert_eq!(index.y, 3);
        }
    }
    assert!(vox.occupancy.iter().any(|(_, o)| o.material == Some(1)));
}
