use crate::red_cube;
use voxelator::math::TexCoord;
use voxelator::pipeline::{VoxelizeOptions, Voxelizer};

#[test]
fn welded_cubes_share_their_corners() {
    let options = VoxelizeOptions::default().with_resolution(2);

    let welded = Voxelizer::new(options.clone()).build(&red_cube("cube")).unwrap();
    // 8 cubes on a 2x2x2 grid: a 3x3x3 lattice of corners.
    assert_eq!(welded.object.mesh.vertices().len(), 27);
    assert_eq!(welded.object.mesh.num_faces(), 48);

    let separate = Voxelizer::new(options.with_separate_cubes(true))
        .build(&red_cube("cube"))
        .unwrap();
    assert_eq!(separate.object.mesh.vertices().len(), 8 * 8);
    assert_eq!(separate.object.mesh.num_faces(), 48);
}

#[test]
fn face_uvs_are_collapsed() {
    let mut rng = oorandom::Rand32::new(1234);
    let mut source = red_cube("cube");
    source
        .mesh
        .uvs_mut()
        .unwrap()
        .iter_mut()
        .for_each(|uv| *uv = TexCoord::new(rng.rand_float(), rng.rand_float()));

    let options = VoxelizeOptions::default().with_resolution(5);
    let vox = Voxelizer::new(options).build(&source).unwrap();
    let mesh = &vox.object.mesh;

    for face in 0..mesh.num_faces() as u32 {
        let uvs = mesh.face_uvs(face).unwrap();
        for uv in uvs {
            assert!(voxelator::na::distance(uv, &uvs[0]) <= 1.0e-4);
            assert!((-1.0e-4..=1.0 + 1.0e-4).contains(&uv.x));
            assert!((-1.0e-4..=1.0 + 1.0e-4).contains(&uv.y));
        }
    }
}
