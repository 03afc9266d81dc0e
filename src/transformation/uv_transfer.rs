use crate::math::TexCoord;
use crate::query::PolyMeshProjector;
use crate::shape::PolyMesh;

/// Transfers the texture coordinates of `source` to every loop of `target`.
///
/// Each face of `target` is matched to the face of `source` closest to its center. Each
/// corner of the target face then gets the source texture coordinates interpolated at the
/// projection of that corner on the matched face. Both meshes must be expressed in the
/// same space. If `source` has no texture coordinates, all those of `target` are set to
/// zero.
pub fn transfer_uvs(target: &mut PolyMesh, source: &PolyMesh) {
    let num_loops = target.loops().len();

    let Some(source_uvs) = source.uvs() else {
        log::debug!("The UV source has no texture coordinates, zeroing them.");
        target.reset_uvs(vec![TexCoord::origin(); num_loops]);
        return;
    };

    let projector = PolyMeshProjector::new(source);
    let mut uvs = Vec::with_capacity(num_loops);

    for face in 0..target.num_faces() as u32 {
        let center = target.face_center(face);
        let Some(nearest) = projector.project_local_point(&center) else {
            uvs.extend(target.face_vertices(face).iter().map(|_| TexCoord::origin()));
            continue;
        };

        for pt in target.face_points(face) {
            let proj = source.project_local_point_on_face(nearest.face, &pt);
            uvs.push(proj.interpolate(source_uvs));
        }
    }

    target.reset_uvs(uvs);
}

#[cfg(test)]
mod test {
    use super::transfer_uvs;
    use crate::math::{Point, TexCoord, Vector};
    use crate::shape::PolyMesh;
    use crate::transformation::unit_cube_mesh;

    #[test]
    fn uvs_follow_the_nearest_face() {
        // A large quad below the cube, mapping x, y linearly to u, v.
        let source = PolyMesh::new(
            vec![
                Point::new(-2.0, -2.0, -1.0),
                Point::new(2.0, -2.0, -1.0),
                Point::new(2.0, 2.0, -1.0),
                Point::new(-2.0, 2.0, -1.0),
            ],
            [[0, 1, 2, 3]],
        )
        .unwrap()
        .with_uvs(vec![
            TexCoord::new(0.0, 0.0),
            TexCoord::new(1.0, 0.0),
            TexCoord::new(1.0, 1.0),
            TexCoord::new(0.0, 1.0),
        ])
        .unwrap();

        let mut cube = unit_cube_mesh();
        cube.translate_vertices(&Vector::new(1.0, 0.0, 0.0));
        transfer_uvs(&mut cube, &source);

        let uvs = cube.uvs().unwrap();
        assert_eq!(uvs.len(), 24);
        for (l, vid) in cube.loops().iter().enumerate() {
            let pt = cube.vertices()[*vid as usize];
            let expected = TexCoord::new((pt.x + 2.0) / 4.0, (pt.y + 2.0) / 4.0);
            assert_relative_eq!(uvs[l], expected, epsilon = 1.0e-6);
        }
    }

    #[test]
    fn missing_source_uvs_are_zeroed() {
        let source = unit_cube_mesh();
        let source_without_uvs =
            PolyMesh::new(source.vertices().to_vec(), [[0u32, 1, 2]]).unwrap();

        let mut cube = unit_cube_mesh();
        cube.uvs_mut().unwrap()[0] = TexCoord::new(0.5, 0.5);
        transfer_uvs(&mut cube, &source_without_uvs);
        assert!(cube.uvs().unwrap().iter().all(|uv| *uv == TexCoord::origin()));
    }
}
