use crate::math::{Point, Real, TexCoord};
use crate::partitioning::Bvh;
use crate::shape::{FaceTriangle, PolyMesh};

/// The projection of a point on a [`PolyMesh`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PolyMeshProjection {
    /// The projected point.
    pub point: Point<Real>,
    /// The face containing the projected point.
    pub face: u32,
    /// The loops of the face triangle containing the projected point.
    pub loops: [u32; 3],
    /// The barycentric coordinates of the projected point on the triangle with corners `loops`.
    pub bcoords: [Real; 3],
}

impl PolyMeshProjection {
    /// Interpolates per-loop attributes (typically texture coordinates) at the projected point.
    pub fn interpolate(&self, attributes: &[TexCoord]) -> TexCoord {
        let coords = self
            .loops
            .iter()
            .zip(self.bcoords.iter())
            .fold(na::Vector2::zeros(), |acc, (l, w)| {
                acc + attributes[*l as usize].coords * *w
            });
        TexCoord::from(coords)
    }
}

fn project_on_face_triangle(
    mesh: &PolyMesh,
    tri: &FaceTriangle,
    pt: &Point<Real>,
) -> PolyMeshProjection {
    let (point, location) = mesh
        .loop_triangle(tri.loops)
        .project_local_point_and_get_location(pt);
    PolyMeshProjection {
        point,
        face: tri.face,
        loops: tri.loops,
        bcoords: location.barycentric_coordinates(),
    }
}

impl PolyMesh {
    /// Projects a point on a single face of this mesh.
    pub fn project_local_point_on_face(&self, face: u32, pt: &Point<Real>) -> PolyMeshProjection {
        let first = self.faces()[face as usize].loop_start;
        let total = self.faces()[face as usize].loop_total;

        let mut best: Option<(Real, PolyMeshProjection)> = None;

        for k in 1..total - 1 {
            let tri = FaceTriangle {
                face,
                loops: [first, first + k, first + k + 1],
            };
            let proj = project_on_face_triangle(self, &tri, pt);
            let dist = na::distance_squared(&proj.point, pt);

            if best.as_ref().map(|b| dist < b.0).unwrap_or(true) {
                best = Some((dist, proj));
            }
        }

        // Faces always have at least three corners so there is at least one triangle.
        best.map(|b| b.1).unwrap_or(PolyMeshProjection {
            point: *pt,
            face,
            loops: [first; 3],
            bcoords: [1.0, 0.0, 0.0],
        })
    }
}

/// Accelerates closest-point queries on a [`PolyMesh`].
///
/// The fan triangulation of every face of the mesh is stored in a [`Bvh`]. The mesh
/// must not be modified while the projector is alive.
#[derive(Clone, Debug)]
pub struct PolyMeshProjector<'a> {
    mesh: &'a PolyMesh,
    triangles: Vec<FaceTriangle>,
    bvh: Bvh,
}

impl<'a> PolyMeshProjector<'a> {
    /// Builds the acceleration structure for the given mesh.
    pub fn new(mesh: &'a PolyMesh) -> Self {
        let triangles: Vec<_> = mesh.face_triangles().collect();
        let bvh = Bvh::from_leaves(
            triangles
                .iter()
                .enumerate()
                .map(|(i, tri)| (i as u32, mesh.loop_triangle(tri.loops).local_aabb())),
        );

        Self {
            mesh,
            triangles,
            bvh,
        }
    }

    /// Projects a point on the mesh.
    ///
    /// Returns `None` only if the mesh has no triangle.
    pub fn project_local_point(&self, pt: &Point<Real>) -> Option<PolyMeshProjection> {
        self.bvh
            .project_point(pt, Real::MAX, |leaf, _| {
                let proj = project_on_face_triangle(self.mesh, &self.triangles[leaf as usize], pt);
                Some((proj.point, proj))
            })
            .map(|(_, (_, (_, proj)))| proj)
    }
}

#[cfg(test)]
mod test {
    use super::PolyMeshProjector;
    use crate::math::{Point, Real, TexCoord};
    use crate::shape::PolyMesh;

    fn two_quads() -> PolyMesh {
        PolyMesh::new(
            vec![
                Point::new(0.0, 0.0, 0.0),
                Point::new(1.0, 0.0, 0.0),
                Point::new(1.0, 1.0, 0.0),
                Point::new(0.0, 1.0, 0.0),
                Point::new(5.0, 0.0, 0.0),
                Point::new(6.0, 0.0, 0.0),
                Point::new(6.0, 1.0, 0.0),
                Point::new(5.0, 1.0, 0.0),
            ],
            [[0, 1, 2, 3], [4, 5, 6, 7]],
        )
        .unwrap()
    }

    #[test]
    fn project_finds_nearest_face() {
        let mesh = two_quads();
        let projector = PolyMeshProjector::new(&mesh);

        let proj = projector
            .project_local_point(&Point::new(0.75, 0.75, 1.0))
            .unwrap();
        assert_eq!(proj.face, 0);
        assert_relative_eq!(proj.point, Point::new(0.75, 0.75, 0.0));

        let proj = projector
            .project_local_point(&Point::new(7.0, 0.5, -1.0))
            .unwrap();
        assert_eq!(proj.face, 1);
        assert_relative_eq!(proj.point, Point::new(6.0, 0.5, 0.0));
    }

    #[test]
    fn projector_matches_brute_force() {
        let mut rng = oorandom::Rand32::new(3);
        let mesh = two_quads();
        let projector = PolyMeshProjector::new(&mesh);

        for _ in 0..200 {
            let pt = Point::new(
                rng.rand_float() * 8.0 - 1.0,
                rng.rand_float() * 3.0 - 1.0,
                rng.rand_float() * 2.0 - 1.0,
            );
            let proj = projector.project_local_point(&pt).unwrap();
            let brute = (0..mesh.num_faces() as u32)
                .map(|f| na::distance(&mesh.project_local_point_on_face(f, &pt).point, &pt))
                .fold(Real::MAX, Real::min);
            assert_relative_eq!(na::distance(&proj.point, &pt), brute, epsilon = 1.0e-5);
        }
    }

    #[test]
    fn interpolate_uvs() {
        let uvs: Vec<TexCoord> = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
            .iter()
            .cycle()
            .take(8)
            .map(|uv| TexCoord::new(uv[0], uv[1]))
            .collect();
        let mesh = two_quads().with_uvs(uvs).unwrap();
        let proj = mesh.project_local_point_on_face(1, &Point::new(5.25, 0.5, 3.0));
        let uv = proj.interpolate(mesh.uvs().unwrap());
        assert_relative_eq!(uv, TexCoord::new(0.25, 0.5), epsilon = 1.0e-6);
    }
}
