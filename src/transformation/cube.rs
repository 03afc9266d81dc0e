use crate::bounding_volume::Aabb;
use crate::math::{Point, TexCoord};
use crate::shape::{Face, PolyMesh};

/// The quads of a box whose vertices are ordered as by [`Aabb::vertices`].
///
/// Each quad is counter-clockwise when seen from outside of the box.
const BOX_QUADS: [[u32; 4]; 6] = [
    [0, 3, 2, 1], // -z
    [4, 5, 6, 7], // +z
    [0, 1, 5, 4], // -y
    [3, 7, 6, 2], // +y
    [0, 4, 7, 3], // -x
    [1, 2, 6, 5], // +x
];

impl Aabb {
    /// Discretize the boundary of this `Aabb` as a polygonal mesh made of six quads.
    ///
    /// Every corner gets a zero texture coordinate and every face the material slot 0.
    pub fn to_poly_mesh(&self) -> PolyMesh {
        box_mesh(self)
    }
}

fn box_mesh(aabb: &Aabb) -> PolyMesh {
    let faces = (0..BOX_QUADS.len() as u32)
        .map(|i| Face {
            loop_start: i * 4,
            loop_total: 4,
            material_index: 0,
        })
        .collect();
    let loops = BOX_QUADS.iter().flatten().copied().collect();

    PolyMesh::from_raw_parts(
        aabb.vertices().to_vec(),
        faces,
        loops,
        Some(vec![TexCoord::origin(); BOX_QUADS.len() * 4]),
        Vec::new(),
    )
}

/// A cube of side 1 centered at the origin, as a polygonal mesh.
pub fn unit_cube_mesh() -> PolyMesh {
    Aabb::new(Point::new(-0.5, -0.5, -0.5), Point::new(0.5, 0.5, 0.5)).to_poly_mesh()
}
