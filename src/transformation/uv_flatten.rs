use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, TexCoord};
use crate::shape::PolyMesh;
use crate::utils::Progress;

/// The factor applied to the texture-space footprint of each face by [`flatten_uvs`].
pub const UV_SHRINK_FACTOR: Real = 1.0e-5;

/// Collapses the texture-space footprint of every face to (almost) a single point.
///
/// The texture coordinates of each face are scaled by [`UV_SHRINK_FACTOR`] about the center
/// of their bounding rectangle, so a single texel decides the color of the whole face.
/// Does nothing on a mesh without texture coordinates.
pub fn flatten_uvs(mesh: &mut PolyMesh) {
    if mesh.uvs().is_none() {
        return;
    }

    let mut progress = Progress::new("UV shrink", mesh.num_faces());

    for face in 0..mesh.num_faces() as u32 {
        if let Some(uvs) = mesh.face_uvs_mut(face) {
            let center = uv_bounds_center(uvs);
            uvs.iter_mut()
                .for_each(|uv| *uv = center + (*uv - center) * UV_SHRINK_FACTOR);
        }
        progress.step();
    }
}

fn uv_bounds_center(uvs: &[TexCoord]) -> TexCoord {
    let bounds = Aabb::from_points(uvs.iter().map(|uv| Point::new(uv.x, uv.y, 0.0)));
    let center = bounds.center();
    TexCoord::new(center.x, center.y)
}
