use crate::bounding_volume::Aabb;
use crate::math::{Real, Vector};
use crate::shape::Triangle;

/// Tests if a triangle intersects a closed AABB.
///
/// Touching counts as intersecting. This is a separating-axis test on the 13 candidate
/// axes: the three AABB normals, the triangle normal, and the nine cross products
/// between the AABB normals and the triangle edges.
pub fn intersection_test_aabb_triangle(aabb1: &Aabb, triangle2: &Triangle) -> bool {
    let center = aabb1.center();
    let half_extents = aabb1.half_extents();

    let a = triangle2.a - center;
    let b = triangle2.b - center;
    let c = triangle2.c - center;

    // AABB normals.
    for i in 0..3 {
        let min = a[i].min(b[i]).min(c[i]);
        let max = a[i].max(b[i]).max(c[i]);

        if min > half_extents[i] || max < -half_extents[i] {
            return false;
        }
    }

    let edges = [b - a, c - b, a - c];

    // Triangle normal.
    if is_separating_axis(&edges[0].cross(&edges[1]), &half_extents, &a, &b, &c) {
        return false;
    }

    // Edge-edge axes.
    for edge in &edges {
        for i in 0..3 {
            let axis = Vector::ith(i, 1.0).cross(edge);

            if is_separating_axis(&axis, &half_extents, &a, &b, &c) {
                return false;
            }
        }
    }

    true
}

#[inline]
fn is_separating_axis(
    axis: &Vector<Real>,
    half_extents: &Vector<Real>,
    a: &Vector<Real>,
    b: &Vector<Real>,
    c: &Vector<Real>,
) -> bool {
    let pa = axis.dot(a);
    let pb = axis.dot(b);
    let pc = axis.dot(c);
    let radius = half_extents.dot(&axis.abs());

    pa.min(pb).min(pc) > radius || pa.max(pb).max(pc) < -radius
}
