use crate::math::{Point, Real, Vector};
use crate::shape::{Triangle, TrianglePointLocation};

impl Triangle {
    /// Projects a point on this triangle and returns the location of the projection.
    ///
    /// The location is given in terms of the triangle features (vertices, edges or the
    /// face itself) together with barycentric coordinates on that feature.
    pub fn project_local_point_and_get_location(
        &self,
        pt: &Point<Real>,
    ) -> (Point<Real>, TrianglePointLocation) {
        let a = self.a;
        let b = self.b;
        let c = self.c;

        let ab = b - a;
        let ac = c - a;
        let ap = pt - a;

        let ab_ap = ab.dot(&ap);
        let ac_ap = ac.dot(&ap);

        if ab_ap <= 0.0 && ac_ap <= 0.0 {
            // Voronoï region of `a`.
            return (a, TrianglePointLocation::OnVertex(0));
        }

        let bp = pt - b;
        let ab_bp = ab.dot(&bp);
        let ac_bp = ac.dot(&bp);

        if ab_bp >= 0.0 && ac_bp <= ab_bp {
            // Voronoï region of `b`.
            return (b, TrianglePointLocation::OnVertex(1));
        }

        let cp = pt - c;
        let ab_cp = ab.dot(&cp);
        let ac_cp = ac.dot(&cp);

        if ac_cp >= 0.0 && ab_cp <= ac_cp {
            // Voronoï region of `c`.
            return (c, TrianglePointLocation::OnVertex(2));
        }

        let bc = c - b;
        let n = ab.cross(&ac);

        let vc = n.dot(&ab.cross(&ap));
        if vc < 0.0 && ab_ap >= 0.0 && ab_bp <= 0.0 {
            // Voronoï region of `ab`.
            let v = ab_ap / ab.norm_squared();
            return (a + ab * v, TrianglePointLocation::OnEdge(0, [1.0 - v, v]));
        }

        let vb = -n.dot(&ac.cross(&cp));
        if vb < 0.0 && ac_ap >= 0.0 && ac_cp <= 0.0 {
            // Voronoï region of `ac`.
            let w = ac_ap / ac.norm_squared();
            return (a + ac * w, TrianglePointLocation::OnEdge(2, [1.0 - w, w]));
        }

        let va = n.dot(&bc.cross(&bp));
        if va < 0.0 && ac_bp - ab_bp >= 0.0 && ab_cp - ac_cp >= 0.0 {
            // Voronoï region of `bc`.
            let w = bc.dot(&bp) / bc.norm_squared();
            return (b + bc * w, TrianglePointLocation::OnEdge(1, [1.0 - w, w]));
        }

        // Voronoï region of the face.
        let denom = va + vb + vc;
        if denom != 0.0 {
            let v = vb / denom;
            let w = vc / denom;
            return (
                a + ab * v + ac * w,
                TrianglePointLocation::OnFace([1.0 - v - w, v, w]),
            );
        }

        // The triangle is (nearly) degenerate: project on the closest edge.
        let candidates = [
            (0, a, ab, ap),
            (1, b, bc, bp),
            (2, a, ac, ap),
        ];
        let mut best = (Real::MAX, a, TrianglePointLocation::OnVertex(0));

        for (edge, origin, dir, origin_to_pt) in candidates {
            let t = clamped_segment_parameter(&dir, &origin_to_pt);
            let proj = origin + dir * t;
            let dist = na::distance_squared(&proj, pt);

            if dist < best.0 {
                best = (dist, proj, TrianglePointLocation::OnEdge(edge, [1.0 - t, t]));
            }
        }

        (best.1, best.2)
    }

    /// Projects a point on this triangle.
    #[inline]
    pub fn project_local_point(&self, pt: &Point<Real>) -> Point<Real> {
        self.project_local_point_and_get_location(pt).0
    }

    /// The distance between this triangle and a point.
    #[inline]
    pub fn distance_to_local_point(&self, pt: &Point<Real>) -> Real {
        na::distance(&self.project_local_point(pt), pt)
    }
}

#[inline]
fn clamped_segment_parameter(dir: &Vector<Real>, origin_to_pt: &Vector<Real>) -> Real {
    let sq_len = dir.norm_squared();

    if sq_len == 0.0 {
        0.0
    } else {
        (dir.dot(origin_to_pt) / sq_len).clamp(0.0, 1.0)
    }
}
