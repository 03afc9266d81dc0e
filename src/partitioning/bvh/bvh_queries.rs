use super::{Bvh, BvhNode};
use crate::math::{Point, Real};

impl Bvh {
    /// Finds the leaf closest to `point` using the provided leaf projection function.
    ///
    /// The `primitive_check` delegates the point-projection task to an external function
    /// that maps a leaf index to an actual geometry to project on. It returns the projected
    /// point together with any extra information `T` the caller wants to keep. The `Real`
    /// argument given to that closure is the distance to the closest point found so far.
    pub fn project_point<T>(
        &self,
        point: &Point<Real>,
        max_distance: Real,
        primitive_check: impl Fn(u32, Real) -> Option<(Point<Real>, T)>,
    ) -> Option<(u32, (Real, (Point<Real>, T)))> {
        self.find_best(
            max_distance,
            |node: &BvhNode, _| node.aabb().distance_to_local_point(point),
            |primitive, best_so_far| {
                let proj = primitive_check(primitive, best_so_far)?;
                Some((na::distance(&proj.0, point), proj))
            },
        )
    }
}

#[cfg(test)]
mod test {
    use crate::bounding_volume::Aabb;
    use crate::math::{Point, Real, Vector};
    use crate::partitioning::Bvh;

    fn unit_boxes(centers: &[Point<Real>]) -> Bvh {
        Bvh::from_leaves(
            centers
                .iter()
                .enumerate()
                .map(|(i, c)| (i as u32, Aabb::from_half_extents(*c, Vector::repeat(0.5)))),
        )
    }

    #[test]
    fn empty_bvh_finds_nothing() {
        let bvh = Bvh::from_leaves(core::iter::empty());
        assert!(bvh.is_empty());
        assert!(bvh
            .project_point(&Point::origin(), Real::MAX, |_, _| Some((Point::origin(), ())))
            .is_none());
    }

    #[test]
    fn bvh_best_first_matches_brute_force() {
        let mut rng = oorandom::Rand32::new(42);
        let centers: Vec<_> = (0..200)
            .map(|_| {
                Point::new(
                    rng.rand_float() * 50.0,
                    rng.rand_float() * 50.0,
                    rng.rand_float() * 50.0,
                )
            })
            .collect();
        let bvh = unit_boxes(&centers);
        assert_eq!(bvh.num_nodes(), centers.len() * 2 - 1);

        for _ in 0..50 {
            let query = Point::new(
                rng.rand_float() * 60.0 - 5.0,
                rng.rand_float() * 60.0 - 5.0,
                rng.rand_float() * 60.0 - 5.0,
            );
            let (best, (dist, _)) = bvh
                .project_point(&query, Real::MAX, |i, _| Some((centers[i as usize], ())))
                .unwrap();
            let brute = centers
                .iter()
                .map(|c| na::distance(c, &query))
                .fold(Real::MAX, Real::min);
            assert_relative_eq!(dist, brute);
            assert_relative_eq!(na::distance(&centers[best as usize], &query), brute);
        }
    }
}
