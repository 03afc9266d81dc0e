use super::{Bvh, BvhNode};
use crate::math::Real;
use smallvec::SmallVec;

/// Trait implemented by cost values associated to leaves during best-first searches.
pub trait BvhLeafCost {
    /// The cost value associated to the leaf.
    ///
    /// Best-first searches for the leaf with the lowest cost.
    fn cost(&self) -> Real;
}

impl BvhLeafCost for Real {
    #[inline(always)]
    fn cost(&self) -> Real {
        *self
    }
}

impl<T> BvhLeafCost for (Real, T) {
    #[inline(always)]
    fn cost(&self) -> Real {
        self.0
    }
}

type TraversalStack = SmallVec<[u32; 32]>;

impl Bvh {
    /// Find the leaf that minimizes its associated cost.
    ///
    /// `aabb_cost` must return a lower bound of the cost of every leaf below the given node.
    /// The `Real` given to both closures is the best cost found so far (or `max_cost` if
    /// nothing was found yet).
    pub fn find_best<L: BvhLeafCost>(
        &self,
        max_cost: Real,
        aabb_cost: impl Fn(&BvhNode, Real) -> Real,
        leaf_cost: impl Fn(u32, Real) -> Option<L>,
    ) -> Option<(u32, L)> {
        let mut stack = TraversalStack::new();
        let mut best_val = None;
        let mut best_cost = max_cost;
        let mut best_id = u32::MAX;

        if self.nodes.is_empty() {
            return None;
        }

        stack.push(0);

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];

            if aabb_cost(node, best_cost) >= best_cost {
                continue;
            }

            if node.is_leaf() {
                if let Some(primitive_val) = leaf_cost(node.children, best_cost) {
                    let primitive_score = primitive_val.cost();
                    if primitive_score < best_cost {
                        best_val = Some(primitive_val);
                        best_cost = primitive_score;
                        best_id = node.children;
                    }
                }
                continue;
            }

            let left = node.children;
            let right = node.children + 1;
            let left_score = aabb_cost(&self.nodes[left as usize], best_cost);
            let right_score = aabb_cost(&self.nodes[right as usize], best_cost);

            // Push the most promising child last so it is visited first.
            if left_score <= right_score {
                stack.push(right);
                stack.push(left);
            } else {
                stack.push(left);
                stack.push(right);
            }
        }

        best_val.map(|val| (best_id, val))
    }
}
