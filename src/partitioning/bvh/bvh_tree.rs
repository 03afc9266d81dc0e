use crate::bounding_volume::Aabb;
use crate::math::Real;
use ordered_float::OrderedFloat;

/// A leaf or internal node of a [`Bvh`].
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BvhNode {
    aabb: Aabb,
    /// For leaves, the leaf data. For internal nodes, the index of the first child (the
    /// second child is stored right after it).
    pub(super) children: u32,
    pub(super) leaf: bool,
}

impl BvhNode {
    #[inline(always)]
    fn leaf(aabb: Aabb, data: u32) -> Self {
        Self {
            aabb,
            children: data,
            leaf: true,
        }
    }

    #[inline(always)]
    fn internal(aabb: Aabb, first_child: u32) -> Self {
        Self {
            aabb,
            children: first_child,
            leaf: false,
        }
    }

    /// The bounding volume of this node.
    #[inline(always)]
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// Is this node a leaf?
    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        self.leaf
    }
}

/// A binary bounding-volume hierarchy.
///
/// The tree is built once, top-down, by splitting the leaves at the median of their
/// centers along the axis where those centers are the most spread out. It is not meant
/// to be updated afterward: rebuild it if the underlying geometry changes.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Bvh {
    pub(super) nodes: Vec<BvhNode>,
}

#[derive(Copy, Clone)]
struct BvhLeaf {
    aabb: Aabb,
    center: [Real; 3],
    data: u32,
}

impl Bvh {
    /// Builds a tree from a set of leaves, each given as `(leaf_data, aabb)`.
    pub fn from_leaves(leaves: impl IntoIterator<Item = (u32, Aabb)>) -> Self {
        let mut leaves: Vec<_> = leaves
            .into_iter()
            .map(|(data, aabb)| {
                let center = aabb.center();
                BvhLeaf {
                    aabb,
                    center: [center.x, center.y, center.z],
                    data,
                }
            })
            .collect();

        let mut result = Self {
            nodes: Vec::with_capacity(leaves.len() * 2),
        };

        if !leaves.is_empty() {
            result.nodes.push(BvhNode::leaf(Aabb::new_invalid(), u32::MAX));
            result.build_range(0, &mut leaves);
        }

        result
    }

    /// The number of nodes (leaves included) of this tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Is this tree empty?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn build_range(&mut self, target_node_id: usize, leaves: &mut [BvhLeaf]) {
        if let [leaf] = leaves {
            self.nodes[target_node_id] = BvhNode::leaf(leaf.aabb, leaf.data);
            return;
        }

        let mut centers = Aabb::new_invalid();
        for leaf in &*leaves {
            centers.take_point(leaf.center.into());
        }
        let axis = centers.extents().imax();
        let mid = leaves.len() / 2;
        let _ = leaves.select_nth_unstable_by_key(mid, |leaf| OrderedFloat(leaf.center[axis]));

        let first_child = self.nodes.len();
        self.nodes
            .push(BvhNode::leaf(Aabb::new_invalid(), u32::MAX));
        self.nodes
            .push(BvhNode::leaf(Aabb::new_invalid(), u32::MAX));

        let (left, right) = leaves.split_at_mut(mid);
        self.build_range(first_child, left);
        self.build_range(first_child + 1, right);

        let aabb = self.nodes[first_child]
            .aabb
            .merged(&self.nodes[first_child + 1].aabb);
        self.nodes[target_node_id] = BvhNode::internal(aabb, first_child as u32);
    }
}
