pub use bvh_traverse::BvhLeafCost;
pub use bvh_tree::{Bvh, BvhNode};

mod bvh_queries;
mod bvh_traverse;
mod bvh_tree;
