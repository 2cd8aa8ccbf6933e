//! AVL strategy: height-caching nodes, the rebalance walks, and the
//! [`AvlMap`] container.

pub mod map;
pub mod types;
pub mod util;

pub use map::AvlMap;
pub use types::AvlNode;
pub use util::{assert_avl_tree, rebalance_after_insert, rebalance_after_remove};
