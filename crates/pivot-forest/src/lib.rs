//! Arena-based ordered maps over self-balancing binary search trees.
//!
//! Two balancing strategies share one foundation:
//!
//! - [`AvlMap`] — strict height balance; every insert/delete leaves each
//!   node's child heights within one of each other, maintained by a walk
//!   from the change site toward the root with at most one rotation per
//!   unbalanced ancestor.
//! - [`SplayMap`] — amortized balance; every insert/delete splays the
//!   affected node to the root (zig / zig-zig / zig-zag) and tracks how
//!   many insertions landed deeper than `2·log2(n)`.
//!
//! Instead of raw pointers, all node links (`p` / `l` / `r`) are
//! `Option<u32>` indices into a map-owned `Vec` arena, so parent links can
//! exist without ownership cycles and handles stay stable across
//! restructuring.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Node`], [`KvNode`], [`HeightedNode`] traits |
//! | [`util`] | in-order traversal, keyed search, removal relinking |
//! | [`rotate`] | structural rewrites shared by both strategies |
//! | [`avl`] | height bookkeeping, rebalance walks, [`AvlMap`] |
//! | [`splay`] | splay walk, depth statistic, [`SplayMap`] |
//! | [`error`] | [`InvariantError`] for the validators |

pub mod avl;
pub mod error;
pub mod rotate;
pub mod splay;
pub mod types;
pub mod util;

pub use avl::{AvlMap, AvlNode};
pub use error::InvariantError;
pub use splay::{splay, SplayMap, SplayNode};
pub use types::{Comparator, HeightedNode, KvNode, Node};
pub use util::{detach, find, find_or_next_lower, first, last, next, prev};
