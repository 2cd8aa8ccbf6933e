//! Splay strategy: plain nodes, the splay-to-root walk, and the
//! [`SplayMap`] container with its expensive-insert statistic.

pub mod map;
pub mod types;
pub mod util;

pub use map::SplayMap;
pub use types::SplayNode;
pub use util::splay;
