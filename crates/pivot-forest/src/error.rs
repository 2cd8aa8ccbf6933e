use thiserror::Error;

/// Structural defects reported by the tree validators.
///
/// These never surface from the operational API; the validators exist for
/// tests and debugging, and each variant carries the arena index of the
/// offending node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("root node {0} has a parent")]
    RootHasParent(u32),
    #[error("child {child} of node {node} does not point back to it")]
    BrokenParentLink { node: u32, child: u32 },
    #[error("node {node} caches height {cached} but its subtrees give {computed}")]
    HeightMismatch { node: u32, cached: i32, computed: i32 },
    #[error("child heights at node {0} differ by more than one")]
    BalanceViolated(u32),
    #[error("key order violated between nodes {prev} and {node}")]
    OrderViolated { prev: u32, node: u32 },
}
