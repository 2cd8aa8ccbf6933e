//! Node trait definitions.
//!
//! Every tree in this crate is a graph of nodes living in a caller-owned
//! `Vec`-backed arena; each "pointer" (parent, left child, right child) is
//! an `Option<u32>` index into that arena. Tree-manipulation functions take
//! the arena as a slice and work with indices, so a node's handle stays
//! stable for the lifetime of its entry.

/// Structural links (`p`, `l`, `r`) of an arena node.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Three-way comparator used by the map types.
pub type Comparator<K> = dyn Fn(&K, &K) -> i32;

/// Key/value access on top of the structural links.
///
/// Trait methods rather than direct field access so the shared search and
/// validation helpers work over any arena-indexed node layout.
pub trait KvNode<K, V>: Node {
    fn key(&self) -> &K;
    fn value(&self) -> &V;
    fn value_mut(&mut self) -> &mut V;
    fn set_key(&mut self, key: K);
    fn set_value(&mut self, value: V);
}

/// Height-augmented node behavior for the AVL strategy.
///
/// The cached height is `1 + max(child heights)`, a leaf has height 1, an
/// absent child contributes 0. The AVL walks keep the cache exact after
/// every insert and removal.
pub trait HeightedNode<K, V>: KvNode<K, V> {
    fn height(&self) -> i32;
    fn set_height(&mut self, height: i32);
}
