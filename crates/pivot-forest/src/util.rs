//! Shared unbalanced-BST foundation.
//!
//! In-order traversal, keyed search, and the low-level removal relinking
//! used by both balancing strategies. Nothing here rebalances; the AVL and
//! splay walks start from the positions these functions report.

use crate::error::InvariantError;
use crate::types::{KvNode, Node};

// ── arena accessors ───────────────────────────────────────────────────────

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Repoint the `parent` slot that held `old` at `new`, or report `new` as
/// the tree root when there is no parent.
#[inline]
pub(crate) fn relink<N: Node>(
    arena: &mut [N],
    root: Option<u32>,
    parent: Option<u32>,
    old: u32,
    new: Option<u32>,
) -> Option<u32> {
    match parent {
        Some(p) => {
            if get_l(arena, p) == Some(old) {
                set_l(arena, p, new);
            } else {
                set_r(arena, p, new);
            }
            root
        }
        None => new,
    }
}

// ── traversal ─────────────────────────────────────────────────────────────

/// Leftmost (smallest-keyed) node.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_l(arena, idx) {
            Some(l) => curr = Some(l),
            None => return Some(idx),
        }
    }
    curr
}

/// Rightmost (largest-keyed) node.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_r(arena, idx) {
            Some(r) => curr = Some(r),
            None => return Some(idx),
        }
    }
    curr
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, node) {
        let mut curr = r;
        while let Some(l) = get_l(arena, curr) {
            curr = l;
        }
        return Some(curr);
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, node) {
        let mut curr = l;
        while let Some(r) = get_r(arena, curr) {
            curr = r;
        }
        return Some(curr);
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

// ── search ────────────────────────────────────────────────────────────────

/// Find a node by key.
pub fn find<K, V, N, C>(arena: &[N], root: Option<u32>, key: &K, comparator: &C) -> Option<u32>
where
    N: KvNode<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let cmp = comparator(key, arena[i as usize].key());
        if cmp == 0 {
            return Some(i);
        }
        curr = if cmp < 0 {
            get_l(arena, i)
        } else {
            get_r(arena, i)
        };
    }
    None
}

/// Find a node by key, or the next lower node when the key is absent.
pub fn find_or_next_lower<K, V, N, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    comparator: &C,
) -> Option<u32>
where
    N: KvNode<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    let mut result: Option<u32> = None;
    while let Some(i) = curr {
        let cmp = comparator(arena[i as usize].key(), key);
        if cmp == 0 {
            return Some(i);
        }
        if cmp > 0 {
            curr = get_l(arena, i);
        } else {
            result = Some(i);
            curr = get_r(arena, i);
        }
    }
    result
}

// ── removal relinking ─────────────────────────────────────────────────────

/// Unlink `node` from the tree rooted at `root` without rebalancing.
///
/// A leaf is unlinked from its parent; a single child is promoted into the
/// node's slot; with two children the in-order successor is spliced out of
/// its own position and takes the node's place, keeping node identities
/// intact. The removed node's links are cleared.
///
/// Returns `(new_root, pivot)` where `pivot` is the lowest node whose
/// subtree shape changed: the old parent, or — in the two-children case —
/// the successor itself when it was the node's right child, otherwise the
/// successor's former parent. `pivot` is `None` exactly when nothing
/// remains above the removal site (the tree emptied or a child was promoted
/// to root), so both rebalancers can start their walk from it directly.
pub fn detach<N: Node>(arena: &mut [N], root: Option<u32>, node: u32) -> (Option<u32>, Option<u32>) {
    let p = get_p(arena, node);
    let l = get_l(arena, node);
    let r = get_r(arena, node);
    set_p(arena, node, None);
    set_l(arena, node, None);
    set_r(arena, node, None);

    match (l, r) {
        (None, None) => {
            let root = relink(arena, root, p, node, None);
            (root, p)
        }
        (Some(l), Some(r)) => {
            let mut succ = r;
            while let Some(sl) = get_l(arena, succ) {
                succ = sl;
            }

            let pivot = if succ == r {
                // The right child is the successor; it keeps its own right
                // subtree and only adopts the left one.
                set_l(arena, succ, Some(l));
                set_p(arena, l, Some(succ));
                succ
            } else {
                let sp = get_p(arena, succ).expect("successor below the right child has a parent");
                let sr = get_r(arena, succ);
                set_l(arena, sp, sr);
                if let Some(sr) = sr {
                    set_p(arena, sr, Some(sp));
                }
                set_l(arena, succ, Some(l));
                set_p(arena, l, Some(succ));
                set_r(arena, succ, Some(r));
                set_p(arena, r, Some(succ));
                sp
            };

            set_p(arena, succ, p);
            let root = relink(arena, root, p, node, Some(succ));
            (root, Some(pivot))
        }
        _ => {
            let child = l.or(r).unwrap();
            set_p(arena, child, p);
            let root = relink(arena, root, p, node, Some(child));
            (root, p)
        }
    }
}

// ── validation ────────────────────────────────────────────────────────────

/// Check parent/child link consistency and in-order key ordering.
pub fn assert_tree<K, V, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), InvariantError>
where
    N: KvNode<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    if arena[root as usize].p().is_some() {
        return Err(InvariantError::RootHasParent(root));
    }

    fn validate_links<K, V, N>(arena: &[N], node: u32) -> Result<(), InvariantError>
    where
        N: KvNode<K, V>,
    {
        for child in [get_l(arena, node), get_r(arena, node)].into_iter().flatten() {
            if get_p(arena, child) != Some(node) {
                return Err(InvariantError::BrokenParentLink { node, child });
            }
            validate_links::<K, V, N>(arena, child)?;
        }
        Ok(())
    }

    validate_links::<K, V, N>(arena, root)?;

    let mut prev_node: Option<u32> = None;
    let mut curr = first(arena, Some(root));
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            let cmp = comparator(arena[prev as usize].key(), arena[i as usize].key());
            if cmp >= 0 {
                return Err(InvariantError::OrderViolated { prev, node: i });
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal keyed node for exercising the foundation on its own.
    #[derive(Debug, Clone, Default)]
    struct N {
        k: u64,
        v: (),
        p: Option<u32>,
        l: Option<u32>,
        r: Option<u32>,
    }

    impl Node for N {
        fn p(&self) -> Option<u32> {
            self.p
        }
        fn l(&self) -> Option<u32> {
            self.l
        }
        fn r(&self) -> Option<u32> {
            self.r
        }
        fn set_p(&mut self, v: Option<u32>) {
            self.p = v;
        }
        fn set_l(&mut self, v: Option<u32>) {
            self.l = v;
        }
        fn set_r(&mut self, v: Option<u32>) {
            self.r = v;
        }
    }

    impl KvNode<u64, ()> for N {
        fn key(&self) -> &u64 {
            &self.k
        }
        fn value(&self) -> &() {
            &self.v
        }
        fn value_mut(&mut self) -> &mut () {
            &mut self.v
        }
        fn set_key(&mut self, key: u64) {
            self.k = key;
        }
        fn set_value(&mut self, _value: ()) {}
    }

    fn cmp(a: &u64, b: &u64) -> i32 {
        if a == b {
            0
        } else if a < b {
            -1
        } else {
            1
        }
    }

    fn node(k: u64) -> N {
        N {
            k,
            ..Default::default()
        }
    }

    /// Plain BST insert, no balancing.
    fn bst_insert(arena: &mut Vec<N>, root: Option<u32>, k: u64) -> Option<u32> {
        arena.push(node(k));
        let idx = (arena.len() - 1) as u32;
        let Some(mut curr) = root else {
            return Some(idx);
        };
        loop {
            let next = if k < arena[curr as usize].k {
                arena[curr as usize].l
            } else {
                arena[curr as usize].r
            };
            match next {
                Some(n) => curr = n,
                None => {
                    if k < arena[curr as usize].k {
                        set_l(arena, curr, Some(idx));
                    } else {
                        set_r(arena, curr, Some(idx));
                    }
                    set_p(arena, idx, Some(curr));
                    return root;
                }
            }
        }
    }

    fn build(keys: &[u64]) -> (Vec<N>, Option<u32>) {
        let mut arena = Vec::new();
        let mut root = None;
        for &k in keys {
            root = bst_insert(&mut arena, root, k);
        }
        (arena, root)
    }

    fn inorder(arena: &[N], root: Option<u32>) -> Vec<u64> {
        let mut out = Vec::new();
        let mut curr = first(arena, root);
        while let Some(i) = curr {
            out.push(arena[i as usize].k);
            curr = next(arena, i);
        }
        out
    }

    #[test]
    fn traversal_visits_keys_in_order() {
        let (arena, root) = build(&[5, 2, 8, 1, 4, 9]);
        assert_eq!(inorder(&arena, root), vec![1, 2, 4, 5, 8, 9]);
        assert_eq!(last(&arena, root).map(|i| arena[i as usize].k), Some(9));
        let l = last(&arena, root).unwrap();
        assert_eq!(prev(&arena, l).map(|i| arena[i as usize].k), Some(8));
        assert_tree(&arena, root, &cmp).unwrap();
    }

    #[test]
    fn find_hits_and_misses() {
        let (arena, root) = build(&[5, 2, 8]);
        assert_eq!(find(&arena, root, &8, &cmp).map(|i| arena[i as usize].k), Some(8));
        assert_eq!(find(&arena, root, &7, &cmp), None);
        assert_eq!(
            find_or_next_lower(&arena, root, &7, &cmp).map(|i| arena[i as usize].k),
            Some(5)
        );
        assert_eq!(find_or_next_lower(&arena, root, &1, &cmp), None);
    }

    #[test]
    fn detach_leaf_reports_parent() {
        let (mut arena, root) = build(&[5, 2, 8]);
        let leaf = find(&arena, root, &2, &cmp).unwrap();
        let (root, pivot) = detach(&mut arena, root, leaf);
        assert_eq!(pivot.map(|i| arena[i as usize].k), Some(5));
        assert_eq!(inorder(&arena, root), vec![5, 8]);
    }

    #[test]
    fn detach_single_child_promotes_it() {
        let (mut arena, root) = build(&[5, 2, 1]);
        let mid = find(&arena, root, &2, &cmp).unwrap();
        let (root, pivot) = detach(&mut arena, root, mid);
        assert_eq!(pivot.map(|i| arena[i as usize].k), Some(5));
        assert_eq!(inorder(&arena, root), vec![1, 5]);
        assert_tree(&arena, root, &cmp).unwrap();
    }

    #[test]
    fn detach_two_children_splices_successor() {
        // 5's successor (6) sits below its right child; the successor's old
        // parent is the pivot.
        let (mut arena, root) = build(&[5, 2, 8, 6, 9, 7]);
        let n5 = find(&arena, root, &5, &cmp).unwrap();
        let (root, pivot) = detach(&mut arena, root, n5);
        assert_eq!(pivot.map(|i| arena[i as usize].k), Some(8));
        assert_eq!(inorder(&arena, root), vec![2, 6, 7, 8, 9]);
        assert_eq!(root.map(|i| arena[i as usize].k), Some(6));
        assert_tree(&arena, root, &cmp).unwrap();
    }

    #[test]
    fn detach_two_children_direct_right_successor() {
        let (mut arena, root) = build(&[5, 2, 8, 9]);
        let n5 = find(&arena, root, &5, &cmp).unwrap();
        let (root, pivot) = detach(&mut arena, root, n5);
        assert_eq!(pivot.map(|i| arena[i as usize].k), Some(8));
        assert_eq!(root.map(|i| arena[i as usize].k), Some(8));
        assert_eq!(inorder(&arena, root), vec![2, 8, 9]);
        assert_tree(&arena, root, &cmp).unwrap();
    }

    #[test]
    fn detach_last_node_empties_tree() {
        let (mut arena, root) = build(&[5]);
        let (root, pivot) = detach(&mut arena, root, root.unwrap());
        assert_eq!(root, None);
        assert_eq!(pivot, None);
    }
}
