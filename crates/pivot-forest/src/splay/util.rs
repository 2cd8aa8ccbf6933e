//! The splay walk: promote an accessed node to the root one case at a
//! time.
//!
//! - **zig** — the node's parent is the root: one single rotation.
//! - **zig-zig** — node and parent are same-side children: single-rotate
//!   the parent over the grandparent first, then the node over the parent.
//! - **zig-zag** — opposite-side children: one fused double rewrite, which
//!   already lands the node in the grandparent's slot.
//!
//! The zig-zig step rotates the grandparent edge before the parent edge;
//! all rewrites come from [`crate::rotate`].

use std::fmt::Debug;

use crate::rotate::{rotate_left, rotate_left_right, rotate_right, rotate_right_left};
use crate::types::{KvNode, Node};
use crate::util::{get_l, get_p};

/// Splay `node` to the root of its tree; returns the new root (`node`
/// itself, unless it was already the root).
pub fn splay<N: Node>(arena: &mut [N], root: Option<u32>, node: u32) -> Option<u32> {
    let Some(p) = get_p(arena, node) else {
        return root;
    };
    let pp = get_p(arena, p);
    let node_is_left = get_l(arena, p) == Some(node);

    let root = match pp {
        None => {
            if node_is_left {
                rotate_right(arena, root, node, p)
            } else {
                rotate_left(arena, root, node, p)
            }
        }
        Some(g) => {
            let parent_is_left = get_l(arena, g) == Some(p);
            match (parent_is_left, node_is_left) {
                (true, true) => {
                    let root = rotate_right(arena, root, p, g);
                    rotate_right(arena, root, node, p)
                }
                (false, false) => {
                    let root = rotate_left(arena, root, p, g);
                    rotate_left(arena, root, node, p)
                }
                (true, false) => rotate_left_right(arena, root, node, p, g),
                (false, true) => rotate_right_left(arena, root, node, p, g),
            }
        }
    };
    splay(arena, root, node)
}

/// Debug printer for splay subtrees.
pub fn print<K, V, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
    N: KvNode<K, V>,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print::<K, V, N>(arena, n.l(), &format!("{tab}  "));
            let right = print::<K, V, N>(arena, n.r(), &format!("{tab}  "));
            format!(
                "Node[{i}] {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.key(),
                n.value()
            )
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splay::types::SplayNode;
    use crate::util::{assert_tree, first, next};

    fn cmp(a: &u64, b: &u64) -> i32 {
        if a == b {
            0
        } else if a < b {
            -1
        } else {
            1
        }
    }

    fn bst_insert(arena: &mut Vec<SplayNode<u64, ()>>, root: Option<u32>, k: u64) -> Option<u32> {
        arena.push(SplayNode::new(k, ()));
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
                        arena[curr as usize].l = Some(idx);
                    } else {
                        arena[curr as usize].r = Some(idx);
                    }
                    arena[idx as usize].p = Some(curr);
                    return root;
                }
            }
        }
    }

    fn build(keys: &[u64]) -> (Vec<SplayNode<u64, ()>>, Option<u32>) {
        let mut arena = Vec::new();
        let mut root = None;
        for &k in keys {
            root = bst_insert(&mut arena, root, k);
        }
        (arena, root)
    }

    fn inorder(arena: &[SplayNode<u64, ()>], root: Option<u32>) -> Vec<u64> {
        let mut out = Vec::new();
        let mut curr = first(arena, root);
        while let Some(i) = curr {
            out.push(arena[i as usize].k);
            curr = next(arena, i);
        }
        out
    }

    #[test]
    fn zig_promotes_child_of_root() {
        let (mut arena, root) = build(&[2, 1]);
        let n1 = 1; // index of key 1
        let root = splay(&mut arena, root, n1);
        assert_eq!(root, Some(n1));
        assert!(arena[n1 as usize].p.is_none());
        assert_eq!(inorder(&arena, root), vec![1, 2]);
    }

    #[test]
    fn zig_zig_keeps_search_order() {
        // Left spine 5-4-3-2-1; splaying the deepest node exercises
        // repeated zig-zig steps.
        let (mut arena, root) = build(&[5, 4, 3, 2, 1]);
        let deepest = 4; // index of key 1
        let root = splay(&mut arena, root, deepest);
        assert_eq!(root, Some(deepest));
        assert_eq!(inorder(&arena, root), vec![1, 2, 3, 4, 5]);
        assert_tree(&arena, root, &cmp).unwrap();
    }

    #[test]
    fn zig_zig_rotates_grandparent_edge_first() {
        // Splaying 1 out of the spine 3-2-1 must produce the canonical
        // zig-zig shape: 1 on top with 2 as its right child and 3 below 2,
        // not the shallow tree move-to-root would give.
        let (mut arena, root) = build(&[3, 2, 1]);
        let root = splay(&mut arena, root, 2);
        assert_eq!(root, Some(2));
        let one = 2u32;
        let two = 1u32;
        let three = 0u32;
        assert_eq!(arena[one as usize].r, Some(two));
        assert_eq!(arena[two as usize].r, Some(three));
        assert_eq!(arena[two as usize].l, None);
        assert_tree(&arena, root, &cmp).unwrap();
    }

    #[test]
    fn zig_zag_lands_node_two_levels_up() {
        // 3 is the right child of 1, which is the left child of 4.
        let (mut arena, root) = build(&[4, 1, 3, 5]);
        let n3 = 2; // index of key 3
        let root = splay(&mut arena, root, n3);
        assert_eq!(root, Some(n3));
        assert_eq!(inorder(&arena, root), vec![1, 3, 4, 5]);
        assert_tree(&arena, root, &cmp).unwrap();
    }

    #[test]
    fn splaying_the_root_is_a_no_op() {
        let (mut arena, root) = build(&[2, 1, 3]);
        let before = inorder(&arena, root);
        let root2 = splay(&mut arena, root, root.unwrap());
        assert_eq!(root2, root);
        assert_eq!(inorder(&arena, root2), before);
    }
}
