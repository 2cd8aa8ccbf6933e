//! AVL rebalancing: height-aware rotations and the post-insert /
//! post-remove walks.
//!
//! The structural rewrites live in [`crate::rotate`]; this module wraps
//! them with height bookkeeping and decides which rewrite an unbalanced
//! ancestor needs. After an insertion a single rotation restores balance
//! everywhere, so the insert walk stops at its first rotation; after a
//! removal several ancestors can be left unbalanced independently, so the
//! remove walk always continues to the root.

use std::fmt::Debug;

use crate::error::InvariantError;
use crate::rotate::{rotate_left, rotate_left_right, rotate_right, rotate_right_left};
use crate::types::HeightedNode;
use crate::util::{assert_tree, get_l, get_p, get_r};

// ── heights ───────────────────────────────────────────────────────────────

#[inline]
fn height_of<K, V, N>(arena: &[N], i: Option<u32>) -> i32
where
    N: HeightedNode<K, V>,
{
    i.map_or(0, |i| arena[i as usize].height())
}

#[inline]
fn child_heights<K, V, N>(arena: &[N], i: u32) -> (i32, i32)
where
    N: HeightedNode<K, V>,
{
    (
        height_of(arena, get_l(arena, i)),
        height_of(arena, get_r(arena, i)),
    )
}

#[inline]
fn fix_height<K, V, N>(arena: &mut [N], i: u32)
where
    N: HeightedNode<K, V>,
{
    let (lh, rh) = child_heights(arena, i);
    arena[i as usize].set_height(1 + lh.max(rh));
}

// ── height-aware rotations ────────────────────────────────────────────────
//
// Heights are recomputed bottom-up: the demoted node first, then the
// promoted one, then the old parent of the rewritten subtree if there is
// one. Subtree roots below the rewrite keep their cached heights.

fn ll_rotate<K, V, N>(arena: &mut [N], root: Option<u32>, y: u32, z: u32) -> Option<u32>
where
    N: HeightedNode<K, V>,
{
    let root = rotate_right(arena, root, y, z);
    fix_height(arena, z);
    fix_height(arena, y);
    if let Some(p) = get_p(arena, y) {
        fix_height(arena, p);
    }
    root
}

fn rr_rotate<K, V, N>(arena: &mut [N], root: Option<u32>, y: u32, z: u32) -> Option<u32>
where
    N: HeightedNode<K, V>,
{
    let root = rotate_left(arena, root, y, z);
    fix_height(arena, z);
    fix_height(arena, y);
    if let Some(p) = get_p(arena, y) {
        fix_height(arena, p);
    }
    root
}

fn lr_rotate<K, V, N>(arena: &mut [N], root: Option<u32>, x: u32, y: u32, z: u32) -> Option<u32>
where
    N: HeightedNode<K, V>,
{
    let root = rotate_left_right(arena, root, x, y, z);
    fix_height(arena, y);
    fix_height(arena, z);
    fix_height(arena, x);
    if let Some(p) = get_p(arena, x) {
        fix_height(arena, p);
    }
    root
}

fn rl_rotate<K, V, N>(arena: &mut [N], root: Option<u32>, x: u32, y: u32, z: u32) -> Option<u32>
where
    N: HeightedNode<K, V>,
{
    let root = rotate_right_left(arena, root, x, y, z);
    fix_height(arena, y);
    fix_height(arena, z);
    fix_height(arena, x);
    if let Some(p) = get_p(arena, x) {
        fix_height(arena, p);
    }
    root
}

/// Restore balance at `z`, whose child heights differ by more than one.
///
/// `y` is the taller child of `z` and `x` the taller child of `y`; a tie at
/// `x` is broken toward the z→y side so the cheaper single rotation is
/// selected. The (z→y, y→x) direction pair names the rewrite.
fn rotate_unbalanced<K, V, N>(arena: &mut [N], root: Option<u32>, z: u32) -> Option<u32>
where
    N: HeightedNode<K, V>,
{
    let (lh, rh) = child_heights(arena, z);
    let y_is_left = lh > rh;
    let y = if y_is_left {
        get_l(arena, z)
    } else {
        get_r(arena, z)
    }
    .expect("taller side of an unbalanced node is non-empty");

    let (ylh, yrh) = child_heights(arena, y);
    let x_is_left = if ylh != yrh { ylh > yrh } else { y_is_left };

    match (y_is_left, x_is_left) {
        (true, true) => ll_rotate(arena, root, y, z),
        (false, false) => rr_rotate(arena, root, y, z),
        (true, false) => {
            let x = get_r(arena, y).expect("right child of y exists");
            lr_rotate(arena, root, x, y, z)
        }
        (false, true) => {
            let x = get_l(arena, y).expect("left child of y exists");
            rl_rotate(arena, root, x, y, z)
        }
    }
}

// ── rebalance walks ───────────────────────────────────────────────────────

/// Walk up from a freshly linked node, refreshing cached heights, and stop
/// at the first rotation — one rewrite restores balance globally after an
/// insertion.
pub fn rebalance_after_insert<K, V, N>(
    arena: &mut [N],
    mut root: Option<u32>,
    node: u32,
) -> Option<u32>
where
    N: HeightedNode<K, V>,
{
    let mut curr = node;
    while let Some(z) = get_p(arena, curr) {
        let (lh, rh) = child_heights(arena, z);
        if (lh - rh).abs() <= 1 {
            arena[z as usize].set_height(1 + lh.max(rh));
            curr = z;
        } else {
            root = rotate_unbalanced(arena, root, z);
            break;
        }
    }
    root
}

/// Walk up from the lowest node whose subtree shape changed, refreshing
/// cached heights and rotating at every unbalanced ancestor, all the way
/// to the root.
pub fn rebalance_after_remove<K, V, N>(
    arena: &mut [N],
    mut root: Option<u32>,
    node: u32,
) -> Option<u32>
where
    N: HeightedNode<K, V>,
{
    let mut curr = Some(node);
    while let Some(z) = curr {
        let (lh, rh) = child_heights(arena, z);
        let top = if (lh - rh).abs() > 1 {
            root = rotate_unbalanced(arena, root, z);
            get_p(arena, z).expect("rotation promoted a node above z")
        } else {
            arena[z as usize].set_height(1 + lh.max(rh));
            z
        };
        curr = get_p(arena, top);
    }
    root
}

// ── validation / debug ────────────────────────────────────────────────────

/// Full structural check: links, key order, cached heights, balance.
pub fn assert_avl_tree<K, V, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), InvariantError>
where
    N: HeightedNode<K, V>,
    C: Fn(&K, &K) -> i32,
{
    assert_tree(arena, root, comparator)?;

    fn validate_heights<K, V, N>(arena: &[N], node: u32) -> Result<i32, InvariantError>
    where
        N: HeightedNode<K, V>,
    {
        let lh = match get_l(arena, node) {
            Some(l) => validate_heights::<K, V, N>(arena, l)?,
            None => 0,
        };
        let rh = match get_r(arena, node) {
            Some(r) => validate_heights::<K, V, N>(arena, r)?,
            None => 0,
        };
        let computed = 1 + lh.max(rh);
        let cached = arena[node as usize].height();
        if cached != computed {
            return Err(InvariantError::HeightMismatch {
                node,
                cached,
                computed,
            });
        }
        if (lh - rh).abs() > 1 {
            return Err(InvariantError::BalanceViolated(node));
        }
        Ok(computed)
    }

    if let Some(root) = root {
        validate_heights::<K, V, N>(arena, root)?;
    }
    Ok(())
}

/// Debug printer for AVL subtrees.
pub fn print<K, V, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
    N: HeightedNode<K, V>,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print::<K, V, N>(arena, n.l(), &format!("{tab}  "));
            let right = print::<K, V, N>(arena, n.r(), &format!("{tab}  "));
            format!(
                "Node[{i}] [h={}] {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.height(),
                n.key(),
                n.value()
            )
        }
    }
}
