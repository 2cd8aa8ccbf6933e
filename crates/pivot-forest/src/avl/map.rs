use std::fmt::Debug;

use crate::error::InvariantError;
use crate::util::{detach, find, find_or_next_lower, first, last, next};

use super::types::AvlNode;
use super::util;

fn default_comparator<K: PartialOrd>(a: &K, b: &K) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}

/// Ordered map kept strictly height-balanced.
///
/// Nodes live in an arena owned by the map; vacated slots are recycled
/// through a free list, and an entry's `u32` index stays stable until the
/// entry is deleted. Every insert and delete leaves the tree AVL-balanced
/// before returning.
pub struct AvlMap<K, V, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    comparator: C,
    arena: Vec<AvlNode<K, V>>,
    root: Option<u32>,
    free: Vec<u32>,
    length: usize,
}

impl<K, V> AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V> Default for AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            comparator,
            arena: Vec::new(),
            root: None,
            free: Vec::new(),
            length: 0,
        }
    }

    fn alloc(&mut self, node: AvlNode<K, V>) -> u32 {
        match self.free.pop() {
            Some(i) => {
                self.arena[i as usize] = node;
                i
            }
            None => {
                self.arena.push(node);
                (self.arena.len() - 1) as u32
            }
        }
    }

    /// Insert `key`, or overwrite the value of an existing entry.
    ///
    /// Returns the entry's arena index. A plain overwrite changes no
    /// structure; a new entry is linked at the leaf the descent reached
    /// and the rebalance walk runs from it.
    pub fn set(&mut self, key: K, value: V) -> u32 {
        let Some(root) = self.root else {
            let idx = self.alloc(AvlNode::new(key, value));
            self.root = Some(idx);
            self.length = 1;
            return idx;
        };

        let mut curr = root;
        loop {
            let cmp = (self.comparator)(&key, &self.arena[curr as usize].k);
            if cmp == 0 {
                self.arena[curr as usize].v = value;
                return curr;
            }
            let nxt = if cmp < 0 {
                self.arena[curr as usize].l
            } else {
                self.arena[curr as usize].r
            };
            match nxt {
                Some(n) => curr = n,
                None => {
                    let idx = self.alloc(AvlNode::new(key, value));
                    if cmp < 0 {
                        self.arena[curr as usize].l = Some(idx);
                    } else {
                        self.arena[curr as usize].r = Some(idx);
                    }
                    self.arena[idx as usize].p = Some(curr);
                    self.length += 1;
                    self.root = util::rebalance_after_insert(&mut self.arena, self.root, idx);
                    return idx;
                }
            }
        }
    }

    /// Alias of [`set`](Self::set).
    pub fn insert(&mut self, key: K, value: V) -> u32 {
        self.set(key, value)
    }

    /// Delete the entry for `key`, if any.
    pub fn del(&mut self, key: &K) -> bool {
        let Some(node) = find(&self.arena, self.root, key, &self.comparator) else {
            return false;
        };
        let (root, pivot) = detach(&mut self.arena, self.root, node);
        self.root = root;
        self.length -= 1;
        self.free.push(node);
        if let Some(pivot) = pivot {
            self.root = util::rebalance_after_remove(&mut self.arena, self.root, pivot);
        }
        true
    }

    /// Alias of [`del`](Self::del).
    pub fn remove(&mut self, key: &K) -> bool {
        self.del(key)
    }

    pub fn find(&self, key: &K) -> Option<u32> {
        find(&self.arena, self.root, key, &self.comparator)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|i| &self.arena[i as usize].v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find(key)?;
        Some(&mut self.arena[idx as usize].v)
    }

    pub fn has(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    pub fn get_or_next_lower(&self, key: &K) -> Option<u32> {
        find_or_next_lower(&self.arena, self.root, key, &self.comparator)
    }

    pub fn root(&self) -> Option<u32> {
        self.root
    }

    pub fn node(&self, idx: u32) -> &AvlNode<K, V> {
        &self.arena[idx as usize]
    }

    pub fn key(&self, idx: u32) -> &K {
        &self.arena[idx as usize].k
    }

    pub fn value(&self, idx: u32) -> &V {
        &self.arena[idx as usize].v
    }

    pub fn value_mut(&mut self, idx: u32) -> &mut V {
        &mut self.arena[idx as usize].v
    }

    pub fn first(&self) -> Option<u32> {
        first(&self.arena, self.root)
    }

    pub fn last(&self) -> Option<u32> {
        last(&self.arena, self.root)
    }

    pub fn next(&self, curr: u32) -> Option<u32> {
        next(&self.arena, curr)
    }

    /// Arena indices in ascending key order.
    pub fn iterator(&self) -> impl Iterator<Item = u32> + '_ {
        let mut curr = self.first();
        std::iter::from_fn(move || {
            let i = curr?;
            curr = next(&self.arena, i);
            Some(i)
        })
    }

    /// `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.iterator().map(|i| {
            let n = &self.arena[i as usize];
            (&n.k, &n.v)
        })
    }

    pub fn for_each<F: FnMut(u32, &AvlNode<K, V>)>(&self, mut f: F) {
        let mut curr = self.first();
        while let Some(i) = curr {
            f(i, &self.arena[i as usize]);
            curr = next(&self.arena, i);
        }
    }

    pub fn size(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Cached height of the whole tree (0 when empty).
    pub fn height(&self) -> i32 {
        self.root.map_or(0, |i| self.arena[i as usize].height)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.root = None;
        self.length = 0;
    }

    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        util::assert_avl_tree(&self.arena, self.root, &self.comparator)
    }

    pub fn print(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        util::print(&self.arena, self.root, "")
    }
}
