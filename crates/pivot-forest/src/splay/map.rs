use std::fmt::Debug;

use crate::error::InvariantError;
use crate::util::{assert_tree, detach, find, find_or_next_lower, first, last, next};

use super::types::SplayNode;
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

/// Ordered map balanced amortized-style: every insert and delete splays
/// the affected node (or its neighborhood) to the root.
///
/// Plain lookups never restructure — only the write paths do. The map
/// keeps an *expensive-insert* statistic: an insertion whose pre-splay
/// depth exceeds `2·log2(n)` (n counted after the insertion, root at
/// depth 0) bumps a monotonic counter, readable via
/// [`report`](Self::report).
pub struct SplayMap<K, V, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    comparator: C,
    arena: Vec<SplayNode<K, V>>,
    root: Option<u32>,
    free: Vec<u32>,
    length: usize,
    bad_inserts: u64,
}

impl<K, V> SplayMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V> Default for SplayMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> SplayMap<K, V, C>
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
            bad_inserts: 0,
        }
    }

    fn alloc(&mut self, node: SplayNode<K, V>) -> u32 {
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

    #[inline]
    fn is_expensive(depth: u32, n: usize) -> bool {
        f64::from(depth) > 2.0 * (n as f64).log2()
    }

    /// Insert `key`, or overwrite the value of an existing entry.
    ///
    /// A new entry is linked at the leaf the descent reached, scored
    /// against the depth bound, then splayed to the root. An overwrite
    /// touches nothing else: no splay, no counters.
    pub fn set(&mut self, key: K, value: V) -> u32 {
        let Some(root) = self.root else {
            let idx = self.alloc(SplayNode::new(key, value));
            self.root = Some(idx);
            self.length = 1;
            return idx;
        };

        let mut curr = root;
        let mut depth = 0u32;
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
                Some(n) => {
                    curr = n;
                    depth += 1;
                }
                None => {
                    let idx = self.alloc(SplayNode::new(key, value));
                    if cmp < 0 {
                        self.arena[curr as usize].l = Some(idx);
                    } else {
                        self.arena[curr as usize].r = Some(idx);
                    }
                    self.arena[idx as usize].p = Some(curr);
                    self.length += 1;
                    // The new node hangs one edge below the stopping point.
                    if Self::is_expensive(depth + 1, self.length) {
                        self.bad_inserts += 1;
                    }
                    self.root = util::splay(&mut self.arena, self.root, idx);
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
    ///
    /// The lowest surviving node of the unlinked neighborhood is splayed
    /// to the root. A miss splays the last node the failed descent
    /// touched; deleting the only node leaves nothing to splay.
    pub fn del(&mut self, key: &K) -> bool {
        let Some(root) = self.root else {
            return false;
        };

        let mut curr = root;
        let found = loop {
            let cmp = (self.comparator)(key, &self.arena[curr as usize].k);
            if cmp == 0 {
                break Some(curr);
            }
            let nxt = if cmp < 0 {
                self.arena[curr as usize].l
            } else {
                self.arena[curr as usize].r
            };
            match nxt {
                Some(n) => curr = n,
                None => break None,
            }
        };

        match found {
            None => {
                self.root = util::splay(&mut self.arena, self.root, curr);
                false
            }
            Some(node) => {
                let (root, pivot) = detach(&mut self.arena, self.root, node);
                self.root = root;
                self.length -= 1;
                self.free.push(node);
                if let Some(pivot) = pivot {
                    self.root = util::splay(&mut self.arena, self.root, pivot);
                }
                true
            }
        }
    }

    /// Alias of [`del`](Self::del).
    pub fn remove(&mut self, key: &K) -> bool {
        self.del(key)
    }

    /// Cumulative count of expensive inserts.
    pub fn report(&self) -> u64 {
        self.bad_inserts
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

    pub fn node(&self, idx: u32) -> &SplayNode<K, V> {
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

    pub fn for_each<F: FnMut(u32, &SplayNode<K, V>)>(&self, mut f: F) {
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

    pub fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.root = None;
        self.length = 0;
    }

    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        assert_tree(&self.arena, self.root, &self.comparator)
    }

    pub fn print(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        util::print(&self.arena, self.root, "")
    }
}
