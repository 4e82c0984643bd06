//! Unbalanced binary search tree with comparison accounting.

use super::arena::{Node, NodeArena, NodeId};
use std::borrow::Borrow;
use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;

/// Ordered map from a unique key to a value.
///
/// The comparison counter is an instrumentation side channel: it lives in a
/// `Cell` so read paths can count through `&self`, and it accumulates until
/// [`reset_metrics`](Self::reset_metrics) is called.
pub struct OrderedIndex<K, V> {
    arena: NodeArena<K, V>,
    root: Option<NodeId>,
    comparisons: Cell<u64>,
}

impl<K, V> OrderedIndex<K, V> {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            root: None,
            comparisons: Cell::new(0),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Key comparisons performed since the last reset.
    #[inline]
    pub fn comparisons(&self) -> u64 {
        self.comparisons.get()
    }

    /// Zeroes the comparison counter.
    #[inline]
    pub fn reset_metrics(&self) {
        self.comparisons.set(0);
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty).
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = self.arena.node(id);
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }
        deepest
    }

    /// In-order iterator over all entries. Does not count comparisons.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            arena: &self.arena,
            stack: Vec::new(),
            remaining: self.len(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Redirects the link from `parent` that pointed at `old` to `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let node = self.arena.node_mut(parent);
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            }
        }
    }
}

impl<K: Ord, V> OrderedIndex<K, V> {
    /// Compares a lookup key against a stored key, counting the comparison.
    #[inline]
    fn compare<Q>(&self, target: &Q, stored: &K) -> Ordering
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.comparisons.set(self.comparisons.get() + 1);
        target.cmp(stored.borrow())
    }

    /// Descends from the root to the node holding `key`.
    /// Returns the node (if found) and the last node visited above it.
    fn locate<Q>(&self, key: &Q) -> (Option<NodeId>, Option<NodeId>)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut parent = None;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.arena.node(id);
            match self.compare(key, &node.key) {
                Ordering::Less => cursor = node.left,
                Ordering::Greater => cursor = node.right,
                Ordering::Equal => return (Some(id), parent),
            }
            parent = Some(id);
        }
        (None, parent)
    }

    /// Shared lookup.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (found, _) = self.locate(key);
        found.map(|id| &self.arena.node(id).value)
    }

    /// Lookup returning the stored value for in-place mutation.
    pub fn find<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.locate(key).0?;
        Some(&mut self.arena.node_mut(id).value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(key).0.is_some()
    }

    /// Inserts an entry. An existing entry for the same key has its value
    /// replaced and the previous value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut parent: Option<(NodeId, Ordering)> = None;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.arena.node(id);
            let ord = self.compare(&key, &node.key);
            cursor = match ord {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => {
                    let slot = &mut self.arena.node_mut(id).value;
                    return Some(std::mem::replace(slot, value));
                }
            };
            parent = Some((id, ord));
        }

        let id = self.arena.allocate(Node::leaf(key, value));
        match parent {
            None => self.root = Some(id),
            Some((parent, Ordering::Less)) => self.arena.node_mut(parent).left = Some(id),
            Some((parent, _)) => self.arena.node_mut(parent).right = Some(id),
        }
        None
    }

    /// Removes the entry for `key`, returning its value. No-op when absent.
    ///
    /// A node with two children takes over the entry of its in-order
    /// successor, and the successor's slot is released instead.
    pub fn erase<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (found, parent) = self.locate(key);
        let target = found?;
        let (left, right) = {
            let node = self.arena.node(target);
            (node.left, node.right)
        };

        match (left, right) {
            (None, child) | (child, None) => {
                self.replace_child(parent, target, child);
                Some(self.arena.release(target).value)
            }
            (Some(_), Some(right)) => {
                let mut successor_parent = target;
                let mut successor = right;
                while let Some(next) = self.arena.node(successor).left {
                    successor_parent = successor;
                    successor = next;
                }
                let successor_right = self.arena.node(successor).right;
                self.replace_child(Some(successor_parent), successor, successor_right);

                let Node { key, value, .. } = self.arena.release(successor);
                let node = self.arena.node_mut(target);
                node.key = key;
                Some(std::mem::replace(&mut node.value, value))
            }
        }
    }

    /// Slots of every entry with `lo <= key <= hi` (or `lo <= key` when
    /// `hi` is `None`), ascending.
    ///
    /// Subtrees entirely below `lo` are skipped on the way down, and the walk
    /// stops at the first entry above `hi`.
    fn collect_range<Q>(&self, lo: &Q, hi: Option<&Q>) -> Vec<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut matched = Vec::new();
        let mut pending = Vec::new();
        let mut cursor = self.root;
        loop {
            while let Some(id) = cursor {
                let node = self.arena.node(id);
                if self.compare(lo, &node.key) == Ordering::Greater {
                    cursor = node.right;
                } else {
                    pending.push(id);
                    cursor = node.left;
                }
            }
            let Some(id) = pending.pop() else {
                break;
            };
            let node = self.arena.node(id);
            if let Some(hi) = hi {
                if self.compare(hi, &node.key) == Ordering::Less {
                    break;
                }
            }
            matched.push(id);
            cursor = node.right;
        }
        matched
    }

    /// Visits every entry with `lo <= key <= hi` in ascending key order.
    pub fn range_apply<Q, F>(&self, lo: &Q, hi: &Q, mut visit: F)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        F: FnMut(&K, &V),
    {
        for id in self.collect_range(lo, Some(hi)) {
            let node = self.arena.node(id);
            visit(&node.key, &node.value);
        }
    }

    /// Visits every entry with `lo <= key` in ascending key order.
    pub fn range_from_apply<Q, F>(&self, lo: &Q, mut visit: F)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        F: FnMut(&K, &V),
    {
        for id in self.collect_range(lo, None) {
            let node = self.arena.node(id);
            visit(&node.key, &node.value);
        }
    }

    /// Like [`range_apply`](Self::range_apply), with mutable access to values.
    pub fn range_apply_mut<Q, F>(&mut self, lo: &Q, hi: &Q, mut visit: F)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        F: FnMut(&K, &mut V),
    {
        for id in self.collect_range(lo, Some(hi)) {
            let node = self.arena.node_mut(id);
            visit(&node.key, &mut node.value);
        }
    }
}

impl<K, V> Default for OrderedIndex<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedIndex<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// In-order iterator over an [`OrderedIndex`].
pub struct Iter<'a, K, V> {
    arena: &'a NodeArena<K, V>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<K, V> Iter<'_, K, V> {
    fn push_left_spine(&mut self, mut cursor: Option<NodeId>) {
        while let Some(id) = cursor {
            self.stack.push(id);
            cursor = self.arena.node(id).left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let arena = self.arena;
        let node = arena.node(id);
        self.push_left_spine(node.right);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds the five-node tree drawn in the module docs.
    fn sample() -> OrderedIndex<i32, &'static str> {
        let mut index = OrderedIndex::new();
        for (key, value) in [(50, "e"), (30, "c"), (70, "g"), (20, "b"), (40, "d")] {
            index.insert(key, value);
        }
        index
    }

    fn keys<V>(index: &OrderedIndex<i32, V>) -> Vec<i32> {
        index.iter().map(|(k, _)| *k).collect()
    }

    fn range_keys(index: &OrderedIndex<i32, &'static str>, lo: i32, hi: i32) -> Vec<i32> {
        let mut out = Vec::new();
        index.range_apply(&lo, &hi, |k, _| out.push(*k));
        out
    }

    #[test]
    fn test_empty_index() {
        let index: OrderedIndex<i32, i32> = OrderedIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.height(), 0);
        assert_eq!(index.get(&1), None);
        assert_eq!(index.comparisons(), 0);
    }

    #[test]
    fn test_insert_and_get() {
        let index = sample();
        assert_eq!(index.len(), 5);
        assert_eq!(index.get(&40), Some(&"d"));
        assert_eq!(index.get(&70), Some(&"g"));
        assert_eq!(index.get(&45), None);
        assert!(index.contains_key(&20));
        assert!(!index.contains_key(&21));
    }

    #[test]
    fn test_insert_existing_key_replaces_value() {
        let mut index = sample();
        assert_eq!(index.insert(30, "C"), Some("c"));
        assert_eq!(index.len(), 5);
        assert_eq!(index.get(&30), Some(&"C"));
    }

    #[test]
    fn test_find_allows_in_place_edit() {
        let mut index: OrderedIndex<String, Vec<u32>> = OrderedIndex::new();
        index.insert("smith".to_string(), vec![1]);
        index.find("smith").unwrap().push(7);
        assert_eq!(index.get("smith"), Some(&vec![1, 7]));
        assert!(index.find("jones").is_none());
    }

    #[test]
    fn test_find_comparison_count() {
        let index = sample();

        index.reset_metrics();
        index.get(&40);
        // 50 -> 30 -> 40
        assert_eq!(index.comparisons(), 3);

        index.reset_metrics();
        index.get(&50);
        assert_eq!(index.comparisons(), 1);

        index.reset_metrics();
        index.get(&45);
        // 50 -> 30 -> 40, then falls off the right of 40
        assert_eq!(index.comparisons(), 3);
    }

    #[test]
    fn test_comparisons_accumulate_until_reset() {
        let index = sample();
        index.reset_metrics();
        index.get(&40);
        index.get(&40);
        assert_eq!(index.comparisons(), 6);
        index.reset_metrics();
        assert_eq!(index.comparisons(), 0);
    }

    #[test]
    fn test_iter_is_sorted() {
        let index = sample();
        assert_eq!(keys(&index), vec![20, 30, 40, 50, 70]);
        assert_eq!(index.iter().len(), 5);
    }

    #[test]
    fn test_erase_leaf() {
        let mut index = sample();
        assert_eq!(index.erase(&20), Some("b"));
        assert_eq!(keys(&index), vec![30, 40, 50, 70]);
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_erase_node_with_one_child() {
        let mut index = sample();
        index.insert(80, "h");
        assert_eq!(index.erase(&70), Some("g"));
        assert_eq!(keys(&index), vec![20, 30, 40, 50, 80]);
        assert_eq!(index.get(&80), Some(&"h"));
    }

    #[test]
    fn test_erase_node_with_two_children() {
        let mut index = sample();
        assert_eq!(index.erase(&30), Some("c"));
        assert_eq!(keys(&index), vec![20, 40, 50, 70]);
        assert_eq!(index.get(&20), Some(&"b"));
        assert_eq!(index.get(&40), Some(&"d"));
    }

    #[test]
    fn test_erase_root_with_deep_successor() {
        let mut index = sample();
        index.insert(60, "f");
        index.insert(65, "f2");
        assert_eq!(index.erase(&50), Some("e"));
        assert_eq!(keys(&index), vec![20, 30, 40, 60, 65, 70]);
        for key in [20, 30, 40, 60, 65, 70] {
            assert!(index.contains_key(&key), "missing {key}");
        }
    }

    #[test]
    fn test_erase_absent_is_noop() {
        let mut index = sample();
        assert_eq!(index.erase(&99), None);
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn test_erase_everything() {
        let mut index = sample();
        for key in [50, 20, 70, 40, 30] {
            assert!(index.erase(&key).is_some());
        }
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        index.insert(1, "z");
        assert_eq!(keys(&index), vec![1]);
    }

    #[test]
    fn test_range_inclusive_bounds() {
        let index = sample();
        assert_eq!(range_keys(&index, 30, 50), vec![30, 40, 50]);
        assert_eq!(range_keys(&index, 31, 49), vec![40]);
        assert_eq!(range_keys(&index, 0, 100), vec![20, 30, 40, 50, 70]);
        assert_eq!(range_keys(&index, 71, 100), Vec::<i32>::new());
        assert_eq!(range_keys(&index, 50, 50), vec![50]);
    }

    #[test]
    fn test_range_inverted_bounds_is_empty() {
        let index = sample();
        assert!(range_keys(&index, 60, 10).is_empty());
    }

    #[test]
    fn test_range_comparison_count() {
        let index = sample();
        index.reset_metrics();
        assert_eq!(range_keys(&index, 30, 40), vec![30, 40]);
        // lo vs 50, 30, 20; hi vs 30; lo vs 40; hi vs 40; hi vs 50 stops
        assert_eq!(index.comparisons(), 7);
    }

    #[test]
    fn test_range_from_has_no_upper_bound() {
        let index = sample();
        let mut out = Vec::new();
        index.reset_metrics();
        index.range_from_apply(&35, |k, _| out.push(*k));
        assert_eq!(out, vec![40, 50, 70]);
        // lo vs 50, 30, 40; lo vs 70; no upper bound checks
        assert_eq!(index.comparisons(), 4);
    }

    #[test]
    fn test_range_apply_mut_edits_values() {
        let mut index: OrderedIndex<i32, i32> = OrderedIndex::new();
        for key in [5, 1, 9, 3, 7] {
            index.insert(key, 0);
        }
        index.range_apply_mut(&3, &7, |key, value| *value = key * 10);
        let values: Vec<i32> = index.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![0, 30, 50, 70, 0]);
    }

    #[test]
    fn test_string_prefix_range() {
        let mut index: OrderedIndex<String, u32> = OrderedIndex::new();
        for (i, name) in ["smith", "jones", "smithers", "smyth", "sm", "adams"]
            .into_iter()
            .enumerate()
        {
            index.insert(name.to_string(), i as u32);
        }
        let mut hits = Vec::new();
        index.range_apply("smi", "smi\u{10FFFF}", |k, _| hits.push(k.clone()));
        assert_eq!(hits, vec!["smith", "smithers"]);
    }

    #[test]
    fn test_height_follows_insertion_order() {
        let index = sample();
        assert_eq!(index.height(), 3);

        let mut chain: OrderedIndex<u32, ()> = OrderedIndex::new();
        for key in 0..16 {
            chain.insert(key, ());
        }
        assert_eq!(chain.height(), 16);
    }

    #[test]
    fn test_degenerate_tree_does_not_recurse() {
        let mut index: OrderedIndex<u32, u32> = OrderedIndex::new();
        for key in 0..20_000 {
            index.insert(key, key);
        }
        assert_eq!(index.height(), 20_000);

        index.reset_metrics();
        assert_eq!(index.get(&19_999), Some(&19_999));
        assert_eq!(index.comparisons(), 20_000);

        let mut count = 0;
        index.range_apply(&19_990, &20_000, |_, _| count += 1);
        assert_eq!(count, 10);

        assert_eq!(index.erase(&0), Some(0));
        assert_eq!(index.iter().count(), 19_999);
    }

    #[test]
    fn test_slots_reused_after_erase() {
        let mut index = sample();
        index.erase(&20);
        index.erase(&70);
        index.insert(10, "a");
        index.insert(90, "i");
        assert_eq!(index.arena.capacity(), 5);
        assert_eq!(keys(&index), vec![10, 30, 40, 50, 90]);
    }

    #[test]
    fn test_debug_lists_entries_in_order() {
        let mut index = OrderedIndex::new();
        index.insert(2, 'b');
        index.insert(1, 'a');
        assert_eq!(format!("{index:?}"), "{1: 'a', 2: 'b'}");
    }
}
