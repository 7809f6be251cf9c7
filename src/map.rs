//! An ordered map based on a red-black tree.

use compare::{Compare, Natural};
use std::cmp::Ordering::{self, *};
use std::fmt::{self, Debug};
use std::hash::{self, Hash};
use std::iter;
use std::ops::{self, Bound};
use std::vec;
use super::cursor::Cursor;
use super::error::{Error, Result};
use super::node::{self, Link, Tree};
use super::sub_map::{Bounds, SubMap};
use super::view::{self, Projection, View};

/// An ordered map based on a red-black tree.
///
/// Entries live in an arena owned by the map and are kept in ascending key order according to
/// the map's comparator. Insertion and removal rebalance the tree, so lookups, insertions and
/// removals take `O(log n)` time.
///
/// Every insertion of a new key, removal, and `clear` bumps the map's
/// [`generation`](#method.generation); replacing the value of an existing key does not.
/// [`Cursor`](struct.Cursor.html)s use it to detect modifications made behind their back.
///
/// The behavior of this map is unspecified if a key's ordering relative to any other key changes
/// while the key is in the map. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
#[derive(Clone)]
pub struct TreeMap<K, V, C = Natural<K>> where C: Compare<K> {
    pub(crate) tree: Tree<K, V>,
    pub(crate) cmp: C,
}

impl<K, V> TreeMap<K, V> where K: Ord {
    /// Creates an empty map ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { TreeMap::with_cmp(compare::natural()) }
}

impl<K, V, C> TreeMap<K, V, C> where C: Compare<K> {
    /// Creates an empty map ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    /// use rbmap::TreeMap;
    ///
    /// let mut map = TreeMap::with_cmp(natural().rev());
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn with_cmp(cmp: C) -> Self { TreeMap { tree: Tree::new(), cmp } }

    /// Builds a map from `size` entries already in strictly ascending key order.
    ///
    /// This takes linear time, unlike repeated insertion. It fails with
    /// `Error::InvalidArgument` if the entries are not strictly ascending or if there are more or
    /// fewer than `size` of them.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::{Error, TreeMap};
    ///
    /// let map = TreeMap::from_sorted_iter(compare::natural::<i32>(), 3, vec![(1, "a"), (2, "b"), (3, "c")])
    ///     .unwrap();
    /// assert_eq!(map.len(), 3);
    /// assert_eq!(map.first_key(), Ok(&1));
    ///
    /// let unsorted = TreeMap::from_sorted_iter(compare::natural::<i32>(), 2, vec![(2, "b"), (1, "a")]);
    /// assert!(matches!(unsorted, Err(Error::InvalidArgument(_))));
    /// ```
    pub fn from_sorted_iter<I>(cmp: C, size: usize, entries: I) -> Result<Self>
        where I: IntoIterator<Item = (K, V)> {

        let tree = Tree::from_sorted(&cmp, size, entries)?;
        Ok(TreeMap { tree, cmp })
    }

    /// Checks if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbmap::TreeMap::new();
    /// assert!(map.is_empty());
    ///
    /// map.insert(2, "b");
    /// assert!(!map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool { self.tree.len() == 0 }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbmap::TreeMap::new();
    /// assert_eq!(map.len(), 0);
    ///
    /// map.insert(2, "b");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.tree.len() }

    /// Returns a reference to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    /// use rbmap::TreeMap;
    ///
    /// let map: TreeMap<i32, &str> = TreeMap::new();
    /// assert!(map.cmp().compares_lt(&1, &2));
    ///
    /// let map: TreeMap<i32, &str, _> = TreeMap::with_cmp(natural().rev());
    /// assert!(map.cmp().compares_gt(&1, &2));
    /// ```
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Returns the map's structural modification count.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbmap::TreeMap::new();
    /// let start = map.generation();
    ///
    /// map.insert(1, "a");
    /// assert_eq!(map.generation(), start + 1);
    ///
    /// // Replacing a value is not a structural modification.
    /// map.insert(1, "b");
    /// assert_eq!(map.generation(), start + 1);
    ///
    /// map.remove(&1);
    /// assert_eq!(map.generation(), start + 2);
    /// ```
    pub fn generation(&self) -> u64 { self.tree.generation() }

    /// Removes all entries from the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbmap::TreeMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.len(), 3);
    /// assert_eq!(map.iter().next(), Some((&1, &"a")));
    ///
    /// map.clear();
    ///
    /// assert_eq!(map.len(), 0);
    /// assert_eq!(map.iter().next(), None);
    /// ```
    pub fn clear(&mut self) {
        tracing::debug!(len = self.len(), "clearing map");
        self.tree.clear();
    }

    /// Inserts an entry into the map, returning the previous value, if any, associated
    /// with the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbmap::TreeMap::new();
    /// assert_eq!(map.insert(1, "a"), None);
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.insert(1, "b"), Some("a"));
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.tree.insert(&self.cmp, key, value)
    }

    /// Removes the entry whose key is equal to the given key and returns its value, or `None` if
    /// the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbmap::TreeMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V> where C: Compare<Q, K> {
        self.remove_entry(key).map(|e| e.1)
    }

    /// Removes and returns the entry whose key is equal to the given key, returning
    /// `None` if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbmap::TreeMap::new();
    /// map.insert(1, "a");
    ///
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    pub fn remove_entry<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)>
        where C: Compare<Q, K> {

        let id = self.tree.find(&self.cmp, key)?;
        Some(self.remove_link(id))
    }

    pub(crate) fn remove_link(&mut self, id: node::NodeId) -> (K, V) {
        let removed = self.tree.remove_node(id);
        (removed.key, removed.value)
    }

    /// Checks if the map contains the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbmap::TreeMap::new();
    /// assert!(!map.contains_key(&1));
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        self.tree.find(&self.cmp, key).is_some()
    }

    /// Checks if any entry of the map holds the given value. This takes linear time.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbmap::TreeMap::new();
    /// map.insert(1, "a");
    /// assert!(map.contains_value(&"a"));
    /// assert!(!map.contains_value(&"b"));
    /// ```
    pub fn contains_value(&self, value: &V) -> bool where V: PartialEq {
        self.values().any(|v| v == value)
    }

    /// Returns a reference to the value associated with the given key, or `None` if the
    /// map does not contain the key.
    ///
    /// A stored `None` is distinct from an absent key:
    ///
    /// ```
    /// let mut map = rbmap::TreeMap::new();
    /// map.insert(1, None::<&str>);
    /// assert_eq!(map.get(&1), Some(&None));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V> where C: Compare<Q, K> {
        self.get_key_value(key).map(|e| e.1)
    }

    /// Returns references to the stored key equal to the given key and to its value.
    pub fn get_key_value<Q: ?Sized>(&self, key: &Q) -> Option<(&K, &V)> where C: Compare<Q, K> {
        self.entry_at(self.tree.find(&self.cmp, key))
    }

    /// Returns a mutable reference to the value associated with the given key, or `None`
    /// if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbmap::TreeMap::new();
    /// map.insert(1, "a");
    ///
    /// if let Some(value) = map.get_mut(&1) {
    ///     *value = "b";
    /// }
    ///
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V> where C: Compare<Q, K> {
        let id = self.tree.find(&self.cmp, key)?;
        Some(&mut self.tree.node_mut(id).value)
    }

    fn entry_at(&self, link: Link) -> Option<(&K, &V)> {
        link.map(|id| {
            let node = self.tree.node(id);
            (&node.key, &node.value)
        })
    }

    /// Returns the map's minimum key.
    ///
    /// # Errors
    ///
    /// `Error::NoSuchElement` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::{Error, TreeMap};
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.first_key(), Err(Error::NoSuchElement));
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.first_key(), Ok(&1));
    /// ```
    pub fn first_key(&self) -> Result<&K> {
        self.min_entry().map(|e| e.0).ok_or(Error::NoSuchElement)
    }

    /// Returns the map's maximum key.
    ///
    /// # Errors
    ///
    /// `Error::NoSuchElement` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbmap::TreeMap::new();
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.last_key(), Ok(&2));
    /// ```
    pub fn last_key(&self) -> Result<&K> {
        self.max_entry().map(|e| e.0).ok_or(Error::NoSuchElement)
    }

    /// Returns the map's minimum key and its value, or `None` if the map is empty.
    pub fn min_entry(&self) -> Option<(&K, &V)> {
        self.entry_at(self.tree.first(self.tree.root()))
    }

    /// Returns the map's maximum key and its value, or `None` if the map is empty.
    pub fn max_entry(&self) -> Option<(&K, &V)> {
        self.entry_at(self.tree.last(self.tree.root()))
    }

    /// Removes the map's minimum key and returns it and its associated value, or `None` if the map
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbmap::TreeMap::new();
    /// assert_eq!(map.remove_min(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.remove_min(), Some((1, "a")));
    /// ```
    pub fn remove_min(&mut self) -> Option<(K, V)> {
        let id = self.tree.first(self.tree.root())?;
        Some(self.remove_link(id))
    }

    /// Removes the map's maximum key and returns it and its associated value, or `None` if the map
    /// is empty.
    pub fn remove_max(&mut self) -> Option<(K, V)> {
        let id = self.tree.last(self.tree.root())?;
        Some(self.remove_link(id))
    }

    /// Returns the entry with the greatest key that is less than (or, if `inclusive` is
    /// `true`, equal to) the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbmap::TreeMap::new();
    ///
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    /// map.insert(5, "e");
    ///
    /// assert_eq!(map.pred(&3, true), Some((&3, &"c")));
    /// assert_eq!(map.pred(&3, false), Some((&1, &"a")));
    /// assert_eq!(map.pred(&1, false), None);
    /// ```
    pub fn pred<Q: ?Sized>(&self, key: &Q, inclusive: bool) -> Option<(&K, &V)>
        where C: Compare<Q, K> {

        self.entry_at(self.tree.floor(&self.cmp, key, inclusive))
    }

    /// Returns the entry with the least key that is greater than (or, if `inclusive` is
    /// `true`, equal to) the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbmap::TreeMap::new();
    ///
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    /// map.insert(5, "e");
    ///
    /// assert_eq!(map.succ(&3, true), Some((&3, &"c")));
    /// assert_eq!(map.succ(&3, false), Some((&5, &"e")));
    /// assert_eq!(map.succ(&5, false), None);
    /// ```
    pub fn succ<Q: ?Sized>(&self, key: &Q, inclusive: bool) -> Option<(&K, &V)>
        where C: Compare<Q, K> {

        self.entry_at(self.tree.ceiling(&self.cmp, key, inclusive))
    }

    /// Returns an iterator over the map's entries with immutable references to the values.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbmap::TreeMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next_back(), Some((&3, &"c")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<K, V> { Iter(node::Iter::new(&self.tree)) }

    /// Returns an iterator over the map's entries with mutable references to the values.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbmap::TreeMap::new();
    ///
    /// map.insert("b", 2);
    /// map.insert("a", 1);
    /// map.insert("c", 3);
    ///
    /// for (_, value) in map.iter_mut() { *value *= 10; }
    ///
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&"a", &10), (&"b", &20), (&"c", &30)]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<K, V> {
        let root = self.tree.root();
        let (first, last) = (self.tree.first(root), self.tree.last(root));
        IterMut(self.tree.entries_mut(first, last).into_iter())
    }

    /// Returns an iterator over the map's keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> { Keys(self.iter()) }

    /// Returns an iterator over the map's values in ascending order of their keys.
    pub fn values(&self) -> Values<'_, K, V> { Values(self.iter()) }

    /// Returns an iterator over mutable references to the map's values in ascending order of
    /// their keys.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> { ValuesMut(self.iter_mut()) }

    /// Returns an iterator over the map's entries whose keys lie in the given range.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::Bound::{Excluded, Included, Unbounded};
    ///
    /// let map: rbmap::TreeMap<_, _> = (1..=6).map(|i| (i, i * 10)).collect();
    ///
    /// let keys: Vec<_> = map.range(Included(&2), Excluded(&5)).map(|e| *e.0).collect();
    /// assert_eq!(keys, [2, 3, 4]);
    ///
    /// let keys: Vec<_> = map.range(Excluded(&4), Unbounded).map(|e| *e.0).collect();
    /// assert_eq!(keys, [5, 6]);
    /// ```
    pub fn range<Min: ?Sized, Max: ?Sized>(&self, min: Bound<&Min>, max: Bound<&Max>)
        -> Range<K, V> where C: Compare<Min, K> + Compare<Max, K> {

        let root = self.tree.root();

        let front = match min {
            Bound::Unbounded => self.tree.first(root),
            Bound::Included(min) => self.tree.ceiling(&self.cmp, min, true),
            Bound::Excluded(min) => self.tree.ceiling(&self.cmp, min, false),
        };

        let back = match max {
            Bound::Unbounded => self.tree.last(root),
            Bound::Included(max) => self.tree.floor(&self.cmp, max, true),
            Bound::Excluded(max) => self.tree.floor(&self.cmp, max, false),
        };

        let (front, back) = match (front, back) {
            (Some(f), Some(b))
                if !self.cmp.compares_gt(&self.tree.node(f).key, &self.tree.node(b).key) =>
                (front, back),
            _ => (None, None),
        };

        Range(node::Iter::between(&self.tree, front, back))
    }

    /// Returns a view of the entries whose keys are less than `to`.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map: rbmap::TreeMap<_, _> = (1..=5).map(|i| (i, ())).collect();
    ///
    /// let mut head = map.head_map(3);
    /// assert_eq!(head.len(), 2);
    /// assert!(head.insert(3, ()).is_err());
    /// ```
    pub fn head_map(&mut self, to: K) -> SubMap<'_, K, V, C> {
        SubMap::new(self, None, Some(to))
    }

    /// Returns a view of the entries whose keys are greater than or equal to `from`.
    pub fn tail_map(&mut self, from: K) -> SubMap<'_, K, V, C> {
        SubMap::new(self, Some(from), None)
    }

    /// Returns a view of the entries whose keys lie in `[from, to)`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidArgument` unless `from` sorts strictly before `to`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::{Error, TreeMap};
    ///
    /// let mut map: TreeMap<_, _> = (1..=6).map(|i| (i, i * 10)).collect();
    ///
    /// let mut sub = map.sub_map(2, 5).unwrap();
    /// assert_eq!(sub.iter().map(|e| *e.0).collect::<Vec<_>>(), [2, 3, 4]);
    /// assert!(matches!(sub.insert(6, 60), Err(Error::InvalidArgument(_))));
    ///
    /// assert!(map.sub_map(5, 2).is_err());
    /// ```
    pub fn sub_map(&mut self, from: K, to: K) -> Result<SubMap<'_, K, V, C>> {
        if !self.cmp.compares_lt(&from, &to) {
            return Err(Error::InvalidArgument("range start must sort before its end"));
        }

        Ok(SubMap::new(self, Some(from), Some(to)))
    }

    /// Returns a live view of the whole map projected through `P`.
    pub fn view<P: Projection>(&mut self) -> View<'_, K, V, C, P> {
        View::new(self, Bounds::full())
    }

    /// Returns a live view of the map's keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map: rbmap::TreeMap<_, _> = (1..=3).map(|i| (i, i * 10)).collect();
    ///
    /// let mut keys = map.key_set();
    /// assert!(keys.contains(&2));
    /// assert_eq!(keys.remove(&2), Some(2));
    ///
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn key_set(&mut self) -> View<'_, K, V, C, view::Keys> { self.view() }

    /// Returns a live view of the map's values.
    pub fn value_collection(&mut self) -> View<'_, K, V, C, view::Values> { self.view() }

    /// Returns a live view of the map's entries.
    pub fn entry_set(&mut self) -> View<'_, K, V, C, view::Entries> { self.view() }

    /// Returns a fail-fast cursor positioned before the map's first entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbmap::{Entries, Error, TreeMap};
    ///
    /// let mut map: TreeMap<_, _> = vec![(1, "a"), (3, "c"), (5, "e")].into_iter().collect();
    ///
    /// let mut cursor = map.cursor::<Entries>();
    /// assert_eq!(cursor.next(&map), Ok(Some((&1, &"a"))));
    ///
    /// map.insert(2, "b");
    /// assert!(matches!(cursor.next(&map), Err(Error::ConcurrentModification { .. })));
    /// ```
    pub fn cursor<P: Projection>(&self) -> Cursor<P> {
        Cursor::new(&self.tree, &self.cmp, Bounds::full())
    }

    /// Exports the map's entries in ascending order.
    pub fn to_sorted_vec(&self) -> Vec<(K, V)> where K: Clone, V: Clone {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    #[cfg(test)]
    pub(crate) fn tree(&self) -> &Tree<K, V> { &self.tree }
}

impl<K, V, C> Debug for TreeMap<K, V, C> where K: Debug, V: Debug, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> Default for TreeMap<K, V, C> where C: Compare<K> + Default {
    fn default() -> Self { TreeMap::with_cmp(Default::default()) }
}

impl<K, V, C> Extend<(K, V)> for TreeMap<K, V, C> where C: Compare<K> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, it: I) {
        for (k, v) in it { self.insert(k, v); }
    }
}

impl<K, V, C> iter::FromIterator<(K, V)> for TreeMap<K, V, C> where C: Compare<K> + Default {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(it: I) -> Self {
        let mut map: Self = Default::default();
        map.extend(it);
        map
    }
}

impl<K, V, C> Hash for TreeMap<K, V, C> where K: Hash, V: Hash, C: Compare<K> {
    fn hash<H: hash::Hasher>(&self, h: &mut H) {
        self.len().hash(h);
        for e in self.iter() { e.hash(h); }
    }
}

impl<'a, K, V, C, Q: ?Sized> ops::Index<&'a Q> for TreeMap<K, V, C>
    where C: Compare<K> + Compare<Q, K> {

    type Output = V;
    fn index(&self, key: &Q) -> &V { self.get(key).expect("key not found") }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> { self.iter() }
}

impl<'a, K, V, C> IntoIterator for &'a mut TreeMap<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> IterMut<'a, K, V> { self.iter_mut() }
}

impl<K, V, C> IntoIterator for TreeMap<K, V, C> where C: Compare<K> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> IntoIter<K, V> { IntoIter(self.tree.into_entries()) }
}

impl<K, V, C> PartialEq for TreeMap<K, V, C> where V: PartialEq, C: Compare<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(l, r)| {
            self.cmp.compares_eq(l.0, r.0) && l.1 == r.1
        })
    }
}

impl<K, V, C> Eq for TreeMap<K, V, C> where V: Eq, C: Compare<K> {}

impl<K, V, C> PartialOrd for TreeMap<K, V, C> where V: PartialOrd, C: Compare<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let mut l = self.iter();
        let mut r = other.iter();

        loop {
            match (l.next(), r.next()) {
                (None, None) => return Some(Equal),
                (None, Some(_)) => return Some(Less),
                (Some(_), None) => return Some(Greater),
                (Some(l), Some(r)) => match self.cmp.compare(l.0, r.0) {
                    Equal => match l.1.partial_cmp(r.1) {
                        Some(Equal) => {}
                        non_eq => return non_eq,
                    },
                    non_eq => return Some(non_eq),
                },
            }
        }
    }
}

impl<K, V, C> Ord for TreeMap<K, V, C> where V: Ord, C: Compare<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut l = self.iter();
        let mut r = other.iter();

        loop {
            match (l.next(), r.next()) {
                (None, None) => return Equal,
                (None, Some(_)) => return Less,
                (Some(_), None) => return Greater,
                (Some(l), Some(r)) => match self.cmp.compare(l.0, r.0) {
                    Equal => match l.1.cmp(r.1) {
                        Equal => {}
                        non_eq => return non_eq,
                    },
                    non_eq => return non_eq,
                },
            }
        }
    }
}

/// An iterator that consumes the map.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// # Examples
///
/// Acquire through the `IntoIterator` trait:
///
/// ```
/// let mut map = rbmap::TreeMap::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(3, "c");
///
/// let entries: Vec<_> = map.into_iter().collect();
/// assert_eq!(entries, [(1, "a"), (2, "b"), (3, "c")]);
/// ```
pub struct IntoIter<K, V>(node::IntoIter<K, V>);

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<(K, V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> { self.0.next_back() }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// An iterator over the map's entries with immutable references to the values.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// Acquire through [`TreeMap::iter`](struct.TreeMap.html#method.iter) or the `IntoIterator`
/// trait.
pub struct Iter<'a, K: 'a, V: 'a>(node::Iter<'a, K, V>);

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self { Iter(self.0.clone()) }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<(&'a K, &'a V)> { self.0.next().map(|n| (&n.key, &n.value)) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        self.0.next_back().map(|n| (&n.key, &n.value))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// An iterator over the map's entries with mutable references to the values.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// Acquire through [`TreeMap::iter_mut`](struct.TreeMap.html#method.iter_mut) or the
/// `IntoIterator` trait.
pub struct IterMut<'a, K: 'a, V: 'a>(vec::IntoIter<(&'a K, &'a mut V)>);

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    fn next(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next_back() }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

/// An iterator over the map's keys in ascending order.
pub struct Keys<'a, K: 'a, V: 'a>(Iter<'a, K, V>);

impl<'a, K, V> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Self { Keys(self.0.clone()) }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<&'a K> { self.0.next().map(|e| e.0) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> { self.0.next_back().map(|e| e.0) }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

/// An iterator over the map's values in ascending order of their keys.
pub struct Values<'a, K: 'a, V: 'a>(Iter<'a, K, V>);

impl<'a, K, V> Clone for Values<'a, K, V> {
    fn clone(&self) -> Self { Values(self.0.clone()) }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<&'a V> { self.0.next().map(|e| e.1) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> { self.0.next_back().map(|e| e.1) }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

/// An iterator over mutable references to the map's values in ascending order of their keys.
pub struct ValuesMut<'a, K: 'a, V: 'a>(IterMut<'a, K, V>);

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;
    fn next(&mut self) -> Option<&'a mut V> { self.0.next().map(|e| e.1) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for ValuesMut<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a mut V> { self.0.next_back().map(|e| e.1) }
}

impl<'a, K, V> ExactSizeIterator for ValuesMut<'a, K, V> {}

/// An iterator over the map's entries whose keys lie in a given range.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// Acquire through [`TreeMap::range`](struct.TreeMap.html#method.range).
pub struct Range<'a, K: 'a, V: 'a>(pub(crate) node::Iter<'a, K, V>);

impl<'a, K, V> Clone for Range<'a, K, V> {
    fn clone(&self) -> Self { Range(self.0.clone()) }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<(&'a K, &'a V)> { self.0.next().map(|n| (&n.key, &n.value)) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Range<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        self.0.next_back().map(|n| (&n.key, &n.value))
    }
}
