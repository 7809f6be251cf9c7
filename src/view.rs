//! Projected views over a map: its keys, its values, or its entries.
//!
//! A view is one type, [`View`](struct.View.html), parameterized by a projection tag. The tags
//! form a closed set: [`Keys`](enum.Keys.html), [`Values`](enum.Values.html) and
//! [`Entries`](enum.Entries.html).

use compare::Compare;
use std::iter;
use std::marker::PhantomData;
use super::cursor::Cursor;
use super::map::TreeMap;
use super::node;
use super::sub_map::Bounds;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Entries {}
    impl Sealed for super::Keys {}
    impl Sealed for super::Values {}
}

/// Selects what a view or cursor yields for each entry.
pub trait Projection: sealed::Sealed {
    /// The item yielded for an entry borrowed for `'a`.
    type Item<'a, K: 'a, V: 'a>;

    /// Projects an entry.
    fn project<'a, K, V>(key: &'a K, value: &'a V) -> Self::Item<'a, K, V>;
}

/// Projects entries to key-value pairs.
#[derive(Debug)]
pub enum Entries {}

impl Projection for Entries {
    type Item<'a, K: 'a, V: 'a> = (&'a K, &'a V);
    fn project<'a, K, V>(key: &'a K, value: &'a V) -> (&'a K, &'a V) { (key, value) }
}

/// Projects entries to their keys.
#[derive(Debug)]
pub enum Keys {}

impl Projection for Keys {
    type Item<'a, K: 'a, V: 'a> = &'a K;
    fn project<'a, K, V>(key: &'a K, _: &'a V) -> &'a K { key }
}

/// Projects entries to their values.
#[derive(Debug)]
pub enum Values {}

impl Projection for Values {
    type Item<'a, K: 'a, V: 'a> = &'a V;
    fn project<'a, K, V>(_: &'a K, value: &'a V) -> &'a V { value }
}

/// A live view of a map, or of a key range of a map, projected through `P`.
///
/// Iteration follows the map's key order. Removing through a view removes from the backing map.
///
/// # Examples
///
/// ```
/// let mut map: rbmap::TreeMap<_, _> = vec![(1, "a"), (2, "b"), (3, "a")].into_iter().collect();
///
/// let mut values = map.value_collection();
/// assert_eq!(values.iter().cloned().collect::<Vec<_>>(), ["a", "b", "a"]);
///
/// // Removes the first entry holding the value.
/// assert!(values.remove(&"a"));
/// assert_eq!(values.len(), 2);
///
/// assert_eq!(map.keys().cloned().collect::<Vec<_>>(), [2, 3]);
/// ```
pub struct View<'a, K, V, C, P> where C: Compare<K> {
    map: &'a mut TreeMap<K, V, C>,
    bounds: Bounds<'a, K>,
    _projection: PhantomData<fn() -> P>,
}

impl<'a, K, V, C, P> View<'a, K, V, C, P> where C: Compare<K>, P: Projection {
    pub(crate) fn new(map: &'a mut TreeMap<K, V, C>, bounds: Bounds<'a, K>) -> Self {
        View { map, bounds, _projection: PhantomData }
    }

    /// Returns the number of entries in the view.
    ///
    /// This is constant time for a view of a whole map and linear in the result for a view of a
    /// key range.
    pub fn len(&self) -> usize { self.bounds.len(&self.map.tree, &self.map.cmp) }

    /// Checks if the view is empty.
    pub fn is_empty(&self) -> bool {
        self.bounds.first(&self.map.tree, &self.map.cmp).is_none()
    }

    /// Returns an iterator over the projected entries, in key order.
    pub fn iter(&self) -> ViewIter<'_, K, V, P> {
        ViewIter { iter: self.bounds.iter(&self.map.tree, &self.map.cmp), _projection: PhantomData }
    }

    /// Returns a fail-fast cursor over the projected entries.
    pub fn cursor(&self) -> Cursor<P> { Cursor::new(&self.map.tree, &self.map.cmp, self.bounds) }

    /// Removes from the backing map every entry in the view for which `f` returns `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map: rbmap::TreeMap<_, _> = (1..=8).map(|i| (i, i * 10)).collect();
    ///
    /// map.sub_map(2, 7).unwrap().entry_set().retain(|k, v| {
    ///     *v += 1;
    ///     k % 2 == 0
    /// });
    ///
    /// assert_eq!(map.iter().map(|e| (*e.0, *e.1)).collect::<Vec<_>>(),
    ///            [(1, 10), (2, 21), (4, 41), (6, 61), (7, 70), (8, 80)]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F) where F: FnMut(&K, &mut V) -> bool {
        let TreeMap { tree, cmp } = &mut *self.map;
        let mut next = self.bounds.first(tree, cmp);
        let mut end = self.bounds.end(tree, cmp);
        let mut removed = 0;

        while let Some(id) = next.filter(|&id| Some(id) != end) {
            let succ = tree.successor(id);
            let node = tree.node_mut(id);

            if f(&node.key, &mut node.value) {
                next = succ;
            } else {
                let entry = tree.remove_node(id);
                next = entry.relocate(succ);
                end = entry.relocate(end);
                removed += 1;
            }
        }

        tracing::trace!(removed, "retained entries of a view");
    }

    /// Removes every entry in the view from the backing map.
    pub fn clear(&mut self) {
        if self.bounds.is_full() { self.map.clear(); } else { self.retain(|_, _| false); }
    }

    // The first node in the view satisfying `pred`.
    fn position<F>(&self, mut pred: F) -> node::Link where F: FnMut(&node::Node<K, V>) -> bool {
        let tree = &self.map.tree;
        let mut walk = self.bounds.iter(tree, &self.map.cmp);
        iter::from_fn(|| walk.next_id()).find(|&id| pred(tree.node(id)))
    }
}

impl<'a, K, V, C> View<'a, K, V, C, Keys> where C: Compare<K> {
    /// Checks if the key is in the view.
    pub fn contains<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        self.bounds.contains(&self.map.cmp, key) && self.map.contains_key(key)
    }

    /// Removes the key from the backing map if it is in the view, returning the stored key.
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<K> where C: Compare<Q, K> {
        if !self.bounds.contains(&self.map.cmp, key) { return None; }
        self.map.remove_entry(key).map(|e| e.0)
    }
}

impl<'a, K, V, C> View<'a, K, V, C, Values> where C: Compare<K> {
    /// Checks if any entry in the view holds the value. This takes linear time.
    pub fn contains(&self, value: &V) -> bool where V: PartialEq {
        self.position(|node| node.value == *value).is_some()
    }

    /// Removes the first entry in key order holding the value, returning whether there was one.
    pub fn remove(&mut self, value: &V) -> bool where V: PartialEq {
        match self.position(|node| node.value == *value) {
            Some(id) => {
                self.map.remove_link(id);
                true
            }
            None => false,
        }
    }
}

impl<'a, K, V, C> View<'a, K, V, C, Entries> where C: Compare<K> {
    /// Checks if the view holds an entry with the key and value.
    pub fn contains<Q: ?Sized>(&self, key: &Q, value: &V) -> bool
        where C: Compare<Q, K>, V: PartialEq {

        self.bounds.contains(&self.map.cmp, key) && self.map.get(key) == Some(value)
    }

    /// Removes the entry if the view holds it with exactly this value.
    pub fn remove<Q: ?Sized>(&mut self, key: &Q, value: &V) -> Option<(K, V)>
        where C: Compare<Q, K>, V: PartialEq {

        if !self.contains(key, value) { return None; }
        self.map.remove_entry(key)
    }
}

impl<'v, 'a, K, V, C, P> IntoIterator for &'v View<'a, K, V, C, P>
    where C: Compare<K>, P: Projection, K: 'v, V: 'v {

    type Item = P::Item<'v, K, V>;
    type IntoIter = ViewIter<'v, K, V, P>;
    fn into_iter(self) -> ViewIter<'v, K, V, P> { self.iter() }
}

/// An iterator over a view's projected entries.
///
/// Acquire through [`View::iter`](struct.View.html#method.iter).
pub struct ViewIter<'a, K: 'a, V: 'a, P> {
    iter: node::Iter<'a, K, V>,
    _projection: PhantomData<fn() -> P>,
}

impl<'a, K, V, P> Clone for ViewIter<'a, K, V, P> {
    fn clone(&self) -> Self { ViewIter { iter: self.iter.clone(), _projection: PhantomData } }
}

impl<'a, K: 'a, V: 'a, P> Iterator for ViewIter<'a, K, V, P> where P: Projection {
    type Item = P::Item<'a, K, V>;

    fn next(&mut self) -> Option<P::Item<'a, K, V>> {
        self.iter.next().map(|node| P::project(&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.iter.size_hint() }
}

impl<'a, K: 'a, V: 'a, P> DoubleEndedIterator for ViewIter<'a, K, V, P> where P: Projection {
    fn next_back(&mut self) -> Option<P::Item<'a, K, V>> {
        self.iter.next_back().map(|node| P::project(&node.key, &node.value))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Entries, Keys, TreeMap, Values};

    fn map() -> TreeMap<i32, char> {
        vec![(1, 'a'), (2, 'b'), (3, 'c'), (4, 'b'), (5, 'e')].into_iter().collect()
    }

    #[test]
    fn projections() {
        let mut m = map();

        assert_eq!(m.view::<Keys>().iter().cloned().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
        assert_eq!(m.view::<Values>().iter().collect::<String>(), "abcbe");
        assert_eq!(m.view::<Entries>().iter().rev().next(), Some((&5, &'e')));
    }

    #[test]
    fn key_set_respects_range() {
        let mut m = map();
        let mut sub = m.sub_map(2, 4).unwrap();
        let mut keys = sub.key_set();

        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&3));
        assert!(!keys.contains(&4));
        assert_eq!(keys.remove(&4), None);
        assert_eq!(keys.remove(&3), Some(3));
        assert_eq!(keys.len(), 1);

        assert_eq!(m.len(), 4);
        assert!(m.contains_key(&4));
    }

    #[test]
    fn value_collection_removes_first_match() {
        let mut m = map();
        let mut values = m.value_collection();

        assert!(values.contains(&'b'));
        assert!(values.remove(&'b'));
        assert!(values.contains(&'b'));
        assert!(values.remove(&'b'));
        assert!(!values.contains(&'b'));
        assert!(!values.remove(&'b'));

        assert_eq!(m.keys().cloned().collect::<Vec<_>>(), [1, 3, 5]);
    }

    #[test]
    fn value_collection_of_range() {
        let mut m = map();
        let mut sub = m.tail_map(3);
        let mut values = sub.value_collection();

        assert!(values.remove(&'b'));
        assert_eq!(m.get(&2), Some(&'b'));
        assert_eq!(m.get(&4), None);
    }

    #[test]
    fn entry_set_matches_value() {
        let mut m = map();
        let mut entries = m.entry_set();

        assert!(entries.contains(&2, &'b'));
        assert!(!entries.contains(&2, &'x'));
        assert_eq!(entries.remove(&2, &'x'), None);
        assert_eq!(entries.remove(&2, &'b'), Some((2, 'b')));
        assert!(!entries.contains(&2, &'b'));
    }

    #[test]
    fn retain_across_two_child_removals() {
        let mut m: TreeMap<i32, i32> = (0..64).map(|i| (i, i)).collect();
        m.entry_set().retain(|k, _| k % 3 == 0);

        let expected: Vec<_> = (0..64).filter(|k| k % 3 == 0).collect();
        assert_eq!(m.keys().cloned().collect::<Vec<_>>(), expected);
        crate::node::check(m.tree(), m.cmp());
    }

    #[test]
    fn clear_whole_map_and_range() {
        let mut m = map();
        m.tail_map(4).key_set().clear();
        assert_eq!(m.len(), 3);

        m.key_set().clear();
        assert!(m.is_empty());
    }

    #[test]
    fn borrowed_view_iterates() {
        let mut m = map();
        let view = m.view::<Keys>();
        let mut total = 0;
        for k in &view { total += *k; }
        assert_eq!(total, 15);
    }
}
