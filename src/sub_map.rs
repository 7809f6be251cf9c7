//! Key-range views over a map.

use compare::{Compare, Natural};
use std::cmp::Ordering::Less;
use super::cursor::Cursor;
use super::error::{Error, Result};
use super::map::{Range, TreeMap};
use super::node::{self, Link, Tree};
use super::view::{self, Projection, View};

/// An optional inclusive lower bound and an optional exclusive upper bound on keys.
pub(crate) struct Bounds<'a, K> {
    lo: Option<&'a K>,
    hi: Option<&'a K>,
}

impl<'a, K> Clone for Bounds<'a, K> {
    fn clone(&self) -> Self { *self }
}

impl<'a, K> Copy for Bounds<'a, K> {}

impl<'a, K> Bounds<'a, K> {
    pub fn new(lo: Option<&'a K>, hi: Option<&'a K>) -> Self { Bounds { lo, hi } }

    pub fn full() -> Self { Bounds { lo: None, hi: None } }

    pub fn is_full(&self) -> bool { self.lo.is_none() && self.hi.is_none() }

    pub fn contains<C, Q: ?Sized>(&self, cmp: &C, key: &Q) -> bool where C: Compare<Q, K> {
        self.lo.map_or(true, |lo| cmp.compare(key, lo) != Less) &&
        self.hi.map_or(true, |hi| cmp.compares_lt(key, hi))
    }

    /// The first node in range.
    pub fn first<V, C>(&self, tree: &Tree<K, V>, cmp: &C) -> Link where C: Compare<K> {
        let first = match self.lo {
            Some(lo) => tree.ceiling(cmp, lo, true),
            None => tree.first(tree.root()),
        };

        first.filter(|&id| self.hi.map_or(true, |hi| cmp.compares_lt(&tree.node(id).key, hi)))
    }

    /// The last node in range.
    pub fn last<V, C>(&self, tree: &Tree<K, V>, cmp: &C) -> Link where C: Compare<K> {
        let last = match self.hi {
            Some(hi) => tree.floor(cmp, hi, false),
            None => tree.last(tree.root()),
        };

        last.filter(|&id| self.lo.map_or(true, |lo| !cmp.compares_lt(&tree.node(id).key, lo)))
    }

    /// The first node past the range, if any.
    pub fn end<V, C>(&self, tree: &Tree<K, V>, cmp: &C) -> Link where C: Compare<K> {
        self.hi.and_then(|hi| tree.ceiling(cmp, hi, true))
    }

    pub fn iter<'t, V, C>(&self, tree: &'t Tree<K, V>, cmp: &C) -> node::Iter<'t, K, V>
        where C: Compare<K> {

        if self.is_full() { return node::Iter::new(tree); }

        let first = self.first(tree, cmp);
        let last = if first.is_some() { self.last(tree, cmp) } else { None };
        node::Iter::between(tree, first, last)
    }

    /// Counts the entries in range; linear in their number unless the range is unbounded.
    pub fn len<V, C>(&self, tree: &Tree<K, V>, cmp: &C) -> usize where C: Compare<K> {
        if self.is_full() { tree.len() } else { self.iter(tree, cmp).count() }
    }
}

/// A live view of the entries of a map whose keys lie in a range.
///
/// The range has an optional inclusive lower bound and an optional exclusive upper bound. The
/// view owns no entries: every read and write goes to the backing map, after checking the key
/// against the range.
///
/// Acquire through [`TreeMap::head_map`](struct.TreeMap.html#method.head_map),
/// [`TreeMap::tail_map`](struct.TreeMap.html#method.tail_map) or
/// [`TreeMap::sub_map`](struct.TreeMap.html#method.sub_map).
///
/// # Examples
///
/// ```
/// let mut map: rbmap::TreeMap<_, _> = (1..=6).map(|i| (i, i * 10)).collect();
///
/// {
///     let mut sub = map.sub_map(2, 5).unwrap();
///     assert_eq!(sub.remove(&3), Some(30));
///     assert_eq!(sub.remove(&6), None);
///     assert_eq!(sub.insert(4, 44), Ok(Some(40)));
/// }
///
/// assert_eq!(map.keys().cloned().collect::<Vec<_>>(), [1, 2, 4, 5, 6]);
/// assert_eq!(map[&4], 44);
/// ```
pub struct SubMap<'a, K, V, C = Natural<K>> where C: Compare<K> {
    map: &'a mut TreeMap<K, V, C>,
    lo: Option<K>,
    hi: Option<K>,
}

impl<'a, K, V, C> SubMap<'a, K, V, C> where C: Compare<K> {
    pub(crate) fn new(map: &'a mut TreeMap<K, V, C>, lo: Option<K>, hi: Option<K>) -> Self {
        SubMap { map, lo, hi }
    }

    fn bounds(&self) -> Bounds<'_, K> { Bounds::new(self.lo.as_ref(), self.hi.as_ref()) }

    fn in_range<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        self.bounds().contains(&self.map.cmp, key)
    }

    /// Returns the view's inclusive lower bound, if any.
    pub fn lower_bound(&self) -> Option<&K> { self.lo.as_ref() }

    /// Returns the view's exclusive upper bound, if any.
    pub fn upper_bound(&self) -> Option<&K> { self.hi.as_ref() }

    /// Returns the number of entries in range. This takes time linear in that number.
    pub fn len(&self) -> usize { self.bounds().len(&self.map.tree, &self.map.cmp) }

    /// Checks if no entry of the map lies in range.
    pub fn is_empty(&self) -> bool {
        self.bounds().first(&self.map.tree, &self.map.cmp).is_none()
    }

    /// Checks if the key is in range and in the map.
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        self.in_range(key) && self.map.contains_key(key)
    }

    /// Returns the value associated with the key, or `None` if the key is out of range or absent.
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V> where C: Compare<Q, K> {
        if self.in_range(key) { self.map.get(key) } else { None }
    }

    /// Returns a mutable reference to the value associated with the key, or `None` if the key is
    /// out of range or absent.
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V> where C: Compare<Q, K> {
        if self.in_range(key) { self.map.get_mut(key) } else { None }
    }

    /// Inserts an entry into the backing map, returning the previous value, if any.
    ///
    /// # Errors
    ///
    /// `Error::InvalidArgument` if the key lies outside the view's range. The map is left
    /// untouched.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        if !self.in_range(&key) { return Err(Error::InvalidArgument("key out of range")); }
        Ok(self.map.insert(key, value))
    }

    /// Removes the key from the backing map if it is in range, returning its value.
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V> where C: Compare<Q, K> {
        if self.in_range(key) { self.map.remove(key) } else { None }
    }

    /// Returns the least key in range.
    ///
    /// # Errors
    ///
    /// `Error::NoSuchElement` if no key is in range.
    pub fn first_key(&self) -> Result<&K> {
        let tree = &self.map.tree;
        self.bounds().first(tree, &self.map.cmp).map(|id| &tree.node(id).key)
            .ok_or(Error::NoSuchElement)
    }

    /// Returns the greatest key in range.
    ///
    /// # Errors
    ///
    /// `Error::NoSuchElement` if no key is in range.
    pub fn last_key(&self) -> Result<&K> {
        let tree = &self.map.tree;
        self.bounds().last(tree, &self.map.cmp).map(|id| &tree.node(id).key)
            .ok_or(Error::NoSuchElement)
    }

    /// Returns an iterator over the entries in range, in ascending order.
    pub fn iter(&self) -> Range<'_, K, V> {
        Range(self.bounds().iter(&self.map.tree, &self.map.cmp))
    }

    /// Removes every entry in range from the backing map.
    pub fn clear(&mut self) { self.entry_set().clear(); }

    // Checks that narrowing to `[from, to)` stays inside the current range and is non-empty.
    fn check_narrowing(&self, from: Option<&K>, to: Option<&K>) -> Result<()> {
        let cmp = &self.map.cmp;

        if let (Some(from), Some(to)) = (from.or(self.lo.as_ref()), to.or(self.hi.as_ref())) {
            if !cmp.compares_lt(from, to) {
                return Err(Error::InvalidArgument("range start must sort before its end"));
            }
        }

        if let (Some(from), Some(lo)) = (from, &self.lo) {
            if cmp.compares_lt(from, lo) {
                return Err(Error::InvalidArgument("bound lies outside the enclosing range"));
            }
        }

        if let (Some(to), Some(hi)) = (to, &self.hi) {
            if cmp.compares_gt(to, hi) {
                return Err(Error::InvalidArgument("bound lies outside the enclosing range"));
            }
        }

        Ok(())
    }

    /// Narrows the view to keys less than `to`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidArgument` if `to` lies above the current upper bound or does not sort
    /// after the current lower bound.
    pub fn head_map(self, to: K) -> Result<Self> {
        self.check_narrowing(None, Some(&to))?;
        Ok(SubMap { hi: Some(to), ..self })
    }

    /// Narrows the view to keys greater than or equal to `from`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidArgument` if `from` lies below the current lower bound or does not sort
    /// before the current upper bound.
    pub fn tail_map(self, from: K) -> Result<Self> {
        self.check_narrowing(Some(&from), None)?;
        Ok(SubMap { lo: Some(from), ..self })
    }

    /// Narrows the view to keys in `[from, to)`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidArgument` unless `from` sorts before `to` and both lie within the current
    /// range.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map: rbmap::TreeMap<_, _> = (0..10).map(|i| (i, ())).collect();
    ///
    /// let sub = map.sub_map(2, 8).unwrap().sub_map(3, 5).unwrap();
    /// assert_eq!(sub.iter().map(|e| *e.0).collect::<Vec<_>>(), [3, 4]);
    ///
    /// assert!(map.sub_map(2, 8).unwrap().sub_map(1, 5).is_err());
    /// assert!(map.sub_map(2, 8).unwrap().head_map(9).is_err());
    /// ```
    pub fn sub_map(self, from: K, to: K) -> Result<Self> {
        self.check_narrowing(Some(&from), Some(&to))?;
        Ok(SubMap { lo: Some(from), hi: Some(to), ..self })
    }

    /// Returns a live view of the entries in range projected through `P`.
    pub fn view<P: Projection>(&mut self) -> View<'_, K, V, C, P> {
        View::new(&mut *self.map, Bounds::new(self.lo.as_ref(), self.hi.as_ref()))
    }

    /// Returns a live view of the keys in range.
    pub fn key_set(&mut self) -> View<'_, K, V, C, view::Keys> { self.view() }

    /// Returns a live view of the values of the entries in range.
    pub fn value_collection(&mut self) -> View<'_, K, V, C, view::Values> { self.view() }

    /// Returns a live view of the entries in range.
    pub fn entry_set(&mut self) -> View<'_, K, V, C, view::Entries> { self.view() }

    /// Returns a fail-fast cursor over the entries in range.
    pub fn cursor<P: Projection>(&self) -> Cursor<P> {
        Cursor::new(&self.map.tree, &self.map.cmp, self.bounds())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, TreeMap};

    fn map(keys: &[i32]) -> TreeMap<i32, i32> {
        keys.iter().map(|&k| (k, k * 10)).collect()
    }

    #[test]
    fn head_and_tail() {
        let mut m = map(&[1, 2, 3, 4, 5, 6]);

        let head = m.head_map(4);
        assert_eq!(head.iter().map(|e| *e.0).collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(head.first_key(), Ok(&1));
        assert_eq!(head.last_key(), Ok(&3));

        let tail = m.tail_map(4);
        assert_eq!(tail.iter().map(|e| *e.0).collect::<Vec<_>>(), [4, 5, 6]);
        assert_eq!(tail.len(), 3);
        assert!(!tail.contains_key(&3));
        assert_eq!(tail.get(&5), Some(&50));
        assert_eq!(tail.get(&2), None);
    }

    #[test]
    fn empty_range() {
        let mut m = map(&[1, 5, 9]);
        let sub = m.sub_map(2, 5).unwrap();

        assert!(sub.is_empty());
        assert_eq!(sub.len(), 0);
        assert_eq!(sub.first_key(), Err(Error::NoSuchElement));
        assert_eq!(sub.last_key(), Err(Error::NoSuchElement));
        assert_eq!(sub.iter().count(), 0);
    }

    #[test]
    fn equal_bounds_are_rejected() {
        let mut m = map(&[1, 2, 3]);
        assert!(matches!(m.sub_map(2, 2), Err(Error::InvalidArgument(_))));
        assert!(matches!(m.head_map(2).tail_map(2), Err(Error::InvalidArgument(_))));
        assert!(matches!(m.tail_map(2).head_map(2), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn narrowing_stays_inside() {
        let mut m = map(&[1, 2, 3, 4, 5, 6, 7, 8]);

        let sub = m.tail_map(3).head_map(7).unwrap();
        assert_eq!(sub.lower_bound(), Some(&3));
        assert_eq!(sub.upper_bound(), Some(&7));

        let sub = sub.tail_map(4).unwrap();
        assert_eq!(sub.iter().map(|e| *e.0).collect::<Vec<_>>(), [4, 5, 6]);

        assert!(m.tail_map(3).tail_map(2).is_err());
        assert!(m.head_map(7).head_map(8).is_err());
        assert!(m.head_map(7).head_map(7).is_ok());
    }

    #[test]
    fn insert_out_of_range_leaves_map_untouched() {
        let mut m = map(&[1, 2, 3, 4, 5, 6]);
        let generation = m.generation();

        {
            let mut sub = m.sub_map(2, 5).unwrap();
            assert_eq!(sub.insert(5, 0), Err(Error::InvalidArgument("key out of range")));
            assert_eq!(sub.insert(1, 0), Err(Error::InvalidArgument("key out of range")));
            assert_eq!(sub.insert(3, 33), Ok(Some(30)));
        }

        assert_eq!(m.generation(), generation);
        assert_eq!(m[&5], 50);
        assert_eq!(m[&3], 33);
    }

    #[test]
    fn clear_removes_only_the_range() {
        let mut m = map(&[1, 2, 3, 4, 5, 6]);
        m.sub_map(2, 5).unwrap().clear();
        assert_eq!(m.keys().cloned().collect::<Vec<_>>(), [1, 5, 6]);
    }
}
