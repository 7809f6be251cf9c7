//! An ordered set based on a red-black tree.

use compare::{Compare, Natural};
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::hash::{self, Hash};
use std::iter;
use std::ops::Bound;
use super::error::Result;
use super::map::{self, TreeMap};

/// An ordered set based on a red-black tree.
///
/// The set stores its items as the keys of a [`TreeMap`](../struct.TreeMap.html) with unit
/// values, so it shares the map's ordering, complexity and generation semantics.
///
/// The behavior of this set is unspecified if an item's ordering relative to any other item
/// changes while the item is in the set. This is normally only possible through `Cell`,
/// `RefCell`, or unsafe code.
#[derive(Clone)]
pub struct TreeSet<T, C = Natural<T>> where C: Compare<T> {
    map: TreeMap<T, (), C>,
}

impl<T> TreeSet<T> where T: Ord {
    /// Creates an empty set ordered according to the natural order of its items.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = rbmap::TreeSet::new();
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut it = set.iter();
    /// assert_eq!(it.next(), Some(&1));
    /// assert_eq!(it.next(), Some(&2));
    /// assert_eq!(it.next(), Some(&3));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { TreeSet { map: TreeMap::new() } }
}

impl<T, C> TreeSet<T, C> where C: Compare<T> {
    /// Creates an empty set ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut set = rbmap::TreeSet::with_cmp(natural().rev());
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let items: Vec<_> = set.iter().cloned().collect();
    /// assert_eq!(items, [3, 2, 1]);
    /// ```
    pub fn with_cmp(cmp: C) -> Self { TreeSet { map: TreeMap::with_cmp(cmp) } }

    /// Builds a set in linear time from exactly `size` items in strictly ascending order.
    ///
    /// # Errors
    ///
    /// `Error::InvalidArgument` if the items are not strictly ascending or there are more or
    /// fewer than `size` of them.
    ///
    /// # Examples
    ///
    /// ```
    /// let set = rbmap::TreeSet::from_sorted_iter(compare::natural::<i32>(), 4, 1..5).unwrap();
    /// assert_eq!(set.len(), 4);
    ///
    /// assert!(rbmap::TreeSet::from_sorted_iter(compare::natural::<i32>(), 4, 1..4).is_err());
    /// ```
    pub fn from_sorted_iter<I>(cmp: C, size: usize, items: I) -> Result<Self>
        where I: IntoIterator<Item = T> {

        let map = TreeMap::from_sorted_iter(cmp, size, items.into_iter().map(|t| (t, ())))?;
        Ok(TreeSet { map })
    }

    /// Checks if the set is empty.
    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    /// Returns the number of items in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = rbmap::TreeSet::new();
    /// assert_eq!(set.len(), 0);
    ///
    /// set.insert(2);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.map.len() }

    /// Returns a reference to the set's comparator.
    pub fn cmp(&self) -> &C { self.map.cmp() }

    /// Removes all items from the set.
    pub fn clear(&mut self) { self.map.clear(); }

    /// Inserts an item into the set, returning `true` if the set did not already contain the item.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = rbmap::TreeSet::new();
    /// assert!(!set.contains(&1));
    /// assert!(set.insert(1));
    /// assert!(set.contains(&1));
    /// assert!(!set.insert(1));
    /// ```
    pub fn insert(&mut self, item: T) -> bool { self.map.insert(item, ()).is_none() }

    /// Removes the given item from the set, returning `true` if the set contained the item.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = rbmap::TreeSet::new();
    ///
    /// set.insert(2);
    /// set.insert(1);
    ///
    /// assert!(set.remove(&1));
    /// assert_eq!(set.len(), 1);
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, item: &Q) -> bool where C: Compare<Q, T> {
        self.map.remove(item).is_some()
    }

    /// Removes the given item from the set and returns the stored item, if any.
    pub fn take<Q: ?Sized>(&mut self, item: &Q) -> Option<T> where C: Compare<Q, T> {
        self.map.remove_entry(item).map(|e| e.0)
    }

    /// Checks if the set contains the given item.
    pub fn contains<Q: ?Sized>(&self, item: &Q) -> bool where C: Compare<Q, T> {
        self.map.contains_key(item)
    }

    /// Returns a reference to the stored item equal to the given one, if any.
    pub fn get<Q: ?Sized>(&self, item: &Q) -> Option<&T> where C: Compare<Q, T> {
        self.map.get_key_value(item).map(|e| e.0)
    }

    /// Returns the set's minimum item.
    ///
    /// # Errors
    ///
    /// `Error::NoSuchElement` if the set is empty.
    pub fn first(&self) -> Result<&T> { self.map.first_key() }

    /// Returns the set's maximum item.
    ///
    /// # Errors
    ///
    /// `Error::NoSuchElement` if the set is empty.
    pub fn last(&self) -> Result<&T> { self.map.last_key() }

    /// Returns a reference to the set's minimum item, or `None` if the set is empty.
    pub fn min_item(&self) -> Option<&T> { self.map.min_entry().map(|e| e.0) }

    /// Returns a reference to the set's maximum item, or `None` if the set is empty.
    pub fn max_item(&self) -> Option<&T> { self.map.max_entry().map(|e| e.0) }

    /// Removes and returns the set's minimum item, or `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set: rbmap::TreeSet<_> = vec![2, 1, 3].into_iter().collect();
    /// assert_eq!(set.remove_min(), Some(1));
    /// assert_eq!(set.remove_max(), Some(3));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn remove_min(&mut self) -> Option<T> { self.map.remove_min().map(|e| e.0) }

    /// Removes and returns the set's maximum item, or `None` if the set is empty.
    pub fn remove_max(&mut self) -> Option<T> { self.map.remove_max().map(|e| e.0) }

    /// Returns the greatest item that is less than (or, if `inclusive` is `true`, equal to) the
    /// given item.
    ///
    /// The given item need not itself be present in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: rbmap::TreeSet<_> = vec![1, 3, 5].into_iter().collect();
    ///
    /// assert_eq!(set.pred(&1, false), None);
    /// assert_eq!(set.pred(&3, false), Some(&1));
    /// assert_eq!(set.pred(&3, true), Some(&3));
    /// assert_eq!(set.pred(&4, false), Some(&3));
    /// ```
    pub fn pred<Q: ?Sized>(&self, item: &Q, inclusive: bool) -> Option<&T> where C: Compare<Q, T> {
        self.map.pred(item, inclusive).map(|e| e.0)
    }

    /// Returns the least item that is greater than (or, if `inclusive` is `true`, equal to) the
    /// given item.
    ///
    /// The given item need not itself be present in the set.
    pub fn succ<Q: ?Sized>(&self, item: &Q, inclusive: bool) -> Option<&T> where C: Compare<Q, T> {
        self.map.succ(item, inclusive).map(|e| e.0)
    }

    /// Returns an iterator over the set.
    ///
    /// The iterator yields the items in ascending order according to the set's comparator.
    pub fn iter(&self) -> Iter<T> { Iter(self.map.keys()) }

    /// Returns an iterator over the set's items that lie in the given range.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::Bound::{Included, Unbounded};
    ///
    /// let set: rbmap::TreeSet<_> = (1..=6).collect();
    /// let items: Vec<_> = set.range(Included(&4), Unbounded).cloned().collect();
    /// assert_eq!(items, [4, 5, 6]);
    /// ```
    pub fn range<Min: ?Sized, Max: ?Sized>(&self, min: Bound<&Min>, max: Bound<&Max>)
        -> Range<T> where C: Compare<Min, T> + Compare<Max, T> {

        Range(self.map.range(min, max))
    }
}

impl<T, C> Debug for TreeSet<T, C> where T: Debug, C: Compare<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> Default for TreeSet<T, C> where C: Compare<T> + Default {
    fn default() -> Self { TreeSet { map: TreeMap::default() } }
}

impl<T, C> Extend<T> for TreeSet<T, C> where C: Compare<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, it: I) {
        self.map.extend(it.into_iter().map(|t| (t, ())));
    }
}

impl<T, C> iter::FromIterator<T> for TreeSet<T, C> where C: Compare<T> + Default {
    fn from_iter<I: IntoIterator<Item = T>>(it: I) -> Self {
        let mut set: Self = Default::default();
        set.extend(it);
        set
    }
}

impl<T, C> Hash for TreeSet<T, C> where T: Hash, C: Compare<T> {
    fn hash<H: hash::Hasher>(&self, h: &mut H) { self.map.hash(h); }
}

impl<'a, T, C> IntoIterator for &'a TreeSet<T, C> where C: Compare<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

impl<T, C> IntoIterator for TreeSet<T, C> where C: Compare<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> IntoIter<T> { IntoIter(self.map.into_iter()) }
}

impl<T, C> PartialEq for TreeSet<T, C> where C: Compare<T> {
    fn eq(&self, other: &Self) -> bool { self.map == other.map }
}

impl<T, C> Eq for TreeSet<T, C> where C: Compare<T> {}

impl<T, C> PartialOrd for TreeSet<T, C> where C: Compare<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { self.map.partial_cmp(&other.map) }
}

impl<T, C> Ord for TreeSet<T, C> where C: Compare<T> {
    fn cmp(&self, other: &Self) -> Ordering { Ord::cmp(&self.map, &other.map) }
}

/// An iterator that consumes the set.
///
/// The iterator yields the items in ascending order according to the set's comparator.
pub struct IntoIter<T>(map::IntoIter<T, ()>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> { self.0.next().map(|e| e.0) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> { self.0.next_back().map(|e| e.0) }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// An iterator over the set.
///
/// The iterator yields the items in ascending order according to the set's comparator.
pub struct Iter<'a, T: 'a>(map::Keys<'a, T, ()>);

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self { Iter(self.0.clone()) }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<&'a T> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> { self.0.next_back() }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// An iterator over a range of the set's items.
pub struct Range<'a, T: 'a>(map::Range<'a, T, ()>);

impl<'a, T> Clone for Range<'a, T> {
    fn clone(&self) -> Self { Range(self.0.clone()) }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<&'a T> { self.0.next().map(|e| e.0) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T> DoubleEndedIterator for Range<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> { self.0.next_back().map(|e| e.0) }
}

#[cfg(test)]
mod tests {
    use compare::{Compare, natural};
    use crate::Error;
    use super::TreeSet;

    #[test]
    fn first_and_last() {
        let mut set = TreeSet::new();
        assert_eq!(set.first(), Err(Error::NoSuchElement));
        assert_eq!(set.last(), Err(Error::NoSuchElement));
        assert_eq!(set.min_item(), None);

        set.extend(vec![5, 1, 9, 3]);
        assert_eq!(set.first(), Ok(&1));
        assert_eq!(set.last(), Ok(&9));
        assert_eq!(set.min_item(), Some(&1));
        assert_eq!(set.max_item(), Some(&9));
    }

    #[test]
    fn take_returns_stored_item() {
        let mut set: TreeSet<String> = vec!["a".to_string(), "b".to_string()].into_iter().collect();
        let a = "a".to_string();
        assert_eq!(set.take(&a), Some(a.clone()));
        assert_eq!(set.take(&a), None);
        assert_eq!(set.get(&"b".to_string()).map(|s| s.as_str()), Some("b"));
    }

    #[test]
    fn reversed_order() {
        let mut set = TreeSet::with_cmp(natural().rev());
        set.extend(1..=5);
        assert_eq!(set.iter().cloned().collect::<Vec<_>>(), [5, 4, 3, 2, 1]);
        assert_eq!(set.first(), Ok(&5));
        assert_eq!(set.succ(&3, false), Some(&2));
    }

    #[test]
    fn into_iter_both_ends() {
        let set: TreeSet<_> = (1..=4).collect();
        let mut it = set.into_iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next_back(), Some(4));
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.collect::<Vec<_>>(), [2, 3]);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let l: TreeSet<_> = vec![3, 1, 2].into_iter().collect();
        let r: TreeSet<_> = vec![1, 2, 3].into_iter().collect();
        assert_eq!(l, r);
        assert_eq!(format!("{:?}", l), "{1, 2, 3}");
    }
}
