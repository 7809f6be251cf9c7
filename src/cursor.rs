//! Fail-fast cursors.
//!
//! A cursor is detached from the map it walks: it holds node positions and the map's generation
//! as of its last synchronization, and takes the map as an argument on every step. The map can
//! therefore be modified while a cursor is outstanding, and the cursor reports it on its next use
//! with `Error::ConcurrentModification`. Removing through the cursor itself keeps it in sync.
//!
//! Detection is best effort. It compares generations only, so a cursor must be used with the
//! map it was created from.

use compare::Compare;
use std::fmt::{self, Debug};
use std::marker::PhantomData;
use super::error::{Error, Result};
use super::map::TreeMap;
use super::node::{Link, Tree};
use super::sub_map::Bounds;
use super::view::Projection;

/// A fail-fast cursor over a map or a key range of it, yielding entries projected through `P`.
///
/// Acquire through [`TreeMap::cursor`](struct.TreeMap.html#method.cursor), the `cursor` method
/// of a [`SubMap`](struct.SubMap.html), or [`View::cursor`](struct.View.html#method.cursor).
///
/// # Examples
///
/// ```
/// use rbmap::{Error, Keys, TreeMap};
///
/// let mut map: TreeMap<_, _> = (1..=5).map(|i| (i, ())).collect();
/// let mut cursor = map.cursor::<Keys>();
///
/// // Removing through the cursor does not invalidate it.
/// while let Some(&key) = cursor.next(&map).unwrap() {
///     if key % 2 == 0 { cursor.remove(&mut map).unwrap(); }
/// }
///
/// assert_eq!(map.keys().cloned().collect::<Vec<_>>(), [1, 3, 5]);
///
/// // Running off the end leaves the last entry returned removable, once.
/// assert_eq!(cursor.remove(&mut map), Ok((5, ())));
/// assert_eq!(cursor.remove(&mut map), Err(Error::IllegalState));
/// ```
pub struct Cursor<P> {
    next: Link,
    // The first node past the range, if any.
    end: Link,
    last: Link,
    generation: u64,
    _projection: PhantomData<fn() -> P>,
}

impl<P> Clone for Cursor<P> {
    fn clone(&self) -> Self { Cursor { _projection: PhantomData, ..*self } }
}

impl<P> Debug for Cursor<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("next", &self.next)
            .field("end", &self.end)
            .field("last", &self.last)
            .field("generation", &self.generation)
            .finish()
    }
}

impl<P> Cursor<P> where P: Projection {
    pub(crate) fn new<K, V, C>(tree: &Tree<K, V>, cmp: &C, bounds: Bounds<K>) -> Self
        where C: Compare<K> {

        Cursor {
            next: bounds.first(tree, cmp),
            end: bounds.end(tree, cmp),
            last: None,
            generation: tree.generation(),
            _projection: PhantomData,
        }
    }

    fn check(&self, found: u64) -> Result<()> {
        if found == self.generation { return Ok(()); }

        tracing::trace!(expected = self.generation, found, "cursor detected a foreign modification");
        Err(Error::ConcurrentModification { expected: self.generation, found })
    }

    /// Checks if the cursor has entries left to yield.
    ///
    /// This does not consult the map, so it may be stale after a foreign modification.
    pub fn has_next(&self) -> bool { self.next.is_some() && self.next != self.end }

    /// Advances the cursor, returning the next entry, or `None` once the cursor is exhausted.
    ///
    /// # Errors
    ///
    /// `Error::ConcurrentModification` if the map was structurally modified other than through
    /// this cursor since the cursor was created or last removed an entry.
    pub fn next<'m, K, V, C>(&mut self, map: &'m TreeMap<K, V, C>)
        -> Result<Option<P::Item<'m, K, V>>> where C: Compare<K>, K: 'm, V: 'm {

        let tree = &map.tree;
        self.check(tree.generation())?;

        let id = match self.next {
            Some(id) if self.next != self.end => id,
            _ => return Ok(None),
        };

        let node = tree.get_node(id).ok_or(Error::ConcurrentModification {
            expected: self.generation,
            found: tree.generation(),
        })?;

        self.next = tree.successor(id);
        self.last = Some(id);
        Ok(Some(P::project(&node.key, &node.value)))
    }

    /// Removes the entry most recently returned by `next` from the map and returns it.
    ///
    /// A call to `next` that finds the cursor exhausted does not forget that entry. The cursor
    /// stays valid; every other cursor over the map does not.
    ///
    /// # Errors
    ///
    /// `Error::IllegalState` if `next` has not returned an entry since the cursor was created or
    /// last removed one, and `Error::ConcurrentModification` as for `next`.
    pub fn remove<K, V, C>(&mut self, map: &mut TreeMap<K, V, C>) -> Result<(K, V)>
        where C: Compare<K> {

        self.check(map.tree.generation())?;
        let last = self.last.ok_or(Error::IllegalState)?;

        if map.tree.get_node(last).is_none() {
            return Err(Error::ConcurrentModification {
                expected: self.generation,
                found: map.tree.generation(),
            });
        }

        self.last = None;
        let removed = map.tree.remove_node(last);
        self.next = removed.relocate(self.next);
        self.end = removed.relocate(self.end);
        self.generation = map.tree.generation();

        Ok((removed.key, removed.value))
    }
}
