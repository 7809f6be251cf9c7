//! The red-black tree proper: an arena of nodes linked by index, plus the search, insertion,
//! removal and bulk-construction algorithms that keep it balanced.

mod iter;

#[cfg(test)]
mod test;

use compare::Compare;
use std::cmp::Ordering::{self, *};
use std::mem;
use super::error::{Error, Result};

pub use self::iter::{IntoIter, Iter};
#[cfg(test)]
pub use self::test::check;

/// The index of a node in a tree's arena.
pub type NodeId = usize;

/// A possibly absent node. An absent node is a black leaf.
pub type Link = Option<NodeId>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

#[derive(Clone)]
pub struct Node<K, V> {
    pub key: K,
    pub value: V,
    color: Color,
    parent: Link,
    left: Link,
    right: Link,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V, parent: Link) -> Self {
        Node { key, value, color: Color::Red, parent, left: None, right: None }
    }
}

/// The outcome of descending the tree in search of a key.
pub enum Search {
    /// A node with an equal key.
    Found(NodeId),
    /// No equal key; the new node would hang off the given parent on the given side, or become
    /// the root if there is no parent.
    Vacant(Option<(NodeId, Ordering)>),
}

/// An entry spliced out of the tree.
pub struct Removed<K, V> {
    pub key: K,
    pub value: V,
    /// When the removed node had two children its in-order successor's entry was moved into the
    /// removed node's slot: `(from, to)`.
    moved: Option<(NodeId, NodeId)>,
}

impl<K, V> Removed<K, V> {
    /// Translates a link held across the removal to the slot its entry lives in now.
    pub fn relocate(&self, link: Link) -> Link {
        match self.moved {
            Some((from, to)) if link == Some(from) => Some(to),
            _ => link,
        }
    }
}

/// An arena-backed red-black tree. Nodes refer to each other by index; the arena owns them all.
#[derive(Clone)]
pub struct Tree<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<NodeId>,
    root: Link,
    len: usize,
    generation: u64,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self { Tree::new() }
}

impl<K, V> Tree<K, V> {
    pub const fn new() -> Self {
        Tree { slots: Vec::new(), free: Vec::new(), root: None, len: 0, generation: 0 }
    }

    fn with_capacity(capacity: usize) -> Self {
        Tree { slots: Vec::with_capacity(capacity), ..Tree::new() }
    }

    pub fn len(&self) -> usize { self.len }

    pub fn root(&self) -> Link { self.root }

    /// The structural modification count: bumped on every insertion, removal and clear, never on
    /// a value replacement.
    pub fn generation(&self) -> u64 { self.generation }

    pub fn node(&self, id: NodeId) -> &Node<K, V> {
        self.slots[id].as_ref().expect("link to a freed node")
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        self.slots[id].as_mut().expect("link to a freed node")
    }

    /// Like `node`, but tolerates ids that are stale or out of bounds.
    pub fn get_node(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Node<K, V> {
        let node = self.slots[id].take().expect("double free of a tree node");
        self.free.push(id);
        node
    }

    /// Drops every node. The arena is flat, so teardown never recurses.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    fn color(&self, link: Link) -> Color {
        link.map_or(Color::Black, |id| self.node(id).color)
    }

    fn is_red(&self, link: Link) -> bool { self.color(link) == Color::Red }

    fn set_color(&mut self, link: Link, color: Color) {
        if let Some(id) = link { self.node_mut(id).color = color; }
    }

    fn parent(&self, id: NodeId) -> Link { self.node(id).parent }

    fn child<D: Dir>(&self, id: NodeId) -> Link { D::link(self.node(id)) }

    fn set_child<D: Dir>(&mut self, id: NodeId, link: Link) {
        *D::link_mut(self.node_mut(id)) = link;
        if let Some(child) = link { self.node_mut(child).parent = Some(id); }
    }

    /// Points whatever referred to `old` (its parent or the root) at `new`.
    fn replace_child(&mut self, parent: Link, old: NodeId, new: Link) {
        match parent {
            None => self.root = new,
            Some(p) if self.node(p).left == Some(old) => self.node_mut(p).left = new,
            Some(p) => self.node_mut(p).right = new,
        }

        if let Some(new) = new { self.node_mut(new).parent = parent; }
    }

    /// Returns the leftmost node of the subtree at `link`.
    pub fn first(&self, link: Link) -> Link { self.extremum::<Left>(link) }

    /// Returns the rightmost node of the subtree at `link`.
    pub fn last(&self, link: Link) -> Link { self.extremum::<Right>(link) }

    fn extremum<D: Dir>(&self, mut link: Link) -> Link {
        while let Some(next) = link.and_then(|id| self.child::<D>(id)) { link = Some(next); }
        link
    }

    pub fn successor(&self, id: NodeId) -> Link { self.neighbor::<Right>(id) }

    pub fn predecessor(&self, id: NodeId) -> Link { self.neighbor::<Left>(id) }

    /// Steps one position in direction `D` in in-order sequence.
    fn neighbor<D: Dir>(&self, mut id: NodeId) -> Link {
        if let Some(child) = self.child::<D>(id) {
            return self.extremum::<D::Opposite>(Some(child));
        }

        while let Some(parent) = self.parent(id) {
            if self.child::<D>(parent) != Some(id) { return Some(parent); }
            id = parent;
        }

        None
    }

    /// Rotates `x` down in direction `D`, lifting its opposite child into its place.
    fn rotate<D: Dir>(&mut self, x: NodeId) {
        let y = self.child::<D::Opposite>(x).expect("rotation without a child to lift");
        let inner = self.child::<D>(y);
        let parent = self.parent(x);

        *D::Opposite::link_mut(self.node_mut(x)) = inner;
        if let Some(inner) = inner { self.node_mut(inner).parent = Some(x); }

        self.replace_child(parent, x, Some(y));
        self.set_child::<D>(y, Some(x));
    }

    /// Descends from the root comparing `key` against each node.
    pub fn search<C, Q: ?Sized>(&self, cmp: &C, key: &Q) -> Search where C: Compare<Q, K> {
        let mut link = self.root;
        let mut slot = None;

        while let Some(id) = link {
            let node = self.node(id);
            let order = cmp.compare(key, &node.key);

            link = match order {
                Equal => return Search::Found(id),
                Less => node.left,
                Greater => node.right,
            };

            slot = Some((id, order));
        }

        Search::Vacant(slot)
    }

    pub fn find<C, Q: ?Sized>(&self, cmp: &C, key: &Q) -> Link where C: Compare<Q, K> {
        match self.search(cmp, key) {
            Search::Found(id) => Some(id),
            Search::Vacant(_) => None,
        }
    }

    /// Inserts the entry, or replaces the value of an equal key in place (which is not a
    /// structural change).
    pub fn insert<C>(&mut self, cmp: &C, key: K, value: V) -> Option<V> where C: Compare<K> {
        match self.search(cmp, &key) {
            Search::Found(id) => Some(mem::replace(&mut self.node_mut(id).value, value)),
            Search::Vacant(slot) => {
                self.insert_at(slot, key, value);
                None
            }
        }
    }

    fn insert_at(&mut self, slot: Option<(NodeId, Ordering)>, key: K, value: V) -> NodeId {
        let id = self.alloc(Node::new(key, value, slot.map(|(parent, _)| parent)));

        match slot {
            None => self.root = Some(id),
            Some((parent, Less)) => self.node_mut(parent).left = Some(id),
            Some((parent, _)) => self.node_mut(parent).right = Some(id),
        }

        self.len += 1;
        self.generation = self.generation.wrapping_add(1);
        self.fix_after_insertion(id);
        id
    }

    fn fix_after_insertion(&mut self, mut x: NodeId) {
        while let Some(parent) = self.parent(x).filter(|&p| self.is_red(Some(p))) {
            // A red node is never the root, so it has a parent.
            let grandparent = self.parent(parent).expect("red node without a parent");

            x = if self.node(grandparent).left == Some(parent) {
                self.fix_insertion_side::<Left>(x, parent, grandparent)
            } else {
                self.fix_insertion_side::<Right>(x, parent, grandparent)
            };
        }

        self.set_color(self.root, Color::Black);
    }

    // `parent` is the `D` child of `grandparent`. Returns the node to continue from.
    fn fix_insertion_side<D: Dir>(&mut self, mut x: NodeId, mut parent: NodeId,
                                  grandparent: NodeId) -> NodeId {
        let uncle = self.child::<D::Opposite>(grandparent);

        if self.is_red(uncle) {
            self.set_color(Some(parent), Color::Black);
            self.set_color(uncle, Color::Black);
            self.set_color(Some(grandparent), Color::Red);
            return grandparent;
        }

        if self.child::<D::Opposite>(parent) == Some(x) {
            self.rotate::<D>(parent);
            x = parent;
            parent = self.parent(x).expect("rotated node without a parent");
        }

        self.set_color(Some(parent), Color::Black);
        self.set_color(Some(grandparent), Color::Red);
        self.rotate::<D::Opposite>(grandparent);
        x
    }

    /// Splices the node out of the tree and rebalances.
    ///
    /// A node with two children trades its entry with its in-order successor, which is then
    /// spliced out in its stead; `Removed::relocate` tracks that move.
    pub fn remove_node(&mut self, id: NodeId) -> Removed<K, V> {
        let mut target = id;
        let mut moved = None;

        if let (Some(_), Some(right)) = (self.node(id).left, self.node(id).right) {
            let successor = self.first(Some(right)).expect("non-empty right subtree");
            self.swap_entries(id, successor);
            moved = Some((successor, id));
            target = successor;
        }

        let node = self.node(target);
        let child = node.left.or(node.right);
        let parent = node.parent;
        let color = node.color;

        self.replace_child(parent, target, child);
        if color == Color::Black { self.fix_after_deletion(child, parent); }

        let node = self.release(target);
        self.len -= 1;
        self.generation = self.generation.wrapping_add(1);
        Removed { key: node.key, value: node.value, moved }
    }

    fn swap_entries(&mut self, a: NodeId, b: NodeId) {
        debug_assert!(a != b);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.slots.split_at_mut(hi);
        let first = head[lo].as_mut().expect("link to a freed node");
        let second = tail[0].as_mut().expect("link to a freed node");
        mem::swap(&mut first.key, &mut second.key);
        mem::swap(&mut first.value, &mut second.value);
    }

    // `x` carries an extra black; `parent` is tracked separately because `x` may be absent.
    fn fix_after_deletion(&mut self, mut x: Link, mut parent: Link) {
        while x != self.root && !self.is_red(x) {
            let Some(p) = parent else { break };

            (x, parent) = if self.node(p).left == x {
                self.fix_deletion_side::<Left>(p)
            } else {
                self.fix_deletion_side::<Right>(p)
            };
        }

        self.set_color(x, Color::Black);
    }

    // The doubly black position is the `D` child of `parent`. Returns the next position to fix
    // and its parent.
    fn fix_deletion_side<D: Dir>(&mut self, parent: NodeId) -> (Link, Link) {
        // The deficient side had black-height at least one, so the sibling exists.
        let mut sibling = self.child::<D::Opposite>(parent).expect("missing sibling");

        if self.is_red(Some(sibling)) {
            self.set_color(Some(sibling), Color::Black);
            self.set_color(Some(parent), Color::Red);
            self.rotate::<D>(parent);
            sibling = self.child::<D::Opposite>(parent).expect("missing sibling");
        }

        let near = self.child::<D>(sibling);
        let far = self.child::<D::Opposite>(sibling);

        if !self.is_red(near) && !self.is_red(far) {
            self.set_color(Some(sibling), Color::Red);
            return (Some(parent), self.parent(parent));
        }

        if !self.is_red(far) {
            self.set_color(near, Color::Black);
            self.set_color(Some(sibling), Color::Red);
            self.rotate::<D::Opposite>(sibling);
            sibling = self.child::<D::Opposite>(parent).expect("missing sibling");
        }

        let parent_color = self.node(parent).color;
        self.set_color(Some(sibling), parent_color);
        self.set_color(Some(parent), Color::Black);
        self.set_color(self.child::<D::Opposite>(sibling), Color::Black);
        self.rotate::<D>(parent);
        (self.root, None)
    }

    /// Returns the smallest node whose key is greater than (or, if `inclusive`, equal to) `key`.
    pub fn ceiling<C, Q: ?Sized>(&self, cmp: &C, key: &Q, inclusive: bool) -> Link
        where C: Compare<Q, K> {

        self.closest::<Right, C, Q>(cmp, key, inclusive)
    }

    /// Returns the largest node whose key is less than (or, if `inclusive`, equal to) `key`.
    pub fn floor<C, Q: ?Sized>(&self, cmp: &C, key: &Q, inclusive: bool) -> Link
        where C: Compare<Q, K> {

        self.closest::<Left, C, Q>(cmp, key, inclusive)
    }

    // Closest node on side `D` of `key`.
    fn closest<D: Dir, C, Q: ?Sized>(&self, cmp: &C, key: &Q, inclusive: bool) -> Link
        where C: Compare<Q, K> {

        // The ordering of `key` against a node lying on side `D` of it.
        let beyond = if D::LEFT { Greater } else { Less };
        let mut link = self.root;
        let mut best = None;

        while let Some(id) = link {
            let node = self.node(id);

            match cmp.compare(key, &node.key) {
                Equal if inclusive => return Some(id),
                order if order == beyond => {
                    best = Some(id);
                    link = D::Opposite::link(node);
                }
                _ => link = D::link(node),
            }
        }

        best
    }

    /// Builds a balanced tree from `size` entries in strictly ascending key order, in linear
    /// time and without rotations.
    ///
    /// Every level is filled except possibly the deepest, whose nodes are colored red; all other
    /// nodes are black.
    pub fn from_sorted<C, I>(cmp: &C, size: usize, items: I) -> Result<Self>
        where C: Compare<K>, I: IntoIterator<Item = (K, V)> {

        let items = items.into_iter();

        // The declared size is untrusted until the input runs out.
        let capacity = size.min(items.size_hint().0);

        let mut builder = Builder {
            tree: Tree::with_capacity(capacity),
            items,
            cmp,
            red_level: red_level(size),
            prev: None,
        };

        let root = builder.build(0, 0, size)?;

        if builder.items.next().is_some() {
            return Err(Error::InvalidArgument("sorted input is longer than its declared size"));
        }

        let mut tree = builder.tree;
        tree.root = root;
        tree.len = size;

        tracing::debug!(size, red_level = builder.red_level, "built tree from sorted entries");
        Ok(tree)
    }
}

/// The depth whose nodes are colored red when building a tree of `size` nodes from sorted input:
/// one past the depth of the last complete level.
fn red_level(size: usize) -> usize {
    let mut level = 0;
    let mut n = size;

    while n > 0 {
        level += 1;
        n = (n - 1) / 2;
    }

    level
}

struct Builder<'c, K, V, C, I> {
    tree: Tree<K, V>,
    items: I,
    cmp: &'c C,
    red_level: usize,
    prev: Link,
}

impl<'c, K, V, C, I> Builder<'c, K, V, C, I> where C: Compare<K>, I: Iterator<Item = (K, V)> {
    // Builds the subtree holding entries `lo..hi` at depth `level`.
    fn build(&mut self, level: usize, lo: usize, hi: usize) -> Result<Link> {
        if lo >= hi { return Ok(None); }

        let mid = lo + (hi - 1 - lo) / 2;
        let left = self.build(level + 1, lo, mid)?;

        let (key, value) = self.items.next()
            .ok_or(Error::InvalidArgument("sorted input is shorter than its declared size"))?;

        if let Some(prev) = self.prev {
            if !self.cmp.compares_lt(&self.tree.node(prev).key, &key) {
                return Err(Error::InvalidArgument("input is not in strictly ascending order"));
            }
        }

        let id = self.tree.alloc(Node::new(key, value, None));
        self.prev = Some(id);

        if level != self.red_level { self.tree.node_mut(id).color = Color::Black; }
        if left.is_some() { self.tree.set_child::<Left>(id, left); }

        let right = self.build(level + 1, mid + 1, hi)?;
        if right.is_some() { self.tree.set_child::<Right>(id, right); }

        Ok(Some(id))
    }
}

/// A side of a node. Most algorithms are written once for a side `D` and instantiated for both.
pub trait Dir {
    type Opposite: Dir<Opposite = Self>;

    const LEFT: bool;

    fn link<K, V>(node: &Node<K, V>) -> Link;
    fn link_mut<K, V>(node: &mut Node<K, V>) -> &mut Link;
}

pub enum Left {}

impl Dir for Left {
    type Opposite = Right;

    const LEFT: bool = true;

    fn link<K, V>(node: &Node<K, V>) -> Link { node.left }
    fn link_mut<K, V>(node: &mut Node<K, V>) -> &mut Link { &mut node.left }
}

pub enum Right {}

impl Dir for Right {
    type Opposite = Left;

    const LEFT: bool = false;

    fn link<K, V>(node: &Node<K, V>) -> Link { node.right }
    fn link_mut<K, V>(node: &mut Node<K, V>) -> &mut Link { &mut node.right }
}
