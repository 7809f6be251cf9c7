use std::vec;
use super::{Link, Node, NodeId, Tree};

/// An in-order walk over the nodes between two endpoints, following parent links.
pub struct Iter<'a, K, V> {
    tree: &'a Tree<K, V>,
    front: Link,
    back: Link,
    // Exact when walking the whole tree, an upper bound otherwise.
    len: usize,
    exact: bool,
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self { Iter { ..*self } }
}

impl<'a, K, V> Iter<'a, K, V> {
    pub fn new(tree: &'a Tree<K, V>) -> Self {
        let root = tree.root();
        Iter { tree, front: tree.first(root), back: tree.last(root), len: tree.len(), exact: true }
    }

    /// Walks `front..=back`. Both must be present with `front` not after `back`, or both absent.
    pub fn between(tree: &'a Tree<K, V>, front: Link, back: Link) -> Self {
        debug_assert_eq!(front.is_some(), back.is_some());
        let len = if front.is_some() { tree.len() } else { 0 };
        Iter { tree, front, back, len, exact: false }
    }

    pub fn next_id(&mut self) -> Option<NodeId> {
        let id = self.front?;

        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = self.tree.successor(id);
        }

        self.len = self.len.saturating_sub(1);
        Some(id)
    }

    pub fn next_back_id(&mut self) -> Option<NodeId> {
        let id = self.back?;

        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = self.tree.predecessor(id);
        }

        self.len = self.len.saturating_sub(1);
        Some(id)
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<&'a Node<K, V>> {
        let tree = self.tree;
        self.next_id().map(|id| tree.node(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exact {
            (self.len, Some(self.len))
        } else {
            (usize::from(self.front.is_some()), Some(self.len))
        }
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a Node<K, V>> {
        let tree = self.tree;
        self.next_back_id().map(|id| tree.node(id))
    }
}

impl<K, V> Tree<K, V> {
    /// Borrows the entries in `front..=back` mutably, in order.
    ///
    /// The references are gathered up front: the arena hands out its slots disjointly, and each
    /// slot's rank in the walk says where its entry goes.
    pub fn entries_mut(&mut self, front: Link, back: Link) -> Vec<(&K, &mut V)> {
        let mut rank = vec![None; self.slots.len()];
        let mut count = 0;
        let mut walk = Iter::between(self, front, back);

        while let Some(id) = walk.next_id() {
            rank[id] = Some(count);
            count += 1;
        }

        let mut entries: Vec<Option<(&K, &mut V)>> = (0..count).map(|_| None).collect();

        for (slot, rank) in self.slots.iter_mut().zip(rank) {
            if let (Some(Node { key, value, .. }), Some(rank)) = (slot.as_mut(), rank) {
                entries[rank] = Some((&*key, value));
            }
        }

        entries.into_iter().flatten().collect()
    }

    /// Consumes the tree, yielding its entries in order.
    pub fn into_entries(self) -> IntoIter<K, V> {
        let root = self.root;
        let mut order = Vec::with_capacity(self.len);
        let mut walk = Iter::between(&self, self.first(root), self.last(root));
        while let Some(id) = walk.next_id() { order.push(id); }

        IntoIter { slots: self.slots, order: order.into_iter() }
    }
}

/// An owning in-order iterator over a tree's entries.
pub struct IntoIter<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    order: vec::IntoIter<NodeId>,
}

impl<K, V> IntoIter<K, V> {
    fn take(&mut self, id: NodeId) -> (K, V) {
        let node = self.slots[id].take().expect("node visited twice");
        (node.key, node.value)
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let id = self.order.next()?;
        Some(self.take(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.order.size_hint() }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        let id = self.order.next_back()?;
        Some(self.take(id))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
