use compare::{natural, Compare};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use std::collections::BTreeMap;
use crate::{Error, TreeMap};
use super::{red_level, Color, Iter, Link, Tree};

/// Asserts every structural invariant of the tree and returns its black-height.
///
/// Checked: the root is black, no red node has a red child, every path from a node to its
/// leaves crosses the same number of black nodes, parent links mirror child links, keys ascend
/// strictly in order, and the cached length matches the node count.
pub fn check<K, V, C>(tree: &Tree<K, V>, cmp: &C) -> usize where C: Compare<K> {
    fn walk<K, V>(tree: &Tree<K, V>, link: Link, parent: Link, count: &mut usize) -> usize {
        let Some(id) = link else { return 1 };
        let node = tree.node(id);
        *count += 1;

        assert_eq!(node.parent, parent, "parent link of node {} is stale", id);

        if node.color == Color::Red {
            let red_child = tree.is_red(node.left) || tree.is_red(node.right);
            assert!(!red_child, "red node {} has a red child", id);
        }

        let left = walk(tree, node.left, link, count);
        let right = walk(tree, node.right, link, count);
        assert_eq!(left, right, "black-heights differ below node {}", id);

        left + (node.color == Color::Black) as usize
    }

    assert!(!tree.is_red(tree.root()), "red root");

    let mut count = 0;
    let black_height = walk(tree, tree.root(), None, &mut count);
    assert_eq!(count, tree.len());

    let keys: Vec<&K> = Iter::new(tree).map(|n| &n.key).collect();
    assert_eq!(keys.len(), tree.len());
    assert!(keys.windows(2).all(|w| cmp.compares_lt(w[0], w[1])), "keys out of order");

    black_height
}

fn height<K, V>(tree: &Tree<K, V>, link: Link) -> usize {
    match link {
        None => 0,
        Some(id) => {
            let node = tree.node(id);
            1 + height(tree, node.left).max(height(tree, node.right))
        }
    }
}

/// An operation on a `TreeMap` and its model.
#[derive(Clone, Debug)]
enum Op {
    Insert(u8, u32),
    Remove(u8),
    /// Remove the key at index `n % map.len()`.
    RemoveNth(usize),
}

impl Arbitrary for Op {
    fn arbitrary(gen: &mut Gen) -> Op {
        match u8::arbitrary(gen) % 3 {
            0 => Op::Remove(u8::arbitrary(gen)),
            1 => Op::RemoveNth(usize::arbitrary(gen)),
            _ => Op::Insert(u8::arbitrary(gen), u32::arbitrary(gen)),
        }
    }
}

impl Op {
    fn exec(self, map: &mut TreeMap<u8, u32>, model: &mut BTreeMap<u8, u32>) {
        match self {
            Op::Insert(k, v) => assert_eq!(map.insert(k, v), model.insert(k, v)),
            Op::Remove(k) => assert_eq!(map.remove(&k), model.remove(&k)),
            Op::RemoveNth(n) => if !model.is_empty() {
                let k = *model.keys().nth(n % model.len()).unwrap();
                assert_eq!(map.remove_entry(&k), model.remove_entry(&k));
            },
        }
    }
}

#[quickcheck]
fn random_operations_keep_invariants(ops: Vec<Op>) -> bool {
    let mut map = TreeMap::new();
    let mut model = BTreeMap::new();

    for op in ops {
        op.exec(&mut map, &mut model);
        check(map.tree(), map.cmp());
    }

    map.iter().eq(model.iter())
}

#[quickcheck]
fn lookups_agree_with_model(entries: Vec<(u8, u32)>, probe: u8) -> bool {
    let map: TreeMap<_, _> = entries.iter().cloned().collect();
    let model: BTreeMap<_, _> = entries.into_iter().collect();

    map.get(&probe) == model.get(&probe)
        && map.succ(&probe, true) == model.range(probe..).next()
        && map.pred(&probe, false) == model.range(..probe).next_back()
        && map.min_entry() == model.iter().next()
        && map.max_entry() == model.iter().next_back()
}

#[test]
fn bulk_build_is_balanced_for_every_small_size() {
    let cmp = natural::<usize>();

    for size in 0..300 {
        let tree = Tree::from_sorted(&cmp, size, (0..size).map(|i| (i, ()))).unwrap();
        check(&tree, &cmp);
        assert_eq!(tree.len(), size);
        assert!(Iter::new(&tree).map(|n| n.key).eq(0..size));
    }
}

#[test]
fn bulk_build_rejects_bad_input() {
    let cmp = natural::<i32>();

    let short = Tree::from_sorted(&cmp, 3, vec![(1, ()), (2, ())]);
    assert!(matches!(short, Err(Error::InvalidArgument(_))));

    let long = Tree::from_sorted(&cmp, 1, vec![(1, ()), (2, ())]);
    assert!(matches!(long, Err(Error::InvalidArgument(_))));

    let unsorted = Tree::from_sorted(&cmp, 3, vec![(1, ()), (3, ()), (2, ())]);
    assert!(matches!(unsorted, Err(Error::InvalidArgument(_))));

    let duplicate = Tree::from_sorted(&cmp, 2, vec![(1, ()), (1, ())]);
    assert!(matches!(duplicate, Err(Error::InvalidArgument(_))));
}

#[test]
fn oversized_declared_size_is_rejected() {
    let cmp = natural::<i32>();

    for size in [usize::MAX / 2, usize::MAX] {
        let tree = Tree::from_sorted(&cmp, size, vec![(1, ())]);
        assert!(matches!(tree, Err(Error::InvalidArgument(_))));
    }

    let map = TreeMap::from_sorted_iter(natural::<i32>(), usize::MAX / 2, (0..3).map(|i| (i, ())));
    assert!(matches!(map, Err(Error::InvalidArgument(_))));
}

#[test]
fn red_level_is_one_past_last_full_level() {
    let levels: Vec<_> = [0, 1, 2, 3, 4, 7, 8].iter().map(|&n| red_level(n)).collect();
    assert_eq!(levels, [0, 1, 1, 2, 2, 3, 3]);
    assert_eq!(red_level(usize::MAX), usize::BITS as usize);
}

#[test]
fn ascending_insertions_stay_logarithmic() {
    let mut map = TreeMap::new();
    for i in 0..1000 { map.insert(i, ()); }

    check(map.tree(), map.cmp());
    let h = height(map.tree(), map.tree().root());
    assert!(h <= 2 * 10, "height {} exceeds 2 log2(1001)", h);
}

#[test]
fn two_child_removal_relocates_successor() {
    let cmp = natural::<i32>();
    let mut tree = Tree::from_sorted(&cmp, 7, (0..7).map(|i| (i, ()))).unwrap();
    let root = tree.root().unwrap();
    let successor = tree.successor(root);
    assert_eq!(tree.node(root).key, 3);

    let removed = tree.remove_node(root);
    assert_eq!(removed.key, 3);
    assert_eq!(removed.relocate(successor), Some(root));
    assert_eq!(tree.node(root).key, 4);
    check(&tree, &cmp);
}

#[test]
fn freed_slots_are_reused() {
    let cmp = natural::<i32>();
    let mut tree = Tree::new();
    for i in 0..4 { tree.insert(&cmp, i, ()); }

    let id = tree.find(&cmp, &0).unwrap();
    tree.remove_node(id);
    tree.insert(&cmp, 10, ());

    assert_eq!(tree.find(&cmp, &10), Some(id));
    assert_eq!(tree.slots.len(), 4);
    check(&tree, &cmp);
}

#[test]
fn each_insertion_keeps_invariants() {
    let mut map = TreeMap::new();

    for k in [5, 3, 8, 1, 4, 7, 9] {
        map.insert(k, ());
        check(map.tree(), map.cmp());
    }

    assert_eq!(map.keys().cloned().collect::<Vec<_>>(), [1, 3, 4, 5, 7, 8, 9]);
}

#[test]
fn ascending_seven_is_not_a_list() {
    let mut map = TreeMap::new();
    for k in 1..=7 { map.insert(k, ()); }

    let h = height(map.tree(), map.tree().root());
    assert!(h <= 2 * 3, "height {}", h);

    let bulk = Tree::from_sorted(&natural::<i32>(), 7, (1..=7).map(|k| (k, ()))).unwrap();
    assert_eq!(height(&bulk, bulk.root()), 3);
}

#[test]
fn removing_root_of_seven_nodes() {
    let mut map = TreeMap::from_sorted_iter(natural::<i32>(), 7, (1..=7).map(|k| (k, ()))).unwrap();
    let root = map.tree().node(map.tree().root().unwrap()).key;

    assert_eq!(map.remove(&root), Some(()));
    check(map.tree(), map.cmp());

    let expected: Vec<_> = (1..=7).filter(|&k| k != root).collect();
    assert_eq!(map.keys().cloned().collect::<Vec<_>>(), expected);
}
