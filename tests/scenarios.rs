use compare::{natural, Compare};
use rbmap::{Entries, Error, Keys, TreeMap, TreeSet, Values};
use std::ops::Bound::{Excluded, Included};

fn keys<C: Compare<i32>>(map: &TreeMap<i32, &str, C>) -> Vec<i32> { map.keys().cloned().collect() }

#[test]
fn scattered_insertions_traverse_in_order() {
    let mut map = TreeMap::new();
    for k in [5, 3, 8, 1, 4, 7, 9] { map.insert(k, "x"); }

    assert_eq!(keys(&map), [1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(map.len(), 7);
}

#[test]
fn bulk_build_reports_ends() {
    let map = TreeMap::from_sorted_iter(natural(), 5, (1..=5).map(|k| (k, "x"))).unwrap();

    assert_eq!(map.first_key(), Ok(&1));
    assert_eq!(map.last_key(), Ok(&5));
    assert_eq!(map.len(), 5);
}

#[test]
fn removing_every_key_in_turn() {
    let mut map = TreeMap::from_sorted_iter(natural(), 7, (1..=7).map(|k| (k, "x"))).unwrap();

    for k in [4, 2, 6, 1, 3, 5, 7] {
        let before = keys(&map);
        assert_eq!(map.remove(&k), Some("x"));

        let expected: Vec<_> = before.into_iter().filter(|&b| b != k).collect();
        assert_eq!(keys(&map), expected);
    }

    assert!(map.is_empty());
    assert_eq!(map.first_key(), Err(Error::NoSuchElement));
}

#[test]
fn cursor_fails_fast_after_direct_insert() {
    let mut map = TreeMap::new();
    for k in [1, 3, 5] { map.insert(k, "x"); }

    let mut cursor = map.cursor::<Keys>();
    assert_eq!(cursor.next(&map), Ok(Some(&1)));

    map.insert(2, "y");

    match cursor.next(&map) {
        Err(Error::ConcurrentModification { expected, found }) => assert!(found != expected),
        other => panic!("expected a concurrent modification, got {:?}", other),
    }
}

#[test]
fn sub_map_iterates_and_rejects_out_of_range_puts() {
    let mut map: TreeMap<_, _> = (1..=6).map(|k| (k, "x")).collect();

    {
        let mut sub = map.sub_map(2, 5).unwrap();
        assert_eq!(sub.iter().map(|e| *e.0).collect::<Vec<_>>(), [2, 3, 4]);
        assert!(matches!(sub.insert(6, "y"), Err(Error::InvalidArgument(_))));
        assert_eq!(sub.insert(3, "z"), Ok(Some("x")));
    }

    assert_eq!(map.get(&6), Some(&"x"));
    assert_eq!(map.get(&3), Some(&"z"));
}

#[test]
fn views_write_through() {
    let mut map: TreeMap<_, _> = (1..=6).map(|k| (k, k * 10)).collect();

    assert_eq!(map.key_set().remove(&1), Some(1));
    assert!(map.value_collection().remove(&20));
    assert_eq!(map.entry_set().remove(&3, &30), Some((3, 30)));
    assert_eq!(map.entry_set().remove(&4, &0), None);

    assert_eq!(map.to_sorted_vec(), [(4, 40), (5, 50), (6, 60)]);

    map.view::<Values>().retain(|_, v| { *v += 1; *v != 51 });
    assert_eq!(map.to_sorted_vec(), [(4, 41), (6, 61)]);
}

#[test]
fn tail_view_cursor_removes_everything_in_range() {
    let mut map: TreeMap<_, _> = (1..=10).map(|k| (k, ())).collect();

    let mut cursor = map.tail_map(6).cursor::<Entries>();
    while cursor.has_next() {
        cursor.next(&map).unwrap();
        cursor.remove(&mut map).unwrap();
    }

    assert_eq!(map.keys().cloned().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
}

#[test]
fn narrowed_views_stay_inside_parent() {
    let mut map: TreeMap<_, _> = (1..=10).map(|k| (k, ())).collect();

    let sub = map.sub_map(2, 9).unwrap();
    assert!(matches!(sub.head_map(10), Err(Error::InvalidArgument(_))));

    let sub = map.sub_map(2, 9).unwrap().tail_map(4).unwrap().head_map(7).unwrap();
    assert_eq!(sub.len(), 3);
    assert_eq!(sub.first_key(), Ok(&4));
    assert_eq!(sub.last_key(), Ok(&6));
}

#[test]
fn range_with_mixed_bounds() {
    let map: TreeMap<_, _> = (1..=6).map(|k| (k, "x")).collect();
    let keys: Vec<_> = map.range(Excluded(&1), Included(&4)).map(|e| *e.0).collect();
    assert_eq!(keys, [2, 3, 4]);
}

#[test]
fn set_follows_custom_order() {
    let mut set = TreeSet::with_cmp(natural().rev());
    set.extend(vec![3, 1, 4, 1, 5, 9, 2, 6]);

    assert_eq!(set.len(), 7);
    assert_eq!(set.first(), Ok(&9));
    assert_eq!(set.last(), Ok(&1));
    assert_eq!(set.iter().cloned().collect::<Vec<_>>(), [9, 6, 5, 4, 3, 2, 1]);
}
