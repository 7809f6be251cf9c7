use ::serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use ::serde::ser::{Serialize, SerializeSeq, Serializer};
use compare::Compare;
use std::fmt;
use std::marker::PhantomData;
use super::{TreeMap, TreeSet};

// Upper bound on preallocation from a sequence size hint.
const MAX_PREALLOC: usize = 4096;

impl<K, V, C> Serialize for TreeMap<K, V, C> where K: Serialize, V: Serialize, C: Compare<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for entry in self.iter() { seq.serialize_element(&entry)?; }
        seq.end()
    }
}

impl<'de, K, V, C> Deserialize<'de> for TreeMap<K, V, C>
    where K: Deserialize<'de>, V: Deserialize<'de>, C: Compare<K> + Default {

    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(MapVisitor(PhantomData))
    }
}

struct MapVisitor<K, V, C>(PhantomData<fn() -> (K, V, C)>);

impl<'de, K, V, C> Visitor<'de> for MapVisitor<K, V, C>
    where K: Deserialize<'de>, V: Deserialize<'de>, C: Compare<K> + Default {

    type Value = TreeMap<K, V, C>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sequence of key-value pairs in ascending key order")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(MAX_PREALLOC));
        while let Some(entry) = seq.next_element::<(K, V)>()? { entries.push(entry); }

        TreeMap::from_sorted_iter(C::default(), entries.len(), entries)
            .map_err(de::Error::custom)
    }
}

impl<T, C> Serialize for TreeSet<T, C> where T: Serialize, C: Compare<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T, C> Deserialize<'de> for TreeSet<T, C>
    where T: Deserialize<'de>, C: Compare<T> + Default {

    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SetVisitor(PhantomData))
    }
}

struct SetVisitor<T, C>(PhantomData<fn() -> (T, C)>);

impl<'de, T, C> Visitor<'de> for SetVisitor<T, C>
    where T: Deserialize<'de>, C: Compare<T> + Default {

    type Value = TreeSet<T, C>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sequence of items in ascending order")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(MAX_PREALLOC));
        while let Some(item) = seq.next_element::<T>()? { items.push(item); }

        TreeSet::from_sorted_iter(C::default(), items.len(), items).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::{TreeMap, TreeSet};

    #[test]
    fn map_round_trips_as_pairs() {
        let map: TreeMap<u32, String> =
            vec![(2, "b".to_string()), (1, "a".to_string())].into_iter().collect();

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"[[1,"a"],[2,"b"]]"#);

        let back: TreeMap<u32, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn unsorted_input_is_rejected() {
        let err = serde_json::from_str::<TreeMap<u32, u32>>("[[2,0],[1,0]]").unwrap_err();
        assert!(err.to_string().contains("invalid argument"));

        assert!(serde_json::from_str::<TreeSet<u32>>("[1,1]").is_err());
    }

    #[test]
    fn set_round_trips() {
        let set: TreeSet<i32> = vec![3, -1, 7].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[-1,3,7]");
        assert_eq!(serde_json::from_str::<TreeSet<i32>>(&json).unwrap(), set);
    }
}
