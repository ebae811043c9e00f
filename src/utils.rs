use fnv::FnvHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasherDefault, Hash};

type FnvBuildHasher = BuildHasherDefault<FnvHasher>;

/// Sets and maps keyed by grid coordinates, hashed with FNV.
pub type FnvHashSet<T> = HashSet<T, FnvBuildHasher>;
pub type FnvHashMap<K, V> = HashMap<K, V, FnvBuildHasher>;

/// An empty FNV map with room for `capacity` entries, usually one per passage cell.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    FnvHashMap::with_capacity_and_hasher(capacity, FnvBuildHasher::default())
}
