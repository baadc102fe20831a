//! Utility functions and traits for `LinearHashMap`

use crate::LinearHashMap;
use std::hash::{BuildHasher, Hash};

/// Extension trait for map implementations that copies their contents out
pub trait HashMapExtensions<K, V> {
    /// Returns the keys of the hash map as a Vec, in slot order
    fn keys_vec(&self) -> Vec<K>;

    /// Returns the values of the hash map as a Vec, in slot order
    fn values_vec(&self) -> Vec<V>;

    /// Returns the key-value pairs of the hash map as a Vec, in slot order
    fn entries_vec(&self) -> Vec<(K, V)>;
}

impl<K, V, S> HashMapExtensions<K, V> for LinearHashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn keys_vec(&self) -> Vec<K> {
        self.keys().cloned().collect()
    }

    fn values_vec(&self) -> Vec<V> {
        self.values().cloned().collect()
    }

    fn entries_vec(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}
