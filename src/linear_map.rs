use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    fmt,
    hash::{BuildHasher, Hash},
    iter, mem,
};

use crate::{
    error::{Error, Result},
    iter::{Cursor, CursorMut, IntoIter, Iter, IterMut, Keys, Values, ValuesMut},
    policy,
};

/// A bucket containing a key-value pair
#[derive(Debug, Clone)]
pub(crate) struct Bucket<K, V> {
    /// The key in the key-value pair
    pub(crate) key: K,
    /// The value associated with the key
    pub(crate) value: V,
}

/// Where a probe sequence for a key came to rest
enum Probe {
    /// The key lives in this slot
    Found(usize),
    /// The key is absent and this is the first empty slot of its chain
    Vacant(usize),
}

/// A hash map using open addressing with linear probing.
///
/// Every entry lives directly in a single vector of slots. Lookups walk forward from the
/// key's home slot (`hash % capacity`), wrapping at the end, until they hit the key or an
/// empty slot. Removal never leaves tombstones: the rest of the contiguous run after the
/// removed slot is pulled out and reinserted, so an empty slot always terminates a probe.
///
/// Inserting a key that is already present is a no-op: the first value wins.
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct LinearHashMap<K, V, S = RandomState> {
    /// The slots storing the key-value pairs
    slots: Vec<Option<Bucket<K, V>>>,
    /// Current number of elements in the hash table
    size: usize,
    /// Builds the hasher used to find a key's home slot
    hash_builder: S,
}

impl<K, V> LinearHashMap<K, V, RandomState> {
    /// Creates an empty `LinearHashMap`.
    ///
    /// The map does not allocate until the first insertion.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<K, V, S> LinearHashMap<K, V, S> {
    /// Creates an empty `LinearHashMap` which will use the given hash builder to hash keys
    pub const fn with_hasher(hash_builder: S) -> Self {
        Self { slots: Vec::new(), size: 0, hash_builder }
    }

    /// Returns the number of elements in the hash table
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the hash table is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots in the hash table
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns a reference to the map's hash builder
    #[must_use]
    pub const fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns the current load factor of the hash map, or `0.0` before the first allocation
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        if self.slots.is_empty() { 0.0 } else { self.size as f64 / self.slots.len() as f64 }
    }

    /// Clears the hash map, removing all key-value pairs. The capacity is kept.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.size = 0;
    }

    /// Returns the entry stored in slot `index`, if that slot is occupied
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<(&K, &V)> {
        self.slots.get(index)?.as_ref().map(|bucket| (&bucket.key, &bucket.value))
    }

    /// Returns the entry stored in slot `index` with a mutable view of its value
    pub fn slot_mut(&mut self, index: usize) -> Option<(&K, &mut V)> {
        self.slots.get_mut(index)?.as_mut().map(|bucket| (&bucket.key, &mut bucket.value))
    }

    /// Returns a cursor on the first occupied slot, or [`end`](Self::end) if the map is empty
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, K, V, S> {
        Cursor::first_from(self, 0)
    }

    /// Returns the cursor positioned one past the last slot
    #[must_use]
    pub fn end(&self) -> Cursor<'_, K, V, S> {
        Cursor::first_from(self, self.slots.len())
    }

    /// Returns a mutable cursor on the first occupied slot, or at the end if the map is empty
    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V> {
        CursorMut::first_from(&mut self.slots, 0)
    }

    /// Returns an iterator over the key-value pairs in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.slots, self.size)
    }

    /// Returns an iterator over the key-value pairs with mutable values, in slot order
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.slots, self.size)
    }

    /// Returns an iterator over the keys in slot order
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over the values in slot order
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Returns an iterator over mutable references to the values in slot order
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.iter_mut())
    }

    /// Raw view of the slots for cursors
    pub(crate) fn slots(&self) -> &[Option<Bucket<K, V>>] {
        &self.slots
    }

    /// Gets the slot that follows `index`, wrapping to the start of the table
    fn next_index(&self, index: usize) -> usize {
        let next = index.saturating_add(1);
        if next >= self.slots.len() { 0 } else { next }
    }
}

impl<K, V, S> LinearHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Creates a `LinearHashMap` from key-value pairs using the given hash builder.
    ///
    /// Pairs are inserted in order, so for a repeated key the first pair wins.
    pub fn from_iter_with_hasher<I>(iter: I, hash_builder: S) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::with_hasher(hash_builder);
        map.extend(iter);
        map
    }

    /// Gets the home slot for a key, or `None` while the table has no slots
    #[allow(clippy::cast_possible_truncation)]
    fn home_index<Q: ?Sized + Hash>(&self, key: &Q) -> Option<usize> {
        let capacity = u64::try_from(self.slots.len()).ok()?;
        // The remainder is below `capacity`, which came from a `usize`
        self.hash_builder.hash_one(key).checked_rem(capacity).map(|index| index as usize)
    }

    /// Walks the probe chain of `key` until it finds the key or an empty slot
    fn probe<Q>(&self, key: &Q) -> Option<Probe>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut index = self.home_index(key)?;

        for _ in 0..self.slots.len() {
            match self.slots.get(index)? {
                None => return Some(Probe::Vacant(index)),
                Some(bucket) if bucket.key.borrow() == key => return Some(Probe::Found(index)),
                Some(_) => index = self.next_index(index),
            }
        }

        // Only reachable for a completely full table, which the growth policy rules out
        None
    }

    /// Places a key-value pair unless the key is already present.
    ///
    /// Returns the slot holding the key and whether the pair was newly inserted.
    fn place(&mut self, key: K, value: V) -> Option<(usize, bool)> {
        if policy::needs_growth(self.size, self.slots.len()) {
            self.rebuild(policy::grown_capacity(self.size));
        }

        match self.probe(&key)? {
            Probe::Found(index) => Some((index, false)),
            Probe::Vacant(index) => {
                let slot = self.slots.get_mut(index)?;
                *slot = Some(Bucket { key, value });
                self.size = self.size.saturating_add(1);
                Some((index, true))
            }
        }
    }

    /// Insert a key-value pair into the hash table.
    ///
    /// Returns `true` if the pair was inserted. If the key is already present the map is left
    /// untouched, the given value is dropped and `false` is returned.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.place(key, value).is_some_and(|(_, inserted)| inserted)
    }

    /// Moves every entry into a fresh table of `capacity` slots, in ascending slot order
    fn rebuild(&mut self, capacity: usize) {
        let old_slots = mem::replace(&mut self.slots, empty_slots(capacity));
        self.size = 0;

        for bucket in old_slots.into_iter().flatten() {
            self.insert(bucket.key, bucket.value);
        }
    }

    /// Returns the index of the slot holding `key`
    pub fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.probe(key)? {
            Probe::Found(index) => Some(index),
            Probe::Vacant(_) => None,
        }
    }

    /// Returns a cursor on the slot holding `key`, or [`end`](Self::end) if it is absent
    pub fn find_cursor<Q>(&self, key: &Q) -> Cursor<'_, K, V, S>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map_or_else(|| self.end(), |index| Cursor::first_from(self, index))
    }

    /// Returns a mutable cursor on the slot holding `key`, or one at the end if it is absent
    pub fn find_cursor_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key).unwrap_or(self.slots.len());
        CursorMut::first_from(&mut self.slots, index)
    }

    /// Retrieve a value for a given key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Retrieve the stored key and its value for a given key
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slot(self.find(key)?)
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key)?;
        self.slot_mut(index).map(|(_, value)| value)
    }

    /// Returns true if the map contains the given key
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Retrieve a value for a given key, failing with [`Error::KeyNotFound`] if it is absent
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] when the map does not contain `key`.
    pub fn at<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns the value for `key`, inserting `V::default()` first if the key is absent
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Returns the value for `key`, inserting the result of `default` first if the key is
    /// absent. An existing value is left unchanged and `default` is not called.
    ///
    /// # Panics
    ///
    /// Never in practice: `place` grows the table before probing, so the key always ends up
    /// in a slot.
    #[allow(clippy::expect_used)]
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let index = self
            .find(&key)
            .or_else(|| self.place(key, default()).map(|(index, _)| index));

        let bucket = index.and_then(|index| self.slots.get_mut(index)).and_then(Option::as_mut);
        &mut bucket.expect("placed key occupies its slot").value
    }

    /// Removes a key from the map, returning its value if it was present
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if it was present.
    ///
    /// Every entry in the contiguous run after the removed slot is taken out and inserted
    /// again, so no entry is left behind an empty slot that would cut its probe chain.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut index = self.home_index(key)?;
        let mut removed = None;
        let mut displaced = Vec::new();

        for _ in 0..self.slots.len() {
            let is_target = match self.slots.get(index) {
                Some(Some(bucket)) => removed.is_none() && bucket.key.borrow() == key,
                _ => break,
            };

            let taken = if is_target || removed.is_some() {
                self.slots.get_mut(index).and_then(Option::take)
            } else {
                None
            };
            if let Some(bucket) = taken {
                self.size = self.size.saturating_sub(1);
                if is_target {
                    removed = Some((bucket.key, bucket.value));
                } else {
                    displaced.push(bucket);
                }
            }

            index = self.next_index(index);
        }

        for bucket in displaced {
            self.insert(bucket.key, bucket.value);
        }

        removed
    }

    /// Returns how many slots a lookup of `key` examines, or `None` if the key is absent.
    ///
    /// A key sitting in its home slot has a probe length of 1.
    pub fn probe_length<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let home = self.home_index(key)?;
        let index = self.find(key)?;
        let distance = if index >= home {
            index.saturating_sub(home)
        } else {
            self.slots.len().saturating_sub(home).saturating_add(index)
        };
        Some(distance.saturating_add(1))
    }
}

/// Allocates `capacity` empty slots
fn empty_slots<K, V>(capacity: usize) -> Vec<Option<Bucket<K, V>>> {
    iter::repeat_with(|| None).take(capacity).collect()
}

impl<K, V, S> Default for LinearHashMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> fmt::Debug for LinearHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for LinearHashMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V, S> Eq for LinearHashMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Extend<(K, V)> for LinearHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for LinearHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_iter_with_hasher(iter, S::default())
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for LinearHashMap<K, V, RandomState>
where
    K: Eq + Hash,
{
    fn from(pairs: [(K, V); N]) -> Self {
        Self::from_iter_with_hasher(pairs, RandomState::new())
    }
}

impl<'a, K, V, S> IntoIterator for &'a LinearHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut LinearHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for LinearHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.slots, self.size)
    }
}


#[cfg(test)]
mod proptests {
    use super::{BuildHasher, LinearHashMap, RandomState, policy};
    use proptest::{prelude::*, test_runner::TestCaseError};
    use std::{
        collections::{HashMap, HashSet},
        hash::{BuildHasherDefault, Hasher},
    };

    /// Maps keys onto only a handful of hash values to force long runs
    #[derive(Default)]
    struct ClusteringHasher(u64);

    impl Hasher for ClusteringHasher {
        fn finish(&self) -> u64 {
            self.0 % 3
        }

        fn write(&mut self, bytes: &[u8]) {
            for &byte in bytes {
                self.0 = self.0.wrapping_mul(31).wrapping_add(u64::from(byte));
            }
        }
    }

    /// A single step applied to both the map and the model
    #[derive(Debug, Clone)]
    enum Op {
        Insert(u16, u32),
        Remove(u16),
        GetOrDefault(u16),
        Clear,
    }

    /// Inserts dominate so the table keeps growing between removals
    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (0u16..64, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
            4 => (0u16..64).prop_map(Op::Remove),
            1 => (0u16..64).prop_map(Op::GetOrDefault),
            1 => Just(Op::Clear),
        ]
    }

    /// Runs `ops` against a fresh map and a `HashMap` with first-insert-wins semantics
    fn check_against_model<S: BuildHasher>(
        hash_builder: S,
        ops: Vec<Op>,
    ) -> std::result::Result<(), TestCaseError> {
        let mut map = LinearHashMap::with_hasher(hash_builder);
        let mut model: HashMap<u16, u32> = HashMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let expected = !model.contains_key(&k);
                    model.entry(k).or_insert(v);
                    prop_assert_eq!(map.insert(k, v), expected);
                    prop_assert!(policy::LOAD_DENOMINATOR * map.len() < map.capacity());
                }
                Op::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k));
                    prop_assert_eq!(map.find(&k), None);
                    prop_assert_eq!(map.remove(&k), None);
                }
                Op::GetOrDefault(k) => {
                    let expected = *model.entry(k).or_default();
                    prop_assert_eq!(*map.get_or_insert_default(k), expected);
                }
                Op::Clear => {
                    map.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(map.len(), model.len());
        }

        for (k, v) in &model {
            let index = map.find(k);
            prop_assert!(index.is_some());
            prop_assert_eq!(index.and_then(|index| map.slot(index)), Some((k, v)));
            prop_assert_eq!(map.at(k), Ok(v));
        }

        let visited: Vec<u16> = map.keys().copied().collect();
        let unique: HashSet<u16> = visited.iter().copied().collect();
        prop_assert_eq!(visited.len(), unique.len());
        prop_assert_eq!(unique, model.keys().copied().collect::<HashSet<_>>());
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_matches_std_hashmap(ops in proptest::collection::vec(op_strategy(), 1..200)) {
            check_against_model(RandomState::new(), ops)?;
        }

        #[test]
        fn prop_matches_std_hashmap_with_clustered_hashes(
            ops in proptest::collection::vec(op_strategy(), 1..200),
        ) {
            check_against_model(BuildHasherDefault::<ClusteringHasher>::default(), ops)?;
        }

        #[test]
        fn prop_remove_preserves_other_entries(
            keys in proptest::collection::hash_set(any::<u32>(), 1..100),
            pick in any::<prop::sample::Index>(),
        ) {
            let keys: Vec<u32> = keys.into_iter().collect();
            let map_keys = keys.iter().map(|&k| (k, u64::from(k) * 3));
            let mut map: LinearHashMap<u32, u64> = map_keys.collect();
            let victim = *pick.get(&keys);

            prop_assert_eq!(map.remove(&victim), Some(u64::from(victim) * 3));
            prop_assert_eq!(map.find(&victim), None);
            for &k in keys.iter().filter(|&&k| k != victim) {
                prop_assert_eq!(map.get(&k), Some(&(u64::from(k) * 3)));
            }
            prop_assert_eq!(map.len(), keys.len() - 1);
        }
    }
}
