//! # Linear Probing Hash Map
//!
//! A Rust implementation of an open-addressing hash table with linear probing.
//!
//! `LinearHashMap` keeps every entry in a single vector of slots. A key starts its search at
//! `hash(key) % capacity` and walks forward one slot at a time, wrapping at the end, until it
//! finds itself or an empty slot. There are no tombstones: removing a key takes out the rest
//! of its contiguous run and inserts those entries again, so an empty slot always ends a
//! probe chain.
//!
//! The table grows before an insertion whenever `4 * (len + 1) >= capacity`, rebuilding into
//! `8 * (len + 1)` slots. It never shrinks.
//!
//! ## Basic Usage
//!
//! ```rust
//! use linprobe::{Error, LinearHashMap};
//!
//! // Create a new hash map
//! let mut map = LinearHashMap::new();
//!
//! // Insert values
//! map.insert("apple".to_string(), 1);
//! map.insert("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//! assert_eq!(map.at("cherry"), Err(Error::KeyNotFound));
//!
//! // The first value for a key wins
//! assert!(!map.insert("apple".to_string(), 10));
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Insert a default value on demand
//! *map.get_or_insert_default("cherry".to_string()) += 3;
//! assert_eq!(map.at("cherry"), Ok(&3));
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Custom Hashers
//!
//! Any [`BuildHasher`](std::hash::BuildHasher) can be supplied:
//!
//! ```rust
//! use linprobe::LinearHashMap;
//! use std::collections::hash_map::DefaultHasher;
//! use std::hash::BuildHasherDefault;
//!
//! let hasher = BuildHasherDefault::<DefaultHasher>::default();
//! let map = LinearHashMap::from_iter_with_hasher([(1, "one"), (2, "two")], hasher);
//!
//! let index = map.find(&2).unwrap();
//! assert_eq!(map.slot(index), Some((&2, &"two")));
//! ```

/// Module containing the error type
mod error;
/// Module implementing the iteration views
mod iter;
/// Module implementing the linear probing hash map
mod linear_map;
/// Growth policy constants and checks
pub mod policy;
/// Utility functions and traits for the hash map
mod utils;

pub use error::{Error, Result};
pub use iter::{Cursor, CursorMut, IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use linear_map::LinearHashMap;
pub use utils::HashMapExtensions;
