//! # Hashing
//!
//! `ahash` is used for all hash based collections of this crate. Node identifiers are
//! short strings, for which `ahash` performs noticeably better than the default SipHash.
//!
//! `hashbrown` is used as it supports some APIs which are still unstable on
//! `std::collections::HashMap`.
pub use ahash::RandomState;

pub type HashMap<K, V> = hashbrown::HashMap<K, V, RandomState>;
pub type HashSet<V> = hashbrown::HashSet<V, RandomState>;
pub type IndexMap<K, V> = indexmap::IndexMap<K, V, RandomState>;
