//! An associative container keyed by structural content rather than identity:
//! the caller supplies a hash function (producing a string bucket key) and an
//! equality predicate, and entries whose keys hash together are resolved by a
//! linear scan with that predicate.

use std::collections::HashMap;

/// A map with caller-supplied hash and equals functions. The caller must keep
/// the two consistent: `hash(a) == hash(b)` whenever `equals(a, b)` holds.
/// Violating that causes missed lookups, not crashes.
pub struct StructuralDict<K, V> {
    buckets: HashMap<String, Vec<(K, V)>>,
    hash: fn(&K) -> String,
    equals: fn(&K, &K) -> bool,
}

impl<K, V> StructuralDict<K, V> {
    pub fn new(hash: fn(&K) -> String, equals: fn(&K, &K) -> bool) -> StructuralDict<K, V> {
        return StructuralDict {
            buckets: HashMap::new(),
            hash,
            equals,
        };
    }

    /// Same as `get`, but with a precomputed hash for the key. Useful for
    /// callers that already computed the structural hash for another purpose
    /// and want to avoid doing so twice.
    pub fn hint_get(&self, key: &K, precomputed_hash: &str) -> Option<&V> {
        let entries = self.buckets.get(precomputed_hash)?;

        for (entry_key, entry_value) in entries {
            if (self.equals)(key, entry_key) {
                return Some(entry_value);
            }
        }

        return None;
    }

    /// Returns the value whose stored key is `equals`-equivalent to `key`,
    /// if any.
    pub fn get(&self, key: &K) -> Option<&V> {
        return self.hint_get(key, (self.hash)(key).as_str());
    }

    /// If `value` is `Some`, inserts or overwrites the entry for an
    /// `equals`-equivalent key and returns the displaced (key, value) pair if
    /// one existed. If `value` is `None`, deletes an `equals`-equivalent
    /// entry and returns the removed pair, or returns `None` as a no-op.
    /// Bucket insertion order is preserved on overwrite.
    pub fn set(&mut self, key: K, value: Option<V>) -> Option<(K, V)> {
        let hash = (self.hash)(&key);

        if !self.buckets.contains_key(hash.as_str()) {
            if let Some(value) = value {
                self.buckets.insert(hash, vec![(key, value)]);
            }
            return None;
        }

        let entries = self
            .buckets
            .get_mut(hash.as_str())
            .expect("Unable to get bucket that contains_key just reported.");

        for idx in 0..entries.len() {
            if (self.equals)(&key, &entries[idx].0) {
                match value {
                    Some(value) => {
                        let displaced = std::mem::replace(&mut entries[idx], (key, value));
                        return Some(displaced);
                    }
                    None => {
                        return Some(entries.remove(idx));
                    }
                };
            }
        }

        if let Some(value) = value {
            entries.push((key, value));
        }

        return None;
    }
}
