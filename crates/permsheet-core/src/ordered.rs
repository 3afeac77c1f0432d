//! Insertion-ordered string-keyed map.

use std::collections::HashMap;

/// A map that iterates in first-insertion order.
///
/// Re-inserting an existing key replaces its value but keeps the position of
/// the first insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedIndex<V> {
    entries: Vec<(String, V)>,
    positions: HashMap<String, usize>,
}

impl<V> Default for OrderedIndex<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<V> OrderedIndex<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.positions.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Mutable access to the value for `key`, inserting `default()` first if absent.
    pub fn get_or_insert_with(&mut self, key: &str, default: impl FnOnce() -> V) -> &mut V {
        let pos = match self.positions.get(key) {
            Some(&pos) => pos,
            None => {
                let pos = self.entries.len();
                self.positions.insert(key.to_string(), pos);
                self.entries.push((key.to_string(), default()));
                pos
            }
        };
        &mut self.entries[pos].1
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.positions.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}
