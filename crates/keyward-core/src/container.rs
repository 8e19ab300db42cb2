//! The unrestricted base container.
//!
//! `Container` is an ordered key/value map whose entries can be addressed
//! either by key (`item`, `set_item`) or by attribute name (`attr`,
//! `set_attr`). Both surfaces resolve to the same storage.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use keyward_contracts::{
    error::{AttributeCause, ContainerError, ContainerResult},
    value::Entries,
};

use crate::traits::EntryStore;

/// An ordered, unrestricted key/value container.
///
/// Equality compares entries only and ignores insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Container {
    entries: Entries,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a container holding every key in `keys`, each mapped to `value`.
    pub fn from_keys<I, K>(keys: I, value: Value) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        keys.into_iter().map(|k| (k.into(), value.clone())).collect()
    }

    // ── Subscript surface ─────────────────────────────────────────────────────

    /// Return the value stored under `key`.
    pub fn item(&self, key: &str) -> ContainerResult<&Value> {
        self.entries
            .get(key)
            .ok_or_else(|| ContainerError::key_not_found(key))
    }

    /// Insert or overwrite `key`. A new key goes to the end of the order.
    pub fn set_item(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Remove `key`, failing with `KeyNotFound` if absent.
    pub fn del_item(&mut self, key: &str) -> ContainerResult<()> {
        self.pop(key).map(|_| ())
    }

    // ── Attribute surface ─────────────────────────────────────────────────────

    /// Attribute-style read; resolves against the same entries as `item`.
    pub fn attr(&self, name: &str) -> ContainerResult<&Value> {
        self.entries
            .get(name)
            .ok_or_else(|| ContainerError::attribute(name, AttributeCause::Missing))
    }

    /// Attribute-style write; identical to `set_item`.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.set_item(name, value);
    }

    // ── Mapping operations ────────────────────────────────────────────────────

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Return the value under `key`, or `default` when absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.entries.get(key).unwrap_or(default)
    }

    /// Mutable access for in-place edits of nested values.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Return the value under `key`, inserting `default` first if absent.
    pub fn setdefault(&mut self, key: impl Into<String>, default: Value) -> &mut Value {
        self.entries.entry(key.into()).or_insert(default)
    }

    /// Remove and return the value under `key`.
    pub fn pop(&mut self, key: &str) -> ContainerResult<Value> {
        self.entries
            .shift_remove(key)
            .ok_or_else(|| ContainerError::key_not_found(key))
    }

    /// Remove and return the value under `key`, or `default` when absent.
    pub fn pop_or(&mut self, key: &str, default: Value) -> Value {
        self.entries.shift_remove(key).unwrap_or(default)
    }

    /// Remove and return the most recently inserted entry.
    pub fn popitem(&mut self) -> ContainerResult<(String, Value)> {
        pop_last(&mut self.entries)
    }

    /// Merge `pairs` into the container, overwriting existing keys.
    pub fn update<I, K>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        for (key, value) in pairs {
            self.entries.insert(key.into(), value);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    pub fn items(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consume the container and return its entries.
    pub fn into_entries(self) -> Entries {
        self.entries
    }
}

/// Remove the last entry of `entries` in insertion order.
pub fn pop_last(entries: &mut Entries) -> ContainerResult<(String, Value)> {
    let key = entries
        .keys()
        .next_back()
        .cloned()
        .ok_or(ContainerError::EmptyContainer)?;
    let value = entries
        .shift_remove(&key)
        .ok_or_else(|| ContainerError::key_not_found(key.as_str()))?;
    Ok((key, value))
}

impl EntryStore for Container {
    fn type_name(&self) -> &'static str {
        "Container"
    }

    fn entries(&self) -> &Entries {
        &self.entries
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl From<Entries> for Container {
    fn from(entries: Entries) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Container {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut container = Container::new();
        container.update(iter);
        container
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
