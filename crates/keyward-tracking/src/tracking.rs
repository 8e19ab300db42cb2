//! The policy-checked, write-tracking container.
//!
//! `TrackingContainer` holds the same ordered entry map as `Container`, plus a
//! control block that is never visible as an entry:
//!
//! - `writable`: which keys may be written, added, or removed
//! - `readable`: which keys may be read, tested, or iterated
//! - `dirty`: which keys were written since the policy was last installed
//!
//! Every read and write re-checks the policy in force at call time. Denied
//! operations have no effect on entries or on the dirty set.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use keyward_contracts::{
    error::{AccessKind, AttributeCause, ContainerError, ContainerResult},
    policy::{AccessPolicy, KeyAccess},
    value::Entries,
};
use keyward_core::{container::pop_last, traits::EntryStore, Container};

// ── Control block ─────────────────────────────────────────────────────────────

/// Policy and dirty-set state, kept apart from the user entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Control {
    #[serde(rename = "writable_keys")]
    pub(crate) writable: KeyAccess,
    #[serde(rename = "dirty_keys")]
    pub(crate) dirty: BTreeSet<String>,
    #[serde(rename = "readable_keys")]
    pub(crate) readable: KeyAccess,
}

// ── Container ─────────────────────────────────────────────────────────────────

/// An ordered key/value container that enforces a read/write allow-list and
/// records which keys were written.
///
/// Equality compares entries only. A clone keeps the same policy and starts
/// with a copy of the source's dirty set.
#[derive(Debug, Clone, Default)]
pub struct TrackingContainer {
    pub(crate) entries: Entries,
    pub(crate) control: Control,
}

impl TrackingContainer {
    /// An empty, unrestricted container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a container with an explicit policy and dirty set.
    ///
    /// This is the path deserialization takes to restore saved control state;
    /// `dirty` is installed as given.
    pub fn from_parts(
        entries: Entries,
        writable: KeyAccess,
        readable: KeyAccess,
        dirty: BTreeSet<String>,
    ) -> Self {
        Self {
            entries,
            control: Control {
                writable,
                dirty,
                readable,
            },
        }
    }

    // ── Policy ────────────────────────────────────────────────────────────────

    /// Replace both allow-lists and clear the dirty set.
    pub fn set_allowed_accesses(&mut self, writable: KeyAccess, readable: KeyAccess) {
        debug!(
            writable = ?writable.keys(),
            readable = ?readable.keys(),
            cleared_dirty = self.control.dirty.len(),
            "installing access policy"
        );
        self.control.writable = writable;
        self.control.readable = readable;
        self.control.dirty.clear();
    }

    /// Install `policy`; same semantics as `set_allowed_accesses`.
    pub fn set_policy(&mut self, policy: AccessPolicy) {
        self.set_allowed_accesses(policy.writable, policy.readable);
    }

    pub fn policy(&self) -> AccessPolicy {
        AccessPolicy::new(self.control.writable.clone(), self.control.readable.clone())
    }

    pub fn writable_keys(&self) -> &KeyAccess {
        &self.control.writable
    }

    pub fn readable_keys(&self) -> &KeyAccess {
        &self.control.readable
    }

    /// Keys written since the policy was last installed.
    pub fn dirty_keys(&self) -> &BTreeSet<String> {
        &self.control.dirty
    }

    fn check_read(&self, key: &str) -> ContainerResult<()> {
        if self.control.readable.permits(key) {
            return Ok(());
        }
        warn!(key = %key, kind = %AccessKind::Read, "tracking container denied access");
        Err(ContainerError::denied(AccessKind::Read, key))
    }

    fn check_write(&self, key: &str) -> ContainerResult<()> {
        if self.control.writable.permits(key) {
            return Ok(());
        }
        warn!(key = %key, kind = %AccessKind::Write, "tracking container denied access");
        Err(ContainerError::denied(AccessKind::Write, key))
    }

    fn mark_dirty(&mut self, key: impl Into<String>) {
        self.control.dirty.insert(key.into());
    }

    // ── Reads ─────────────────────────────────────────────────────────────────

    /// Key-style read. Fails with `AccessDenied` (read) when the key is hidden
    /// and `KeyNotFound` when it is absent.
    pub fn item(&self, key: &str) -> ContainerResult<&Value> {
        self.check_read(key)?;
        self.entries
            .get(key)
            .ok_or_else(|| ContainerError::key_not_found(key))
    }

    /// Attribute-style read.
    ///
    /// Unlike `item`, a hidden key is reported as an attribute error with
    /// `AttributeCause::Forbidden`, and an absent one as `Missing`.
    pub fn attr(&self, name: &str) -> ContainerResult<&Value> {
        if !self.control.readable.permits(name) {
            warn!(key = %name, kind = %AccessKind::Read, "tracking container denied attribute");
            return Err(ContainerError::attribute(name, AttributeCause::Forbidden));
        }
        self.entries
            .get(name)
            .ok_or_else(|| ContainerError::attribute(name, AttributeCause::Missing))
    }

    pub fn contains(&self, key: &str) -> ContainerResult<bool> {
        self.check_read(key)?;
        Ok(self.entries.contains_key(key))
    }

    pub fn get(&self, key: &str) -> ContainerResult<Option<&Value>> {
        self.check_read(key)?;
        Ok(self.entries.get(key))
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> ContainerResult<&'a Value> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Readable keys that are present, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.items().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.items().map(|(_, value)| value)
    }

    /// Readable entries, in insertion order.
    pub fn items(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries
            .iter()
            .filter(|(key, _)| self.control.readable.permits(key))
            .map(|(key, value)| (key.as_str(), value))
    }

    // ── Writes ────────────────────────────────────────────────────────────────

    pub fn set_item(&mut self, key: impl Into<String>, value: impl Into<Value>) -> ContainerResult<()> {
        let key = key.into();
        self.check_write(&key)?;
        self.entries.insert(key.clone(), value.into());
        self.mark_dirty(key);
        Ok(())
    }

    /// Attribute-style write; identical to `set_item`.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<Value>) -> ContainerResult<()> {
        self.set_item(name, value)
    }

    pub fn del_item(&mut self, key: &str) -> ContainerResult<()> {
        self.pop(key).map(|_| ())
    }

    /// Remove and return the value under `key`.
    pub fn pop(&mut self, key: &str) -> ContainerResult<Value> {
        self.check_write(key)?;
        let value = self
            .entries
            .shift_remove(key)
            .ok_or_else(|| ContainerError::key_not_found(key))?;
        self.mark_dirty(key);
        Ok(value)
    }

    /// Remove and return the value under `key`, or `default` when absent.
    ///
    /// The key only becomes dirty if an entry was actually removed.
    pub fn pop_or(&mut self, key: &str, default: Value) -> ContainerResult<Value> {
        self.check_write(key)?;
        match self.entries.shift_remove(key) {
            Some(value) => {
                self.mark_dirty(key);
                Ok(value)
            }
            None => Ok(default),
        }
    }

    /// Remove and return the most recently inserted entry.
    ///
    /// Forbidden under any write restriction, because the key to be removed
    /// is not known until the call is made.
    pub fn popitem(&mut self) -> ContainerResult<(String, Value)> {
        if !self.control.writable.is_unrestricted() {
            warn!("popitem denied under write restriction");
            return Err(ContainerError::OperationForbidden {
                operation: "popitem".to_string(),
            });
        }
        let (key, value) = pop_last(&mut self.entries)?;
        self.mark_dirty(key.clone());
        Ok((key, value))
    }

    /// Write every pair in `pairs`, or none of them.
    ///
    /// If any incoming key is outside the write allow-list, nothing is written
    /// and the error names exactly the rejected keys.
    pub fn update<I, K>(&mut self, pairs: I) -> ContainerResult<()>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let incoming: Entries = pairs.into_iter().map(|(k, v)| (k.into(), v)).collect();

        let rejected = self.control.writable.rejected(incoming.keys());
        if !rejected.is_empty() {
            warn!(keys = ?rejected, kind = %AccessKind::Write, "tracking container denied update");
            return Err(ContainerError::AccessDenied {
                kind: AccessKind::Write,
                keys: rejected,
            });
        }

        debug!(count = incoming.len(), "applying update");
        for (key, value) in incoming {
            self.entries.insert(key.clone(), value);
            self.mark_dirty(key);
        }
        Ok(())
    }

    /// Return the value under `key`, inserting `default` first if absent.
    ///
    /// Reading an existing key needs read access; inserting needs write
    /// access and marks the key dirty.
    pub fn setdefault(&mut self, key: impl Into<String>, default: Value) -> ContainerResult<&Value> {
        let key = key.into();
        if !self.entries.contains_key(&key) {
            self.check_write(&key)?;
            self.entries.insert(key.clone(), default);
            self.mark_dirty(key.clone());
        } else {
            self.check_read(&key)?;
        }
        self.entries
            .get(&key)
            .ok_or_else(|| ContainerError::key_not_found(key.as_str()))
    }

    /// Mark `key` dirty after an in-place change and hand back its value.
    ///
    /// Only the write policy is consulted. Nothing is written by this call;
    /// the returned reference is how nested values are edited in place.
    pub fn notify_changed(&mut self, key: &str) -> ContainerResult<&mut Value> {
        self.check_write(key)?;
        if !self.entries.contains_key(key) {
            return Err(ContainerError::key_not_found(key));
        }
        self.mark_dirty(key);
        self.entries
            .get_mut(key)
            .ok_or_else(|| ContainerError::key_not_found(key))
    }

    /// Remove every entry and reset the policy to unrestricted.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.set_allowed_accesses(KeyAccess::Unrestricted, KeyAccess::Unrestricted);
    }
}

impl EntryStore for TrackingContainer {
    fn type_name(&self) -> &'static str {
        "TrackingContainer"
    }

    fn entries(&self) -> &Entries {
        &self.entries
    }
}

impl PartialEq for TrackingContainer {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl PartialEq<Container> for TrackingContainer {
    fn eq(&self, other: &Container) -> bool {
        &self.entries == other.entries()
    }
}

impl fmt::Display for TrackingContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl From<Entries> for TrackingContainer {
    fn from(entries: Entries) -> Self {
        Self {
            entries,
            control: Control::default(),
        }
    }
}

impl From<Container> for TrackingContainer {
    fn from(container: Container) -> Self {
        container.into_entries().into()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for TrackingContainer {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect::<Entries>()
            .into()
    }
}
