//! Access policy types.
//!
//! A policy has two independent axes, one for reads and one for writes. Each
//! axis is either `Unrestricted` or restricted to an explicit key set. There is
//! no schema behind a policy: it is just the pair of allow-lists currently in
//! force, and it can be replaced at any time.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One axis of an access policy.
///
/// Serializes as an optional key list: `null` for `Unrestricted`, an array of
/// keys for `Restricted`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<BTreeSet<String>>", into = "Option<BTreeSet<String>>")]
pub enum KeyAccess {
    /// Every key is admitted.
    #[default]
    Unrestricted,
    /// Only the listed keys are admitted. An empty set admits nothing.
    Restricted(BTreeSet<String>),
}

impl KeyAccess {
    /// Restrict this axis to exactly `keys`.
    pub fn only<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        KeyAccess::Restricted(keys.into_iter().map(Into::into).collect())
    }

    /// Return true if `key` is admitted by this axis.
    pub fn permits(&self, key: &str) -> bool {
        match self {
            KeyAccess::Unrestricted => true,
            KeyAccess::Restricted(keys) => keys.contains(key),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, KeyAccess::Unrestricted)
    }

    /// Return the subset of `keys` this axis does not admit.
    pub fn rejected<'a, I>(&self, keys: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        keys.into_iter()
            .filter(|key| !self.permits(key))
            .cloned()
            .collect()
    }

    /// The explicit key set, or `None` when unrestricted.
    pub fn keys(&self) -> Option<&BTreeSet<String>> {
        match self {
            KeyAccess::Unrestricted => None,
            KeyAccess::Restricted(keys) => Some(keys),
        }
    }
}

impl From<Option<BTreeSet<String>>> for KeyAccess {
    fn from(keys: Option<BTreeSet<String>>) -> Self {
        match keys {
            None => KeyAccess::Unrestricted,
            Some(keys) => KeyAccess::Restricted(keys),
        }
    }
}

impl From<KeyAccess> for Option<BTreeSet<String>> {
    fn from(access: KeyAccess) -> Self {
        match access {
            KeyAccess::Unrestricted => None,
            KeyAccess::Restricted(keys) => Some(keys),
        }
    }
}

/// The pair of allow-lists governing a tracking container.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessPolicy {
    /// Keys that may be written, added, or removed.
    pub writable: KeyAccess,
    /// Keys that may be read, tested for containment, or iterated.
    pub readable: KeyAccess,
}

impl AccessPolicy {
    pub fn new(writable: KeyAccess, readable: KeyAccess) -> Self {
        Self { writable, readable }
    }

    /// A policy with both axes unrestricted.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn is_unrestricted(&self) -> bool {
        self.writable.is_unrestricted() && self.readable.is_unrestricted()
    }
}
