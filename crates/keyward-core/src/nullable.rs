//! A container whose missing lookups return the null sentinel.

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use keyward_contracts::{
    error::{AttributeCause, ContainerError, ContainerResult},
    value::{is_reserved_name, Entries},
};

use crate::{container::Container, null::Nullable, traits::EntryStore};

/// A `Container` whose reads never fail on absent keys.
///
/// Key and attribute reads return the stored value only when it is present
/// and truthy; otherwise they return the null sentinel. A falsy value such as
/// `0` or `""` therefore reads as the sentinel, while `contains` still reports
/// that the key is present. All other operations come from `Container`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NullableContainer {
    inner: Container,
}

impl NullableContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key-style read. Absent or falsy values read as the sentinel.
    pub fn item(&self, key: &str) -> Nullable<'_> {
        Nullable::from_lookup(self.inner.get(key))
    }

    /// Attribute-style read. Reserved `__dunder__` names are never resolved.
    pub fn attr(&self, name: &str) -> ContainerResult<Nullable<'_>> {
        if is_reserved_name(name) {
            return Err(ContainerError::attribute(name, AttributeCause::Reserved));
        }
        Ok(self.item(name))
    }

    pub fn into_inner(self) -> Container {
        self.inner
    }
}

impl Deref for NullableContainer {
    type Target = Container;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for NullableContainer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl EntryStore for NullableContainer {
    fn type_name(&self) -> &'static str {
        "NullableContainer"
    }

    fn entries(&self) -> &Entries {
        self.inner.entries()
    }
}

impl fmt::Display for NullableContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl From<Container> for NullableContainer {
    fn from(inner: Container) -> Self {
        Self { inner }
    }
}

impl From<Entries> for NullableContainer {
    fn from(entries: Entries) -> Self {
        Container::from(entries).into()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for NullableContainer {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Container::from_iter(iter).into()
    }
}
