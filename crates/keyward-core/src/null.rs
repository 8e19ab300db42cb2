//! The null sentinel and the lookup result of nullable reads.
//!
//! `NullObject` absorbs every further key or attribute read, renders as the
//! empty string, and is always falsy, so a chain of lookups on an absent path
//! (`n.missing.child.grandchild`) degrades to the sentinel instead of failing.

use std::fmt;

use serde_json::Value;

use keyward_contracts::{
    error::{AttributeCause, ContainerError, ContainerResult},
    value::{is_reserved_name, is_truthy},
};

/// The stateless null sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NullObject;

/// The single sentinel value handed out by nullable lookups.
pub const UNDEFINED: NullObject = NullObject;

impl NullObject {
    /// Any attribute read returns the sentinel, except reserved names.
    pub fn attr(&self, name: &str) -> ContainerResult<NullObject> {
        if is_reserved_name(name) {
            return Err(ContainerError::attribute(name, AttributeCause::Reserved));
        }
        Ok(UNDEFINED)
    }

    /// Any key read returns the sentinel.
    pub fn item(&self, _key: &str) -> NullObject {
        UNDEFINED
    }

    /// The sentinel cannot be mutated.
    pub fn set_attr(&self, name: &str, _value: Value) -> ContainerResult<()> {
        Err(ContainerError::UnsupportedOperation {
            reason: format!("cannot set attribute '{name}' of the null sentinel"),
        })
    }

    pub fn is_truthy(&self) -> bool {
        false
    }
}

impl fmt::Display for NullObject {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

/// Result of a read on a nullable container.
///
/// A present, truthy value is returned as `Value`; anything else is the
/// sentinel. Lookups chain through present object values using the same rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Nullable<'a> {
    Value(&'a Value),
    Null(NullObject),
}

impl<'a> Nullable<'a> {
    /// Apply the nullable read rule to an optional stored value.
    pub fn from_lookup(value: Option<&'a Value>) -> Self {
        match value {
            Some(v) if is_truthy(v) => Nullable::Value(v),
            _ => Nullable::Null(UNDEFINED),
        }
    }

    /// Look `key` up inside this result.
    ///
    /// Only object values can hold children; every other value degrades to
    /// the sentinel.
    pub fn item(&self, key: &str) -> Nullable<'a> {
        match *self {
            Nullable::Value(Value::Object(map)) => Nullable::from_lookup(map.get(key)),
            _ => Nullable::Null(UNDEFINED),
        }
    }

    /// Attribute-style lookup; like `item` but reserved names fail.
    pub fn attr(&self, name: &str) -> ContainerResult<Nullable<'a>> {
        if is_reserved_name(name) {
            return Err(ContainerError::attribute(name, AttributeCause::Reserved));
        }
        Ok(self.item(name))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Nullable::Null(_))
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Nullable::Value(v) => is_truthy(v),
            Nullable::Null(null) => null.is_truthy(),
        }
    }

    pub fn value(&self) -> Option<&'a Value> {
        match *self {
            Nullable::Value(v) => Some(v),
            Nullable::Null(_) => None,
        }
    }
}

impl fmt::Display for Nullable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nullable::Value(v) => write!(f, "{v}"),
            Nullable::Null(null) => write!(f, "{null}"),
        }
    }
}
