//! Error types shared by every keyward container.
//!
//! All fallible container operations return `ContainerResult<T>`. Variants
//! carry the offending key(s) so callers can tell "doesn't exist" apart from
//! "not allowed" and from "structurally impossible".

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

/// Which side of the access policy rejected an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    Read,
    Write,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessKind::Read => f.write_str("read"),
            AccessKind::Write => f.write_str("write"),
        }
    }
}

/// Why an attribute-style read failed.
///
/// Attribute reads report failures through their own error family so that
/// callers probing for optional attributes can treat "absent" and "hidden"
/// uniformly, separate from key-style access errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeCause {
    /// No entry with that name exists.
    Missing,
    /// An entry may exist but the current read policy hides it.
    Forbidden,
    /// The name is a reserved `__dunder__` name and is never resolved to an entry.
    Reserved,
}

impl fmt::Display for AttributeCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeCause::Missing => f.write_str("does not exist"),
            AttributeCause::Forbidden => f.write_str("is currently forbidden"),
            AttributeCause::Reserved => f.write_str("is reserved"),
        }
    }
}

/// The unified error type for keyward containers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// A read, pop, or delete named a key that is not present.
    #[error("key '{key}' not found")]
    KeyNotFound { key: String },

    /// The access policy rejected the operation. `keys` holds exactly the
    /// denied key(s); group operations report the full offending subset.
    #[error("{kind} access to {} is currently forbidden", render_keys(.keys))]
    AccessDenied {
        kind: AccessKind,
        keys: BTreeSet<String>,
    },

    /// An attribute-style read failed.
    #[error("attribute '{name}' {cause}")]
    Attribute { name: String, cause: AttributeCause },

    /// The operation is impossible under the current policy regardless of key.
    #[error("{operation} is currently forbidden")]
    OperationForbidden { operation: String },

    /// The null sentinel cannot be mutated.
    #[error("unsupported operation: {reason}")]
    UnsupportedOperation { reason: String },

    /// `popitem` was called on a container with no entries.
    #[error("container is empty")]
    EmptyContainer,

    /// A policy configuration could not be read or parsed.
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// A container could not be converted to or from its serialized form.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl ContainerError {
    /// Build an `AccessDenied` error for a single key.
    pub fn denied(kind: AccessKind, key: impl Into<String>) -> Self {
        ContainerError::AccessDenied {
            kind,
            keys: BTreeSet::from([key.into()]),
        }
    }

    pub fn key_not_found(key: impl Into<String>) -> Self {
        ContainerError::KeyNotFound { key: key.into() }
    }

    pub fn attribute(name: impl Into<String>, cause: AttributeCause) -> Self {
        ContainerError::Attribute {
            name: name.into(),
            cause,
        }
    }
}

fn render_keys(keys: &BTreeSet<String>) -> String {
    match keys.len() {
        1 => format!("key '{}'", keys.iter().next().map(String::as_str).unwrap_or_default()),
        _ => {
            let quoted: Vec<String> = keys.iter().map(|k| format!("'{k}'")).collect();
            format!("keys {{{}}}", quoted.join(", "))
        }
    }
}

/// Convenience alias used throughout the keyward crates.
pub type ContainerResult<T> = Result<T, ContainerError>;
