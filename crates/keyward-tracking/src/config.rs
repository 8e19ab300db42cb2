//! TOML access-policy configuration.
//!
//! A policy file names the keys each axis admits. An omitted axis is
//! unrestricted; an empty list admits nothing.
//!
//! ```toml
//! writable = ["checklistDefinitions"]
//! readable = ["checklistDefinitions", "test"]
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use keyward_contracts::{
    error::{ContainerError, ContainerResult},
    policy::{AccessPolicy, KeyAccess},
};

/// The top-level structure deserialized from a TOML policy file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Keys that may be written. Omit for no restriction.
    #[serde(default)]
    pub writable: Option<BTreeSet<String>>,

    /// Keys that may be read. Omit for no restriction.
    #[serde(default)]
    pub readable: Option<BTreeSet<String>>,
}

impl PolicyConfig {
    /// Parse `s` as a TOML policy.
    ///
    /// Returns `ContainerError::Config` if the TOML is malformed or does not
    /// match the expected schema.
    pub fn from_toml_str(s: &str) -> ContainerResult<Self> {
        let config: PolicyConfig = toml::from_str(s).map_err(|e| ContainerError::Config {
            reason: format!("failed to parse policy TOML: {}", e),
        })?;
        debug!(
            writable = ?config.writable,
            readable = ?config.readable,
            "loaded access policy"
        );
        Ok(config)
    }

    /// Read the file at `path` and parse it as a TOML policy.
    pub fn from_file(path: &Path) -> ContainerResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ContainerError::Config {
            reason: format!("failed to read policy file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }
}

impl From<PolicyConfig> for AccessPolicy {
    fn from(config: PolicyConfig) -> Self {
        AccessPolicy::new(KeyAccess::from(config.writable), KeyAccess::from(config.readable))
    }
}

impl From<&AccessPolicy> for PolicyConfig {
    fn from(policy: &AccessPolicy) -> Self {
        PolicyConfig {
            writable: policy.writable.keys().cloned(),
            readable: policy.readable.keys().cloned(),
        }
    }
}
