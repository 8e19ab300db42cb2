//! Native serialization for `TrackingContainer`.
//!
//! The serialized record holds every user entry as a top-level field plus one
//! reserved side-channel field, `__tracking__`, carrying the control state:
//!
//! ```json
//! {
//!   "test": 17,
//!   "a": 5,
//!   "__tracking__": {
//!     "writable_keys": ["a"],
//!     "dirty_keys": ["a"],
//!     "readable_keys": ["a", "test"]
//!   }
//! }
//! ```
//!
//! Loading restores the entries first and then installs the saved control
//! state through `TrackingContainer::from_parts`. A record without the
//! side-channel field loads as an unrestricted container with no dirty keys.
//!
//! For interchange output that must not carry control state, use
//! `EntryStore::to_json` instead.

use serde::{ser::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use keyward_contracts::value::Entries;

use crate::tracking::{Control, TrackingContainer};

/// Name of the reserved field holding the control state.
pub const CONTROL_FIELD: &str = "__tracking__";

#[derive(Serialize)]
struct RecordRef<'a> {
    #[serde(flatten)]
    entries: &'a Entries,
    #[serde(rename = "__tracking__")]
    control: &'a Control,
}

#[derive(Deserialize)]
struct Record {
    #[serde(flatten)]
    entries: Entries,
    #[serde(rename = "__tracking__", default)]
    control: Control,
}

impl Serialize for TrackingContainer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.entries.contains_key(CONTROL_FIELD) {
            return Err(S::Error::custom(format!(
                "entry key '{CONTROL_FIELD}' collides with the reserved control field"
            )));
        }
        RecordRef {
            entries: &self.entries,
            control: &self.control,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TrackingContainer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Record { entries, control } = Record::deserialize(deserializer)?;
        Ok(TrackingContainer::from_parts(
            entries,
            control.writable,
            control.readable,
            control.dirty,
        ))
    }
}
