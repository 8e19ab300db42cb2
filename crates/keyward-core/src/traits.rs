//! The contract every keyward container extends.
//!
//! A container is one ordered entry map behind two accessor surfaces
//! (subscript-style and attribute-style). The trait below exposes the parts
//! that are identical across variants: the raw entries, the debug
//! representation, and the plain JSON rendering.

use serde_json::Value;

use keyward_contracts::value::{render_entries, Entries};

pub trait EntryStore {
    /// Type name shown in the debug representation, e.g. `"Container"`.
    fn type_name(&self) -> &'static str;

    /// All stored user entries, in insertion order.
    ///
    /// Never includes control state of policy-carrying variants.
    fn entries(&self) -> &Entries;

    /// `TypeName({"k1": v1, "k2": v2})` in insertion order.
    fn repr(&self) -> String {
        format!("{}({})", self.type_name(), render_entries(self.entries()))
    }

    /// Plain interchange rendering: user entries only, as a JSON object.
    fn to_json(&self) -> Value {
        Value::Object(self.entries().clone())
    }

    /// Number of stored entries.
    fn len(&self) -> usize {
        self.entries().len()
    }

    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
