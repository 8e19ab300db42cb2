//! # keyward-tracking
//!
//! A key/value container that enforces a read/write access policy and keeps
//! track of which keys were written since the policy was installed.
//!
//! ## Overview
//!
//! [`TrackingContainer`] starts unrestricted. Calling
//! [`TrackingContainer::set_allowed_accesses`] installs a write allow-list and
//! a read allow-list (each either unrestricted or an explicit key set) and
//! clears the dirty set. Every subsequent read or write is checked against the
//! policy in force at that moment; permitted writes mark their key dirty.
//!
//! Policies can also be loaded from TOML with [`PolicyConfig`].
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use keyward_contracts::policy::KeyAccess;
//! use keyward_tracking::TrackingContainer;
//!
//! let mut tc: TrackingContainer = [("test", json!(17))].into_iter().collect();
//! tc.set_allowed_accesses(KeyAccess::only(["a"]), KeyAccess::only(["a", "test"]));
//! tc.set_item("a", 5)?;
//! assert!(tc.set_item("b", 3).is_err());
//! ```

pub mod config;
pub mod snapshot;
pub mod tracking;

pub use config::PolicyConfig;
pub use snapshot::CONTROL_FIELD;
pub use tracking::TrackingContainer;

// ── Tests ─────────────────────────────────────────────────────────────────────
