//! # keyward-contracts
//!
//! Shared types and contracts for the keyward containers.
//!
//! All crates in the workspace import from here. No container logic lives in
//! this crate, only the access policy data types, value helpers, and errors.

pub mod error;
pub mod policy;
pub mod value;

pub use error::{AccessKind, AttributeCause, ContainerError, ContainerResult};
pub use policy::{AccessPolicy, KeyAccess};
pub use value::{is_reserved_name, is_truthy, render_entries, Entries};
