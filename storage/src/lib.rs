//! # Storage
//!
//! This crate defines KeyDeck's storage model: two flat, path-keyed backends
//! (onboard flash and a removable card) and the pure selector that routes a
//! path string to one of them.
//!
//! ## Design
//!
//! - **Flat paths**: resources are whole text or binary blobs keyed by path;
//!   there is no directory tree to walk
//! - **Two backends, no caching**: the selector is re-evaluated on every open
//! - **Degraded, not fatal**: a backend whose `init` fails stays mounted;
//!   individual operations against it fail when attempted

pub mod backend;
pub mod selector;
pub mod set;

pub use backend::{MemoryStorage, StorageBackend, StorageError};
pub use selector::{StorageKind, REMOVABLE_PREFIX};
pub use set::StorageSet;
