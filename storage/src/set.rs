//! The pair of mounted backends

use crate::backend::{StorageBackend, StorageError};
use crate::selector::StorageKind;

/// Both mounted storage backends
///
/// Owns the onboard and removable backends as trait objects and exposes the
/// two access patterns the system uses: selector-based routing (editor,
/// general opens) and the interpreter's onboard-then-removable fallback.
pub struct StorageSet {
    onboard: Box<dyn StorageBackend>,
    removable: Box<dyn StorageBackend>,
}

impl StorageSet {
    /// Creates a set from the two backends
    pub fn new(onboard: Box<dyn StorageBackend>, removable: Box<dyn StorageBackend>) -> Self {
        Self { onboard, removable }
    }

    /// Returns the backend of the given kind
    pub fn backend(&self, kind: StorageKind) -> &dyn StorageBackend {
        match kind {
            StorageKind::Onboard => self.onboard.as_ref(),
            StorageKind::Removable => self.removable.as_ref(),
        }
    }

    /// Returns the backend of the given kind, mutably
    pub fn backend_mut(&mut self, kind: StorageKind) -> &mut dyn StorageBackend {
        match kind {
            StorageKind::Onboard => self.onboard.as_mut(),
            StorageKind::Removable => self.removable.as_mut(),
        }
    }

    /// Routes `path` through the selector and returns its backend
    pub fn resolve(&self, path: &str) -> &dyn StorageBackend {
        self.backend(StorageKind::select(path))
    }

    /// Routes `path` through the selector and returns its backend, mutably
    pub fn resolve_mut(&mut self, path: &str) -> &mut dyn StorageBackend {
        self.backend_mut(StorageKind::select(path))
    }

    /// Reads a script resource, trying onboard storage first, then removable
    ///
    /// Returns `None` when neither backend yields a readable resource.
    pub fn read_script(&self, path: &str) -> Option<String> {
        self.onboard
            .read_to_string(path)
            .or_else(|_| self.removable.read_to_string(path))
            .ok()
    }

    /// Initializes both backends, reporting each failure through `on_failure`
    pub fn init_all(&mut self, mut on_failure: impl FnMut(StorageKind, &StorageError)) {
        if let Err(e) = self.onboard.init() {
            on_failure(StorageKind::Onboard, &e);
        }
        if let Err(e) = self.removable.init() {
            on_failure(StorageKind::Removable, &e);
        }
    }
}
