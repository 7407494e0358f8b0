//! Storage backend trait and the in-memory implementation

use std::collections::BTreeMap;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("backend not initialized")]
    NotReady,

    #[error("initialization failed: {0}")]
    InitFailed(String),

    #[error("resource is not valid UTF-8: {0}")]
    NotText(String),
}

/// Storage backend trait
///
/// A flat, path-keyed store of byte blobs. Writes overwrite whole resources;
/// there are no partial or incremental writes anywhere in the system.
pub trait StorageBackend {
    /// Initializes the backend
    ///
    /// Failure is the degraded condition: the backend stays mounted and later
    /// operations against it individually fail with [`StorageError::NotReady`].
    fn init(&mut self) -> Result<(), StorageError> {
        Ok(())
    }

    /// Returns true if a resource exists at `path`
    fn exists(&self, path: &str) -> bool;

    /// Reads the whole resource at `path`
    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Writes (overwrites) the whole resource at `path`
    fn write(&mut self, path: &str, contents: &[u8]) -> Result<(), StorageError>;

    /// Reads the resource at `path` as UTF-8 text
    fn read_to_string(&self, path: &str) -> Result<String, StorageError> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|_| StorageError::NotText(path.to_string()))
    }
}

/// In-memory storage backend
///
/// Backs both storage slots in tests and sim mode. Data lives only as long
/// as the process; simulated reboots that must keep storage share one
/// `MemoryStorage` through the sim layer.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    resources: BTreeMap<String, Vec<u8>>,
    fail_init: bool,
    ready: bool,
}

impl MemoryStorage {
    /// Creates an empty, uninitialized store
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures `init` to fail, for degraded-boot tests
    pub fn fail_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// Preloads a resource, marking the store ready
    pub fn with_resource(mut self, path: &str, contents: &[u8]) -> Self {
        self.resources.insert(path.to_string(), contents.to_vec());
        self.ready = true;
        self
    }

    /// Returns the number of stored resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn init(&mut self) -> Result<(), StorageError> {
        if self.fail_init {
            return Err(StorageError::InitFailed("simulated failure".to_string()));
        }
        self.ready = true;
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.ready && self.resources.contains_key(path)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        if !self.ready {
            return Err(StorageError::NotReady);
        }
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    fn write(&mut self, path: &str, contents: &[u8]) -> Result<(), StorageError> {
        if !self.ready {
            return Err(StorageError::NotReady);
        }
        self.resources.insert(path.to_string(), contents.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write_round_trip() {
        let mut store = MemoryStorage::new();
        store.init().unwrap();

        store.write("/notes.txt", b"hello").unwrap();
        assert!(store.exists("/notes.txt"));
        assert_eq!(store.read("/notes.txt").unwrap(), b"hello");
        assert_eq!(store.read_to_string("/notes.txt").unwrap(), "hello");
    }

    #[test]
    fn test_write_overwrites_whole_resource() {
        let mut store = MemoryStorage::new();
        store.init().unwrap();

        store.write("/a", b"first version, quite long").unwrap();
        store.write("/a", b"second").unwrap();
        assert_eq!(store.read("/a").unwrap(), b"second");
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let mut store = MemoryStorage::new();
        store.init().unwrap();

        assert!(!store.exists("/nope"));
        assert_eq!(
            store.read("/nope"),
            Err(StorageError::NotFound("/nope".to_string()))
        );
    }

    #[test]
    fn test_uninitialized_backend_is_not_ready() {
        let store = MemoryStorage::new();
        assert!(!store.exists("/a"));
        assert_eq!(store.read("/a"), Err(StorageError::NotReady));
    }

    #[test]
    fn test_failed_init_degrades() {
        let mut store = MemoryStorage::new().fail_init();
        assert!(store.init().is_err());
        assert_eq!(store.read("/a"), Err(StorageError::NotReady));
    }

    #[test]
    fn test_non_utf8_read_to_string() {
        let store = MemoryStorage::new().with_resource("/bin", &[0xFF, 0xFE]);
        assert_eq!(
            store.read_to_string("/bin"),
            Err(StorageError::NotText("/bin".to_string()))
        );
    }
}
