//! Path-based backend selection
//!
//! A pure function of the path string, re-evaluated on every open. No
//! memoization, no side effects, no probing of either backend.

use core::fmt;

/// Marker prefix routing a path to removable storage
pub const REMOVABLE_PREFIX: &str = "/sd/";

/// The two storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Onboard flash
    Onboard,
    /// Removable card
    Removable,
}

impl StorageKind {
    /// Routes a path to a backend
    ///
    /// Paths under the removable marker prefix, and relative paths (no
    /// leading root separator), resolve to removable storage. Every other
    /// absolute path resolves to onboard storage.
    pub fn select(path: &str) -> StorageKind {
        if path.starts_with(REMOVABLE_PREFIX) || !path.starts_with('/') {
            StorageKind::Removable
        } else {
            StorageKind::Onboard
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Onboard => write!(f, "onboard"),
            Self::Removable => write!(f, "removable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removable_prefix_routes_to_removable() {
        assert_eq!(StorageKind::select("/sd/boot.ks"), StorageKind::Removable);
        assert_eq!(StorageKind::select("/sd/dir/file"), StorageKind::Removable);
    }

    #[test]
    fn test_relative_path_routes_to_removable() {
        assert_eq!(StorageKind::select("boot.ks"), StorageKind::Removable);
        assert_eq!(StorageKind::select(""), StorageKind::Removable);
    }

    #[test]
    fn test_absolute_path_routes_to_onboard() {
        assert_eq!(StorageKind::select("/config.json"), StorageKind::Onboard);
        assert_eq!(StorageKind::select("/scripts/a.ks"), StorageKind::Onboard);
        // "/sdcard" does not carry the marker prefix
        assert_eq!(StorageKind::select("/sdcard"), StorageKind::Onboard);
    }
}
