//! Firmware update collaborator
//!
//! Applying an image replaces the running firmware: on hardware a successful
//! `apply` never returns control to this process. The trait models that with
//! a [`Handoff`] marker value — receiving one means the caller must stop doing
//! work and let the process end.
//!
//! The byte-level flashing mechanics are out of scope; implementations only
//! receive the already-read image bytes.

use thiserror::Error;

/// Firmware update error
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("image rejected: {0}")]
    Rejected(String),

    #[error("flash write failed: {0}")]
    FlashFailed(String),
}

/// Marker returned by a successful firmware handoff
///
/// On real hardware the call does not return; in simulation the marker lets
/// callers unwind deliberately instead of being killed mid-test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handoff;

/// Firmware updater trait
pub trait FirmwareUpdater {
    /// Applies a firmware image
    ///
    /// Success is a handoff: no further work may run after it. Failure leaves
    /// the current firmware in place.
    fn apply(&mut self, image: &[u8]) -> Result<Handoff, UpdateError>;
}
