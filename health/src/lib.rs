//! # Health
//!
//! Crash-loop resilience for KeyDeck: the persisted failure counter, the
//! boot-time recovery decision, and the uptime-based stabilization that
//! clears the counter once the current boot has proven itself.
//!
//! ## Philosophy
//!
//! There is no external watchdog. A repeating crash must be detected from the
//! device's own persisted memory, so the counter is advanced *before* any
//! other initialization runs: even a crash in the middle of boot is observed
//! on the subsequent boot.

pub mod monitor;
pub mod recovery;
pub mod store;

pub use monitor::{StabilizationMonitor, STABILIZE_THRESHOLD_MS};
pub use recovery::{BootDecision, BootDevices, RecoveryController, CRASH_LIMIT, RECOVERY_IMAGE_PATH};
pub use store::{HealthError, HealthStore, HEALTH_NAMESPACE};
