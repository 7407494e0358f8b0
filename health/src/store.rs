//! Durable failure-counter storage

use thiserror::Error;

/// Durable namespace holding the failure counter
pub const HEALTH_NAMESPACE: &str = "sys_health";

/// Health store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HealthError {
    #[error("health store read failed: {0}")]
    ReadFailed(String),

    #[error("health store write failed: {0}")]
    WriteFailed(String),
}

/// Durable key/value slot holding the failure counter
///
/// Each call is one open-mutate-close burst against the `sys_health`
/// namespace. Implementations must never hold the underlying store open
/// across a suspend point; the trait shape makes that the only option.
pub trait HealthStore {
    /// Reads the persisted failure counter, defaulting to 0 when absent
    fn read_fails(&mut self) -> Result<u32, HealthError>;

    /// Persists the failure counter
    fn write_fails(&mut self, fails: u32) -> Result<(), HealthError>;
}
