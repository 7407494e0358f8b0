//! Boot configuration

use serde::{Deserialize, Serialize};
use storage::StorageSet;
use thiserror::Error;

/// Fixed configuration path on onboard storage
pub const CONFIG_PATH: &str = "/config.json";

/// Config load error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config at {CONFIG_PATH}")]
    Missing,
    #[error("config invalid: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// The boot configuration
///
/// Unknown fields are tolerated so a config written by a newer build still
/// loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    /// Script to run at boot instead of the editor
    pub auto_exec: Option<String>,
}

impl BootConfig {
    /// Loads the config from its fixed path
    pub fn load(storage: &StorageSet) -> Result<Self, ConfigError> {
        let backend = storage.resolve(CONFIG_PATH);
        let text = backend
            .read_to_string(CONFIG_PATH)
            .map_err(|_| ConfigError::Missing)?;
        Ok(serde_json::from_str(&text)?)
    }
}
