//! # KeyDeck Host Daemon
//!
//! This crate provides the host runtime for KeyDeck.
//!
//! ## Philosophy
//!
//! - **Boot is a straight line**: health check, devices, config, then exactly
//!   one of interpreter or editor
//! - **Deterministic mode is first-class**: the daemon runs over simulated
//!   devices, fed by key scripts, so every boot is reproducible
//! - **The daemon owns process I/O**: components draw on the display
//!   abstraction and log to the in-memory log; only the daemon touches
//!   stdout/stderr
//!
//! ## Non-Responsibilities
//!
//! The daemon does NOT:
//! - Talk to real hardware (a hardware port supplies its own device
//!   implementations and reuses `boot` unchanged)
//! - Offer a shell or any interactive control surface beyond the scripted
//!   keyboard

pub mod config;
pub mod input_script;
pub mod runtime;

pub use config::{BootConfig, ConfigError, CONFIG_PATH};
pub use input_script::{parse_key_script, KeyScriptError};
pub use runtime::{boot, BootReport, RuntimeError};
