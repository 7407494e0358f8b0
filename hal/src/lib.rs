//! # Hardware Abstraction Layer (HAL)
//!
//! This crate defines the device traits for KeyDeck.
//!
//! ## Philosophy
//!
//! **Hardware must be fully abstracted and swappable.**
//!
//! No board-specific assumptions leak into the resilience or execution logic.
//! The HAL provides traits that device-specific crates implement; `sim_device`
//! provides deterministic implementations for tests and sim mode.
//!
//! ## Design Principles
//!
//! 1. **Trait-based**: all device operations go through traits
//! 2. **Poll-based**: no interrupts at this level; callers poll cooperatively
//! 3. **Testable**: every trait has a simulated implementation

pub mod clock;
pub mod display;
pub mod indicator;
pub mod keyboard;
pub mod override_pin;
pub mod updater;

pub use clock::Clock;
pub use display::DisplayPanel;
pub use indicator::StatusIndicator;
pub use keyboard::KeyboardDevice;
pub use override_pin::OverridePin;
pub use updater::{FirmwareUpdater, Handoff, UpdateError};
