//! # Core Types
//!
//! This crate defines the fundamental shared types for KeyDeck.
//!
//! ## Philosophy
//!
//! - **Small and dependency-light**: every other crate can depend on this one
//! - **Observable**: types are serializable so test harnesses can inspect them
//! - **No device knowledge**: colors and phases, not pins and registers

pub mod color;
pub mod indicator;

pub use color::Rgb;
pub use indicator::IndicatorState;
