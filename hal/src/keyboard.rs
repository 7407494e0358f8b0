//! Keyboard device abstraction
//!
//! ## Philosophy
//!
//! - **Hardware is just a source**: keyboards provide key events, not authority
//! - **Poll-based**: no interrupts at the HAL level
//! - **Decoded**: scan-code decoding happens inside the driver; only decoded
//!   [`KeyEvent`]s cross this boundary (raw scan codes are out of scope)

use input_types::KeyEvent;

/// Keyboard device trait
///
/// ## Implementation Notes
///
/// - **Poll-based**: call `poll_event()` to check for new events
/// - **Non-blocking**: returns `None` if no event is pending
/// - **One event per key-change**: a single change never coalesces multiple
///   characters into one event
pub trait KeyboardDevice {
    /// Polls for the next decoded key event
    ///
    /// Returns `Some(event)` if a key change is pending, or `None` if the
    /// keyboard is idle. Never blocks.
    fn poll_event(&mut self) -> Option<KeyEvent>;
}
