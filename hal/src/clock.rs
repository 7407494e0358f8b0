//! Monotonic clock device
//!
//! Provides milliseconds since boot and a blocking sleep. The clock is the
//! only source of time in the system; stabilization, cursor blink, and the
//! DELAY command are all measured against it.
//!
//! ## Implementation Notes
//!
//! - Must be monotonic (never return a smaller value)
//! - `sleep_ms` blocks the whole process; there is no preemption
//! - The simulated clock advances its own time on `sleep_ms`, which keeps
//!   tests deterministic

/// Monotonic clock trait
pub trait Clock {
    /// Returns milliseconds elapsed since boot
    fn now_ms(&mut self) -> u64;

    /// Blocks for the given number of milliseconds
    fn sleep_ms(&mut self, ms: u64);
}
