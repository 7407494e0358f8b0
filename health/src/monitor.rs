//! Uptime-based stabilization
//!
//! Once the device has stayed up past the threshold, the current boot is
//! considered healthy and the failure counter is zeroed. The monitor is
//! polled cooperatively from every long-running loop; there is no trusted
//! preemptive timer, so a path that never polls never stabilizes (accepted
//! edge case).

use crate::store::{HealthError, HealthStore};
use core_types::IndicatorState;
use hal::StatusIndicator;

/// Uptime after which the current boot counts as stable
pub const STABILIZE_THRESHOLD_MS: u64 = 10_000;

/// One-shot stabilization monitor
///
/// Holds the boot timestamp and the process-local `stabilized` flag. Fires
/// at most once per boot: both "not yet stabilized" and "elapsed >= threshold"
/// must hold at the time of a poll.
#[derive(Debug)]
pub struct StabilizationMonitor {
    boot_ms: u64,
    stabilized: bool,
}

impl StabilizationMonitor {
    /// Creates a monitor for a boot that started at `boot_ms`
    pub fn new(boot_ms: u64) -> Self {
        Self {
            boot_ms,
            stabilized: false,
        }
    }

    /// Returns true once this boot has stabilized
    pub fn is_stabilized(&self) -> bool {
        self.stabilized
    }

    /// Polls the monitor
    ///
    /// When the threshold has elapsed and the monitor has not fired yet:
    /// zeroes the counter in one store burst, turns the indicator off, and
    /// latches. Returns `true` exactly on the firing poll.
    pub fn poll(
        &mut self,
        now_ms: u64,
        store: &mut dyn HealthStore,
        indicator: &mut dyn StatusIndicator,
    ) -> Result<bool, HealthError> {
        if self.stabilized {
            return Ok(false);
        }
        if now_ms.saturating_sub(self.boot_ms) < STABILIZE_THRESHOLD_MS {
            return Ok(false);
        }

        store.write_fails(0)?;
        indicator.set(IndicatorState::Off);
        self.stabilized = true;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingStore {
        slot: Option<u32>,
        writes: usize,
    }

    impl HealthStore for CountingStore {
        fn read_fails(&mut self) -> Result<u32, HealthError> {
            Ok(self.slot.unwrap_or(0))
        }

        fn write_fails(&mut self, fails: u32) -> Result<(), HealthError> {
            self.slot = Some(fails);
            self.writes += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeIndicator {
        history: Vec<IndicatorState>,
    }

    impl StatusIndicator for FakeIndicator {
        fn set(&mut self, state: IndicatorState) {
            self.history.push(state);
        }
    }

    #[test]
    fn test_does_not_fire_before_threshold() {
        let mut monitor = StabilizationMonitor::new(0);
        let mut store = CountingStore::default();
        let mut led = FakeIndicator::default();

        assert!(!monitor.poll(9_999, &mut store, &mut led).unwrap());
        assert!(!monitor.is_stabilized());
        assert_eq!(store.writes, 0);
        assert!(led.history.is_empty());
    }

    #[test]
    fn test_fires_exactly_once_at_threshold() {
        let mut monitor = StabilizationMonitor::new(0);
        let mut store = CountingStore {
            slot: Some(2),
            writes: 0,
        };
        let mut led = FakeIndicator::default();

        assert!(monitor.poll(10_000, &mut store, &mut led).unwrap());
        assert!(monitor.is_stabilized());
        assert_eq!(store.slot, Some(0));
        assert_eq!(store.writes, 1);
        assert_eq!(led.history, vec![IndicatorState::Off]);

        // Further elapses in the same boot perform no additional writes.
        assert!(!monitor.poll(30_000, &mut store, &mut led).unwrap());
        assert_eq!(store.writes, 1);
        assert_eq!(led.history.len(), 1);
    }

    #[test]
    fn test_boot_timestamp_offsets_threshold() {
        let mut monitor = StabilizationMonitor::new(5_000);
        let mut store = CountingStore::default();
        let mut led = FakeIndicator::default();

        assert!(!monitor.poll(14_999, &mut store, &mut led).unwrap());
        assert!(monitor.poll(15_000, &mut store, &mut led).unwrap());
    }

    #[test]
    fn test_store_failure_leaves_monitor_unlatched() {
        struct FailingStore;

        impl HealthStore for FailingStore {
            fn read_fails(&mut self) -> Result<u32, HealthError> {
                Ok(0)
            }

            fn write_fails(&mut self, _fails: u32) -> Result<(), HealthError> {
                Err(HealthError::WriteFailed("nvram busy".to_string()))
            }
        }

        let mut monitor = StabilizationMonitor::new(0);
        let mut led = FakeIndicator::default();

        assert!(monitor.poll(10_000, &mut FailingStore, &mut led).is_err());
        // A failed write must not latch; the next poll retries.
        assert!(!monitor.is_stabilized());
    }
}
