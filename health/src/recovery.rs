//! Boot-time crash-loop detection and recovery
//!
//! Runs once, synchronously, before any other component initializes the
//! display or keyboard. The counter increment strictly precedes the recovery
//! branch so that a crash during recovery itself still advances the counter
//! on the next boot.

use crate::store::{HealthError, HealthStore};
use core_types::{IndicatorState, Rgb};
use hal::{DisplayPanel, FirmwareUpdater, OverridePin, StatusIndicator};
use logger::Logger;
use storage::StorageBackend;

/// Consecutive unstabilized boots that trigger recovery
pub const CRASH_LIMIT: u32 = 3;

/// Fixed recovery image path on removable storage
pub const RECOVERY_IMAGE_PATH: &str = "/recovery.bin";

/// Outcome of the boot health check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootDecision {
    /// Normal boot continues
    Continue,
    /// A recovery image was applied; the process must stop doing work
    FirmwareHandoff,
    /// No recovery image (or the update failed); park until external
    /// intervention
    Halt,
}

/// The devices the boot check drives
pub struct BootDevices<'a> {
    pub health: &'a mut dyn HealthStore,
    pub override_pin: &'a mut dyn OverridePin,
    pub indicator: &'a mut dyn StatusIndicator,
    pub display: &'a mut dyn DisplayPanel,
    pub removable: &'a mut dyn StorageBackend,
    pub updater: &'a mut dyn FirmwareUpdater,
}

/// Boot-time crash-loop detector
#[derive(Debug)]
pub struct RecoveryController {
    crash_limit: u32,
    image_path: String,
}

impl RecoveryController {
    /// Creates a controller with the stock limit and image path
    pub fn new() -> Self {
        Self {
            crash_limit: CRASH_LIMIT,
            image_path: RECOVERY_IMAGE_PATH.to_string(),
        }
    }

    /// Overrides the crash limit (tests)
    pub fn with_crash_limit(mut self, limit: u32) -> Self {
        self.crash_limit = limit;
        self
    }

    /// Runs the boot health check
    ///
    /// Ordering is the contract: read, sample override, persist the
    /// incremented counter, and only then take the potentially long recovery
    /// branch.
    pub fn run_boot_check(
        &self,
        dev: BootDevices<'_>,
        log: &mut Logger,
    ) -> Result<BootDecision, HealthError> {
        let fails = dev.health.read_fails()?;
        let manual_override = dev.override_pin.is_asserted();
        dev.health.write_fails(fails + 1)?;

        if !manual_override && fails + 1 < self.crash_limit {
            return Ok(BootDecision::Continue);
        }

        log.log(
            logger::LogEntry::new(logger::LogLevel::Warn, "entering recovery mode")
                .with_field("fails", (fails + 1).to_string())
                .with_field("manual_override", manual_override.to_string()),
        );

        dev.indicator.set(IndicatorState::Error);
        dev.display.fill(Rgb::RED);
        if manual_override {
            dev.display.print_line("MANUAL RECOVERY");
        } else {
            dev.display.print_line("SYSTEM CRASHED");
        }

        if let Err(e) = dev.removable.init() {
            dev.display.print_line("Removable storage init failed");
            log.warn(format!("removable storage init failed: {}", e));
        }

        if !dev.removable.exists(&self.image_path) {
            dev.display.print_line("No recovery image. Halting.");
            log.error("recovery image missing, halting");
            return Ok(BootDecision::Halt);
        }

        // The image exists: clear the counter before the handoff so the next
        // boot of the new firmware starts clean.
        dev.health.write_fails(0)?;

        let image = match dev.removable.read(&self.image_path) {
            Ok(image) => image,
            Err(e) => {
                dev.display.print_line("Recovery image unreadable. Halting.");
                log.error(format!("recovery image unreadable: {}", e));
                return Ok(BootDecision::Halt);
            }
        };

        match dev.updater.apply(&image) {
            Ok(_handoff) => {
                log.info("recovery image applied, handing off");
                Ok(BootDecision::FirmwareHandoff)
            }
            Err(e) => {
                dev.display.print_line("Recovery update failed. Halting.");
                log.error(format!("recovery update failed: {}", e));
                Ok(BootDecision::Halt)
            }
        }
    }
}

impl Default for RecoveryController {
    fn default() -> Self {
        Self::new()
    }
}
