//! # Run Loop
//!
//! The cooperative event loop and the explicit device context it runs over.
//!
//! ## Philosophy
//!
//! - **No hidden globals**: every device handle, the stabilization monitor,
//!   and the logger live in one [`DeviceContext`] constructed at boot and
//!   passed `&mut` into whatever session is active
//! - **One tick operation**: [`DeviceContext::next_tick`] is the only way a
//!   session waits; it yields either an input event or a timer tick, and it
//!   polls the stabilization monitor on every call, making stabilization a
//!   single well-defined injection point instead of a scattered concern
//! - **Single-threaded**: one logical context runs boot, then either the
//!   interpreter or the editor, never both

use hal::{Clock, DisplayPanel, FirmwareUpdater, KeyboardDevice, OverridePin, StatusIndicator};
use health::{HealthStore, StabilizationMonitor};
use input_types::KeyEvent;
use logger::Logger;
use storage::StorageSet;

/// Pause per idle tick, bounding the polling rate
pub const TICK_INTERVAL_MS: u64 = 30;

/// One turn of the cooperative loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// A key event arrived
    Input(KeyEvent),
    /// Nothing pending; one tick interval elapsed
    Timer,
}

/// All device state, bundled explicitly
///
/// Built once at boot from whatever implementations the platform provides
/// (real drivers on hardware, sims in tests), then borrowed by the recovery
/// check, the interpreter, and the editor in turn.
pub struct DeviceContext {
    pub display: Box<dyn DisplayPanel>,
    pub keyboard: Box<dyn KeyboardDevice>,
    pub clock: Box<dyn Clock>,
    pub indicator: Box<dyn StatusIndicator>,
    pub override_pin: Box<dyn OverridePin>,
    pub storage: StorageSet,
    pub health: Box<dyn HealthStore>,
    pub updater: Box<dyn FirmwareUpdater>,
    pub monitor: StabilizationMonitor,
    pub log: Logger,
}

impl DeviceContext {
    /// Bundles the devices into a context
    ///
    /// The stabilization monitor is anchored to the clock's current time,
    /// which is the boot timestamp by construction.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        display: Box<dyn DisplayPanel>,
        keyboard: Box<dyn KeyboardDevice>,
        mut clock: Box<dyn Clock>,
        indicator: Box<dyn StatusIndicator>,
        override_pin: Box<dyn OverridePin>,
        storage: StorageSet,
        health: Box<dyn HealthStore>,
        updater: Box<dyn FirmwareUpdater>,
        log: Logger,
    ) -> Self {
        let boot_ms = clock.now_ms();
        Self {
            display,
            keyboard,
            clock,
            indicator,
            override_pin,
            storage,
            health,
            updater,
            monitor: StabilizationMonitor::new(boot_ms),
            log,
        }
    }

    /// Polls the stabilization monitor once
    ///
    /// A store failure is logged and swallowed; the monitor stays unlatched
    /// and the next poll retries.
    pub fn poll_monitor(&mut self) {
        let now = self.clock.now_ms();
        match self
            .monitor
            .poll(now, self.health.as_mut(), self.indicator.as_mut())
        {
            Ok(true) => self.log.info("boot stabilized, failure counter cleared"),
            Ok(false) => {}
            Err(e) => self.log.warn(format!("stabilization write failed: {}", e)),
        }
    }

    /// Advances the loop by one turn
    ///
    /// Polls the monitor, then returns a pending key event if there is one;
    /// otherwise sleeps one tick interval and reports a timer tick.
    pub fn next_tick(&mut self) -> Tick {
        self.poll_monitor();
        if let Some(event) = self.keyboard.poll_event() {
            return Tick::Input(event);
        }
        self.clock.sleep_ms(TICK_INTERVAL_MS);
        Tick::Timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{IndicatorState, Rgb};
    use hal::{Handoff, UpdateError};
    use health::HealthError;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use storage::MemoryStorage;

    #[derive(Default)]
    struct NullDisplay;

    impl DisplayPanel for NullDisplay {
        fn fill(&mut self, _color: Rgb) {}
        fn print_line(&mut self, _text: &str) {}
        fn status_bar(&mut self, _text: &str, _color: Rgb) {}
        fn clear_text_region(&mut self) {}
        fn draw_text(&mut self, _text: &str) {}
        fn draw_cursor(&mut self, _visible: bool) {}
        fn show_modal(&mut self, _text: &str) {}
    }

    struct QueueKeyboard(VecDeque<KeyEvent>);

    impl KeyboardDevice for QueueKeyboard {
        fn poll_event(&mut self) -> Option<KeyEvent> {
            self.0.pop_front()
        }
    }

    #[derive(Clone)]
    struct SharedClock(Rc<RefCell<u64>>);

    impl Clock for SharedClock {
        fn now_ms(&mut self) -> u64 {
            *self.0.borrow()
        }

        fn sleep_ms(&mut self, ms: u64) {
            *self.0.borrow_mut() += ms;
        }
    }

    #[derive(Clone, Default)]
    struct SharedIndicator(Rc<RefCell<Vec<IndicatorState>>>);

    impl StatusIndicator for SharedIndicator {
        fn set(&mut self, state: IndicatorState) {
            self.0.borrow_mut().push(state);
        }
    }

    struct StuckPin;

    impl OverridePin for StuckPin {
        fn is_asserted(&mut self) -> bool {
            false
        }
    }

    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<(Option<u32>, usize)>>);

    impl HealthStore for SharedStore {
        fn read_fails(&mut self) -> Result<u32, HealthError> {
            Ok(self.0.borrow().0.unwrap_or(0))
        }

        fn write_fails(&mut self, fails: u32) -> Result<(), HealthError> {
            let mut inner = self.0.borrow_mut();
            inner.0 = Some(fails);
            inner.1 += 1;
            Ok(())
        }
    }

    struct NullUpdater;

    impl FirmwareUpdater for NullUpdater {
        fn apply(&mut self, _image: &[u8]) -> Result<Handoff, UpdateError> {
            Ok(Handoff)
        }
    }

    fn context(events: Vec<KeyEvent>) -> (DeviceContext, SharedClock, SharedStore, SharedIndicator)
    {
        let clock = SharedClock(Rc::new(RefCell::new(0)));
        let store = SharedStore::default();
        let led = SharedIndicator::default();
        let ctx = DeviceContext::new(
            Box::new(NullDisplay),
            Box::new(QueueKeyboard(events.into())),
            Box::new(clock.clone()),
            Box::new(led.clone()),
            Box::new(StuckPin),
            StorageSet::new(Box::new(MemoryStorage::new()), Box::new(MemoryStorage::new())),
            Box::new(store.clone()),
            Box::new(NullUpdater),
            Logger::new(),
        );
        (ctx, clock, store, led)
    }

    #[test]
    fn test_tick_yields_pending_input_without_sleeping() {
        let (mut ctx, clock, _, _) = context(vec![KeyEvent::Char('a')]);

        assert_eq!(ctx.next_tick(), Tick::Input(KeyEvent::Char('a')));
        assert_eq!(*clock.0.borrow(), 0);
    }

    #[test]
    fn test_idle_tick_sleeps_one_interval() {
        let (mut ctx, clock, _, _) = context(vec![]);

        assert_eq!(ctx.next_tick(), Tick::Timer);
        assert_eq!(*clock.0.borrow(), TICK_INTERVAL_MS);
    }

    #[test]
    fn test_ticking_past_threshold_stabilizes_once() {
        let (mut ctx, _, store, led) = context(vec![]);
        store.0.borrow_mut().0 = Some(2);

        let ticks_needed = health::STABILIZE_THRESHOLD_MS / TICK_INTERVAL_MS + 1;
        for _ in 0..ticks_needed + 5 {
            ctx.next_tick();
        }

        let inner = store.0.borrow();
        assert_eq!(inner.0, Some(0));
        assert_eq!(inner.1, 1);
        assert_eq!(*led.0.borrow(), vec![IndicatorState::Off]);
        assert!(ctx.monitor.is_stabilized());
    }
}
