//! Simulated HAL devices

use core_types::{IndicatorState, Rgb};
use hal::{
    Clock, DisplayPanel, FirmwareUpdater, Handoff, KeyboardDevice, OverridePin, StatusIndicator,
    UpdateError,
};
use input_types::KeyEvent;
use sha2::{Digest, Sha256};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Manual-time clock
///
/// `now_ms` never moves on its own; `sleep_ms` (and explicit `advance`)
/// are the only ways time passes.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now: Rc<RefCell<u64>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward without a sleep call
    pub fn advance(&self, ms: u64) {
        *self.now.borrow_mut() += ms;
    }

    /// Reads the current simulated time
    pub fn now(&self) -> u64 {
        *self.now.borrow()
    }
}

impl Clock for SimClock {
    fn now_ms(&mut self) -> u64 {
        *self.now.borrow()
    }

    fn sleep_ms(&mut self, ms: u64) {
        *self.now.borrow_mut() += ms;
    }
}

/// Scripted keyboard
#[derive(Debug, Clone, Default)]
pub struct SimKeyboard {
    queue: Rc<RefCell<VecDeque<KeyEvent>>>,
}

impl SimKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one event
    pub fn push(&self, event: KeyEvent) {
        self.queue.borrow_mut().push_back(event);
    }

    /// Queues one character event per char of `text`
    pub fn type_text(&self, text: &str) {
        for event in KeyEvent::text(text) {
            self.push(event);
        }
    }

    /// Queues a whole event sequence
    pub fn push_all(&self, events: impl IntoIterator<Item = KeyEvent>) {
        self.queue.borrow_mut().extend(events);
    }

    /// Returns how many events are still pending
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl KeyboardDevice for SimKeyboard {
    fn poll_event(&mut self) -> Option<KeyEvent> {
        self.queue.borrow_mut().pop_front()
    }
}

/// One recorded display operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    Fill(Rgb),
    PrintLine(String),
    StatusBar(String, Rgb),
    ClearTextRegion,
    DrawText(String),
    DrawCursor(bool),
    ShowModal(String),
}

/// Recording display panel
#[derive(Debug, Clone, Default)]
pub struct SimDisplay {
    ops: Rc<RefCell<Vec<DisplayOp>>>,
}

impl SimDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every recorded operation, in order
    pub fn ops(&self) -> Vec<DisplayOp> {
        self.ops.borrow().clone()
    }

    /// Returns every `print_line` text, in order
    pub fn lines(&self) -> Vec<String> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                DisplayOp::PrintLine(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns true if some printed line contains `needle`
    pub fn printed(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    /// Returns the number of full text-region redraws
    pub fn text_redraws(&self) -> usize {
        self.ops
            .borrow()
            .iter()
            .filter(|op| matches!(op, DisplayOp::DrawText(_)))
            .count()
    }

    /// Returns the most recent full-screen fill
    pub fn last_fill(&self) -> Option<Rgb> {
        self.ops.borrow().iter().rev().find_map(|op| match op {
            DisplayOp::Fill(color) => Some(*color),
            _ => None,
        })
    }

    /// Clears the recorded history
    pub fn reset(&self) {
        self.ops.borrow_mut().clear();
    }

    /// Returns true if anything at all has been drawn
    pub fn touched(&self) -> bool {
        !self.ops.borrow().is_empty()
    }
}

impl DisplayPanel for SimDisplay {
    fn fill(&mut self, color: Rgb) {
        self.ops.borrow_mut().push(DisplayOp::Fill(color));
    }

    fn print_line(&mut self, text: &str) {
        self.ops
            .borrow_mut()
            .push(DisplayOp::PrintLine(text.to_string()));
    }

    fn status_bar(&mut self, text: &str, color: Rgb) {
        self.ops
            .borrow_mut()
            .push(DisplayOp::StatusBar(text.to_string(), color));
    }

    fn clear_text_region(&mut self) {
        self.ops.borrow_mut().push(DisplayOp::ClearTextRegion);
    }

    fn draw_text(&mut self, text: &str) {
        self.ops
            .borrow_mut()
            .push(DisplayOp::DrawText(text.to_string()));
    }

    fn draw_cursor(&mut self, visible: bool) {
        self.ops.borrow_mut().push(DisplayOp::DrawCursor(visible));
    }

    fn show_modal(&mut self, text: &str) {
        self.ops
            .borrow_mut()
            .push(DisplayOp::ShowModal(text.to_string()));
    }
}

/// Recording status indicator
#[derive(Debug, Clone, Default)]
pub struct SimIndicator {
    history: Rc<RefCell<Vec<IndicatorState>>>,
}

impl SimIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the full state history, in order
    pub fn history(&self) -> Vec<IndicatorState> {
        self.history.borrow().clone()
    }

    /// Returns the current state, if any was ever set
    pub fn current(&self) -> Option<IndicatorState> {
        self.history.borrow().last().copied()
    }
}

impl StatusIndicator for SimIndicator {
    fn set(&mut self, state: IndicatorState) {
        self.history.borrow_mut().push(state);
    }
}

/// Settable override pin
#[derive(Debug, Clone, Default)]
pub struct SimOverridePin {
    asserted: Rc<RefCell<bool>>,
}

impl SimOverridePin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assert_pin(&self) {
        *self.asserted.borrow_mut() = true;
    }

    pub fn release(&self) {
        *self.asserted.borrow_mut() = false;
    }
}

impl OverridePin for SimOverridePin {
    fn is_asserted(&mut self) -> bool {
        *self.asserted.borrow()
    }
}

/// Simulated firmware updater
///
/// Records the sha256 digest of every applied image instead of flashing
/// anything, so tests can assert exactly which payload was handed off.
#[derive(Debug, Clone, Default)]
pub struct SimFirmware {
    applied: Rc<RefCell<Vec<String>>>,
    reject: Rc<RefCell<bool>>,
}

impl SimFirmware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `apply` fail
    pub fn reject_images(&self) {
        *self.reject.borrow_mut() = true;
    }

    /// Returns the digests of applied images, in order
    pub fn applied_digests(&self) -> Vec<String> {
        self.applied.borrow().clone()
    }

    /// Computes the digest `apply` would record for `image`
    pub fn digest_of(image: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(image);
        hex::encode(hasher.finalize())
    }
}

impl FirmwareUpdater for SimFirmware {
    fn apply(&mut self, image: &[u8]) -> Result<Handoff, UpdateError> {
        if *self.reject.borrow() {
            return Err(UpdateError::Rejected("simulated rejection".to_string()));
        }
        self.applied.borrow_mut().push(Self::digest_of(image));
        Ok(Handoff)
    }
}
