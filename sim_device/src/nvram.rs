//! Simulated durable counter storage
//!
//! [`SimNvram`] is the durable medium: it survives a simulated reboot because
//! the test keeps its handle and builds the next boot's [`SimHealthStore`]
//! from the same cell. The store counts writes so tests can pin the
//! exactly-once properties.

use health::{HealthError, HealthStore};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct NvramInner {
    fails: Option<u32>,
    writes: usize,
}

/// The durable cell behind the `sys_health` namespace
#[derive(Debug, Clone, Default)]
pub struct SimNvram {
    inner: Rc<RefCell<NvramInner>>,
}

impl SimNvram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cell with a pre-existing counter value
    pub fn with_fails(fails: u32) -> Self {
        let nv = Self::new();
        nv.inner.borrow_mut().fails = Some(fails);
        nv
    }

    /// Returns the persisted counter (0 when the slot is absent)
    pub fn fails(&self) -> u32 {
        self.inner.borrow().fails.unwrap_or(0)
    }

    /// Returns true if the slot has ever been written
    pub fn is_present(&self) -> bool {
        self.inner.borrow().fails.is_some()
    }

    /// Returns the total number of writes across all boots
    pub fn writes(&self) -> usize {
        self.inner.borrow().writes
    }
}

/// Health store bound to a [`SimNvram`] cell
#[derive(Debug, Clone, Default)]
pub struct SimHealthStore {
    nvram: SimNvram,
}

impl SimHealthStore {
    /// Binds a store to the given durable cell
    pub fn new(nvram: SimNvram) -> Self {
        Self { nvram }
    }
}

impl HealthStore for SimHealthStore {
    fn read_fails(&mut self) -> Result<u32, HealthError> {
        Ok(self.nvram.inner.borrow().fails.unwrap_or(0))
    }

    fn write_fails(&mut self, fails: u32) -> Result<(), HealthError> {
        let mut inner = self.nvram.inner.borrow_mut();
        inner.fails = Some(fails);
        inner.writes += 1;
        Ok(())
    }
}
