//! The full simulated device set

use crate::devices::{SimClock, SimDisplay, SimFirmware, SimIndicator, SimKeyboard, SimOverridePin};
use crate::nvram::{SimHealthStore, SimNvram};
use logger::Logger;
use runloop::DeviceContext;
use std::cell::RefCell;
use std::rc::Rc;
use storage::{MemoryStorage, StorageBackend, StorageError, StorageSet};

/// Shared-state storage backend
///
/// Wraps a [`MemoryStorage`] in a shared cell so the test keeps an inspection
/// handle while a clone is boxed into the context's [`StorageSet`]. Also how
/// storage contents survive a simulated reboot.
#[derive(Debug, Clone, Default)]
pub struct SimStorage {
    inner: Rc<RefCell<MemoryStorage>>,
}

impl SimStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preloads a resource, marking the backend ready
    pub fn preload(&self, path: &str, contents: &[u8]) {
        let mut inner = self.inner.borrow_mut();
        let loaded = std::mem::take(&mut *inner).with_resource(path, contents);
        *inner = loaded;
    }

    /// Makes `init` fail, for degraded-boot tests
    pub fn break_init(&self) {
        let mut inner = self.inner.borrow_mut();
        let broken = std::mem::take(&mut *inner).fail_init();
        *inner = broken;
    }

    /// Reads a resource as text, for assertions
    pub fn text(&self, path: &str) -> Option<String> {
        self.inner.borrow().read_to_string(path).ok()
    }

    /// Returns true if a resource exists
    pub fn has(&self, path: &str) -> bool {
        self.inner.borrow().exists(path)
    }
}

impl StorageBackend for SimStorage {
    fn init(&mut self) -> Result<(), StorageError> {
        self.inner.borrow_mut().init()
    }

    fn exists(&self, path: &str) -> bool {
        self.inner.borrow().exists(path)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.inner.borrow().read(path)
    }

    fn write(&mut self, path: &str, contents: &[u8]) -> Result<(), StorageError> {
        self.inner.borrow_mut().write(path, contents)
    }
}

/// A complete set of simulated devices
///
/// Construct once, keep for inspection, and call [`SimDeviceSet::context`]
/// to build the boxed [`DeviceContext`] a boot runs over. Calling `context`
/// again models a reboot: storage and nvram persist, everything else starts
/// fresh.
#[derive(Debug, Clone, Default)]
pub struct SimDeviceSet {
    pub display: SimDisplay,
    pub keyboard: SimKeyboard,
    pub clock: SimClock,
    pub indicator: SimIndicator,
    pub override_pin: SimOverridePin,
    pub onboard: SimStorage,
    pub removable: SimStorage,
    pub nvram: SimNvram,
    pub firmware: SimFirmware,
}

impl SimDeviceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a device context over this set
    pub fn context(&self) -> DeviceContext {
        DeviceContext::new(
            Box::new(self.display.clone()),
            Box::new(self.keyboard.clone()),
            Box::new(self.clock.clone()),
            Box::new(self.indicator.clone()),
            Box::new(self.override_pin.clone()),
            StorageSet::new(
                Box::new(self.onboard.clone()),
                Box::new(self.removable.clone()),
            ),
            Box::new(SimHealthStore::new(self.nvram.clone())),
            Box::new(self.firmware.clone()),
            Logger::new(),
        )
    }
}
