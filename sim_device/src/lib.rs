//! # Simulated Devices
//!
//! Deterministic implementations of every HAL trait, for tests and for the
//! daemon's sim mode.
//!
//! ## Design
//!
//! Each sim wraps its state in `Rc<RefCell<…>>` and is `Clone`: one clone is
//! boxed into the [`runloop::DeviceContext`], and the test keeps another as an
//! inspection handle. The whole system is single-threaded, so shared interior
//! mutability is safe here.
//!
//! The simulated clock advances its own time on `sleep_ms`, which makes every
//! timing-dependent path (stabilization, cursor blink, DELAY) deterministic.

pub mod devices;
pub mod nvram;
pub mod rig;

pub use devices::{
    DisplayOp, SimClock, SimDisplay, SimFirmware, SimIndicator, SimKeyboard, SimOverridePin,
};
pub use nvram::{SimHealthStore, SimNvram};
pub use rig::{SimDeviceSet, SimStorage};
