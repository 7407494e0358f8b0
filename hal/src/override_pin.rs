//! Manual recovery override input
//!
//! A dedicated physical input (a held button at power-on) that forces
//! recovery mode regardless of the failure counter. Sampled exactly once,
//! at the very start of the boot health check.

/// Override input trait
pub trait OverridePin {
    /// Samples the input; `true` means the override is asserted
    fn is_asserted(&mut self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakePin {
        asserted: bool,
    }

    impl OverridePin for FakePin {
        fn is_asserted(&mut self) -> bool {
            self.asserted
        }
    }

    #[test]
    fn test_pin_state() {
        let mut held = FakePin { asserted: true };
        let mut released = FakePin { asserted: false };

        assert!(held.is_asserted());
        assert!(!released.is_asserted());
    }
}
