//! Status indicator (single LED) abstraction

use core_types::IndicatorState;

/// Status indicator trait
///
/// A single-slot color output. Whichever phase is currently active sets it;
/// no component owns it exclusively.
pub trait StatusIndicator {
    /// Sets the indicator to the given state
    fn set(&mut self, state: IndicatorState);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeIndicator {
        history: Vec<IndicatorState>,
    }

    impl StatusIndicator for FakeIndicator {
        fn set(&mut self, state: IndicatorState) {
            self.history.push(state);
        }
    }

    #[test]
    fn test_indicator_records_transitions() {
        let mut led = FakeIndicator { history: vec![] };
        led.set(IndicatorState::Boot);
        led.set(IndicatorState::Working);
        led.set(IndicatorState::Ok);

        assert_eq!(
            led.history,
            vec![
                IndicatorState::Boot,
                IndicatorState::Working,
                IndicatorState::Ok
            ]
        );
    }
}
