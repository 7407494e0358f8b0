//! Status indicator states
//!
//! The device carries a single status LED reflecting the current high-level
//! phase. The state is a side channel: whichever phase is active sets it, and
//! test harnesses observe it externally.

use crate::color::Rgb;
use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level phase shown on the status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorState {
    /// Boot in progress (violet)
    Boot,
    /// Script interpreter running (blue)
    Working,
    /// Script completed successfully (green)
    Ok,
    /// Recovery mode entered (red)
    Error,
    /// Stabilized, nothing to report (black / LED off)
    Off,
}

impl IndicatorState {
    /// Returns the LED color for this state
    pub const fn color(&self) -> Rgb {
        match self {
            Self::Boot => Rgb::VIOLET,
            Self::Working => Rgb::BLUE,
            Self::Ok => Rgb::GREEN,
            Self::Error => Rgb::RED,
            Self::Off => Rgb::BLACK,
        }
    }
}

impl fmt::Display for IndicatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boot => write!(f, "boot"),
            Self::Working => write!(f, "working"),
            Self::Ok => write!(f, "ok"),
            Self::Error => write!(f, "error"),
            Self::Off => write!(f, "off"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_protocol_colors() {
        assert_eq!(IndicatorState::Boot.color(), Rgb::VIOLET);
        assert_eq!(IndicatorState::Working.color(), Rgb::BLUE);
        assert_eq!(IndicatorState::Ok.color(), Rgb::GREEN);
        assert_eq!(IndicatorState::Error.color(), Rgb::RED);
        assert_eq!(IndicatorState::Off.color(), Rgb::BLACK);
    }

    #[test]
    fn test_indicator_serializes() {
        let json = serde_json::to_string(&IndicatorState::Working).unwrap();
        assert_eq!(json, "\"Working\"");
    }
}
