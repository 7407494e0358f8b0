//! # Input Types
//!
//! This crate defines the decoded keyboard event type for KeyDeck.
//!
//! ## Philosophy
//!
//! - **Events, not bytes**: input is structured events, not raw scan codes
//! - **Testable**: events are serializable and can be injected for testing
//! - **Decoded upstream**: scan-code decoding is a device-driver concern and
//!   happens below this layer; sessions only ever see these events
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - Raw hardware scan codes or matrix positions
//! - A POSIX terminal or stdin
//! - A complete input subsystem (just the event type)

use core::fmt;
use serde::{Deserialize, Serialize};

/// A decoded keyboard event
///
/// One event per key-change, as produced by the keyboard driver. The editor
/// and the interpreter's WAIT command consume these through the tick loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    /// A printable character was produced
    Char(char),
    /// The delete key; removes the last character of the active buffer
    Backspace,
    /// Line submit
    Enter,
    /// Cancel / exit key
    Escape,
}

impl KeyEvent {
    /// Returns the produced character, if this is a character event
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Expands a text string into one character event per char
    pub fn text(text: &str) -> Vec<KeyEvent> {
        text.chars().map(KeyEvent::Char).collect()
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "char '{}'", c),
            Self::Backspace => write!(f, "backspace"),
            Self::Enter => write!(f, "enter"),
            Self::Escape => write!(f, "escape"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_char() {
        assert_eq!(KeyEvent::Char('x').as_char(), Some('x'));
        assert_eq!(KeyEvent::Enter.as_char(), None);
    }

    #[test]
    fn test_text_expansion() {
        let events = KeyEvent::text("hi");
        assert_eq!(events, vec![KeyEvent::Char('h'), KeyEvent::Char('i')]);
    }

    #[test]
    fn test_events_serialize() {
        let json = serde_json::to_string(&KeyEvent::Char('a')).unwrap();
        let back: KeyEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, KeyEvent::Char('a'));
    }
}
