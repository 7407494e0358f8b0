//! # Input Script Parser
//!
//! A simple scripted key-input format for deterministic runs and demos.
//!
//! ## Format
//!
//! Scripts are line-based, with each line representing one input action:
//! - Key names: `Enter`, `Escape`, `Backspace`, `Space`
//! - Single characters: `a`, `A`, `0-9`, punctuation
//! - Text strings: `"Hello World"` (expanded to individual key presses;
//!   everything between the outer quotes is verbatim)
//! - Comments: `# This is a comment`
//!
//! ## Example
//!
//! ```text
//! # Type some text, then save on the way out
//! "hello from the script"
//! Escape
//! Enter
//! ```

use input_types::KeyEvent;
use thiserror::Error;

/// Key script parse error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyScriptError {
    #[error("invalid key name at line {line}: {name}")]
    InvalidKeyName { line: usize, name: String },
}

/// Parses a key script into the event sequence it describes
pub fn parse_key_script(text: &str) -> Result<Vec<KeyEvent>, KeyScriptError> {
    let mut events = Vec::new();

    for (number, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.len() >= 2 && line.starts_with('"') && line.ends_with('"') {
            events.extend(KeyEvent::text(&line[1..line.len() - 1]));
            continue;
        }

        match line.to_lowercase().as_str() {
            "enter" | "return" => events.push(KeyEvent::Enter),
            "escape" | "esc" => events.push(KeyEvent::Escape),
            "backspace" | "back" => events.push(KeyEvent::Backspace),
            "space" => events.push(KeyEvent::Char(' ')),
            _ => {
                let mut chars = line.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => events.push(KeyEvent::Char(c)),
                    _ => {
                        return Err(KeyScriptError::InvalidKeyName {
                            line: number + 1,
                            name: line.to_string(),
                        })
                    }
                }
            }
        }
    }

    Ok(events)
}
