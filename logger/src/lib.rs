//! # Logger
//!
//! This crate implements structured logging for KeyDeck.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not text-based or printf-style.
//! Entries are retained in memory so test harnesses can assert on them; the
//! daemon can additionally echo entries to stderr.

use core::fmt;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A structured log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)?;
        for (key, value) in &self.fields {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}

/// In-memory log with optional stderr echo
#[derive(Debug, Default)]
pub struct Logger {
    entries: Vec<LogEntry>,
    echo: bool,
}

impl Logger {
    /// Creates a new silent logger
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a logger that echoes every entry to stderr
    pub fn with_echo() -> Self {
        Self {
            entries: Vec::new(),
            echo: true,
        }
    }

    /// Records an entry
    pub fn log(&mut self, entry: LogEntry) {
        if self.echo {
            eprintln!("{}", entry);
        }
        self.entries.push(entry);
    }

    /// Records an info message
    pub fn info(&mut self, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Info, message));
    }

    /// Records a warning
    pub fn warn(&mut self, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Warn, message));
    }

    /// Records an error
    pub fn error(&mut self, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Error, message));
    }

    /// Returns all recorded entries
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Returns true if any entry at or above `level` contains `needle`
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.level >= level && e.message.contains(needle))
    }
}
