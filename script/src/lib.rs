//! # Script
//!
//! The line-oriented script interpreter: parse, dispatch, run.
//!
//! ## Philosophy
//!
//! - **One pass, one line at a time**: no lookahead, no jumps, no variables;
//!   a script is a straight sequence of commands
//! - **Closed command set**: the dispatch table is the whole language; an
//!   unknown token is reported on screen and skipped, never fatal
//! - **Cooperative throughout**: every wait (DELAY, WAIT) runs through the
//!   shared tick loop, so stabilization keeps being polled mid-script

pub mod command;
pub mod interpreter;
pub mod line;

pub use command::{Command, CommandError, CommandFlow, COMMAND_TABLE};
pub use interpreter::{Interpreter, ScriptOutcome};
pub use line::ScriptLine;
