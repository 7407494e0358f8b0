//! # Editor
//!
//! The cooperative text-editing session: `Loading → Editing ⇄ ConfirmExit`,
//! terminating as `Saved` (confirmed from the prompt) or `Discarded` (exit
//! with no unsaved changes).
//!
//! ## Philosophy
//!
//! - **One buffer, one owner**: the session exclusively owns its buffer; no
//!   other component reads or mutates it
//! - **Cooperative**: one tick per iteration through the shared run loop, so
//!   stabilization keeps being polled while the user types
//! - **Deliberate persistence**: the stored resource only ever reflects the
//!   last fully confirmed save — no autosave, no undo, no partial writes

pub mod session;

pub use session::{EditorError, EditorSession, SessionOutcome, BLINK_INTERVAL_MS};
