//! The editor session state machine

use core_types::Rgb;
use input_types::KeyEvent;
use runloop::{DeviceContext, Tick};
use storage::StorageError;
use thiserror::Error;

/// Cursor blink half-period
pub const BLINK_INTERVAL_MS: u64 = 500;

/// Editor error
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Buffer written to the resolved path
    Saved,
    /// Buffer dropped without writing
    Discarded,
}

/// Session states after loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Editing,
    ConfirmExit,
}

/// A cooperative editing session over one storage resource
///
/// Created by [`EditorSession::open`] (the loading state), then driven one
/// tick at a time by [`EditorSession::step`], or to completion by
/// [`EditorSession::run`]. The buffer is destroyed with the session.
///
/// Exit flow: with no unsaved changes, the exit key ends the session
/// immediately as `Discarded`. With unsaved changes it opens the save/discard
/// prompt, which accepts exactly two inputs — confirm (write and terminate
/// as `Saved`) or cancel (drop the prompt and keep editing).
pub struct EditorSession {
    path: String,
    buffer: String,
    state: SessionState,
    /// Unsaved changes exist
    dirty: bool,
    /// Text region differs from what was last drawn
    region_dirty: bool,
    cursor_visible: bool,
    last_blink_ms: u64,
}

impl EditorSession {
    /// Loads the resource at `path`, or starts empty if it does not exist
    ///
    /// The path is routed through the storage selector; the same backend is
    /// used again at save time. No size ceiling is enforced.
    pub fn open(path: &str, ctx: &mut DeviceContext) -> Result<Self, EditorError> {
        let backend = ctx.storage.resolve(path);
        let buffer = if backend.exists(path) {
            backend.read_to_string(path)?
        } else {
            String::new()
        };

        Ok(Self {
            path: path.to_string(),
            buffer,
            state: SessionState::Editing,
            dirty: false,
            region_dirty: true,
            cursor_visible: true,
            last_blink_ms: ctx.clock.now_ms(),
        })
    }

    /// Returns the current buffer contents
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Returns true while unsaved changes exist
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns true while the save/discard prompt is up
    pub fn is_confirming(&self) -> bool {
        self.state == SessionState::ConfirmExit
    }

    /// Runs the session to completion
    pub fn run(mut self, ctx: &mut DeviceContext) -> Result<SessionOutcome, EditorError> {
        loop {
            if let Some(outcome) = self.step(ctx)? {
                return Ok(outcome);
            }
        }
    }

    /// Advances the session by one tick
    ///
    /// Returns `Some(outcome)` when the session has terminated. Each call
    /// consumes exactly one tick of the shared loop, which also polls the
    /// stabilization monitor.
    pub fn step(&mut self, ctx: &mut DeviceContext) -> Result<Option<SessionOutcome>, EditorError> {
        let tick = ctx.next_tick();

        match self.state {
            SessionState::Editing => {
                if let Tick::Input(event) = tick {
                    if let Some(outcome) = self.handle_edit_key(event, ctx) {
                        return Ok(Some(outcome));
                    }
                }
                self.render(ctx);
                Ok(None)
            }
            SessionState::ConfirmExit => self.handle_confirm_tick(tick, ctx),
        }
    }

    fn handle_edit_key(&mut self, event: KeyEvent, ctx: &mut DeviceContext) -> Option<SessionOutcome> {
        match event {
            KeyEvent::Char(c) => {
                self.buffer.push(c);
                self.mark_dirty();
            }
            KeyEvent::Backspace => {
                // Deletion is always from the end; empty buffer is a no-op.
                if self.buffer.pop().is_some() {
                    self.mark_dirty();
                }
            }
            KeyEvent::Enter => {
                self.buffer.push('\n');
                self.mark_dirty();
            }
            KeyEvent::Escape => {
                if !self.dirty {
                    // Nothing unsaved to guard; the buffer is dropped as-is.
                    return Some(SessionOutcome::Discarded);
                }
                ctx.display.show_modal("ENTER: Save\nESC: Discard");
                self.state = SessionState::ConfirmExit;
            }
        }
        None
    }

    fn handle_confirm_tick(
        &mut self,
        tick: Tick,
        ctx: &mut DeviceContext,
    ) -> Result<Option<SessionOutcome>, EditorError> {
        match tick {
            Tick::Input(KeyEvent::Enter) => {
                let backend = ctx.storage.resolve_mut(&self.path);
                backend.write(&self.path, self.buffer.as_bytes())?;
                ctx.log.info(format!("saved {}", self.path));
                Ok(Some(SessionOutcome::Saved))
            }
            Tick::Input(KeyEvent::Escape) => {
                // Back to editing: drop the modal and force a text repaint.
                ctx.display.fill(Rgb::BLACK);
                self.region_dirty = true;
                self.state = SessionState::Editing;
                Ok(None)
            }
            // No other input is accepted here, and there is no timeout.
            _ => Ok(None),
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        self.region_dirty = true;
    }

    /// Redraws the text region only when it changed; blinks the cursor on its
    /// own fixed interval so blinking never forces a text repaint
    fn render(&mut self, ctx: &mut DeviceContext) {
        if self.region_dirty {
            let marker = if self.dirty { "*" } else { "" };
            let color = if self.dirty {
                Rgb::ORANGE
            } else {
                Rgb::DARK_GREY
            };
            ctx.display.clear_text_region();
            ctx.display
                .status_bar(&format!("EDIT: {}{}", self.path, marker), color);
            ctx.display.draw_text(&self.buffer);
            self.region_dirty = false;
        }

        let now = ctx.clock.now_ms();
        if now.saturating_sub(self.last_blink_ms) >= BLINK_INTERVAL_MS {
            self.cursor_visible = !self.cursor_visible;
            ctx.display.draw_cursor(self.cursor_visible);
            self.last_blink_ms = now;
        }
    }
}
