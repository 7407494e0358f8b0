//! The command set and its dispatch table

use core_types::Rgb;
use editor::{EditorError, EditorSession};
use input_types::KeyEvent;
use runloop::{DeviceContext, Tick, TICK_INTERVAL_MS};
use storage::{StorageError, StorageKind};
use thiserror::Error;

/// Error from a command handler
///
/// Handler errors are contained: the interpreter reports them and moves on to
/// the next line.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("editor error: {0}")]
    Editor(#[from] EditorError),
}

/// What the interpreter does after a handler returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandFlow {
    /// Move on to the next line
    Continue,
    /// A firmware image was accepted; the script terminates here
    Handoff,
}

/// The closed command set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Print,
    Delay,
    Color,
    Wait,
    Load,
    Edit,
}

/// Token-to-command dispatch table, the whole language
pub const COMMAND_TABLE: &[(&str, Command)] = &[
    ("PRINT", Command::Print),
    ("DELAY", Command::Delay),
    ("COLOR", Command::Color),
    ("WAIT", Command::Wait),
    ("LOAD", Command::Load),
    ("EDIT", Command::Edit),
];

impl Command {
    /// Looks a token up in the dispatch table
    pub fn lookup(token: &str) -> Option<Command> {
        COMMAND_TABLE
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, command)| *command)
    }

    /// Runs this command with the given argument
    pub fn execute(
        self,
        arg: &str,
        ctx: &mut DeviceContext,
    ) -> Result<CommandFlow, CommandError> {
        match self {
            Command::Print => {
                ctx.display.print_line(arg);
                Ok(CommandFlow::Continue)
            }
            Command::Delay => {
                delay(arg, ctx);
                Ok(CommandFlow::Continue)
            }
            Command::Color => {
                ctx.display.fill(Rgb::from_hex(arg));
                Ok(CommandFlow::Continue)
            }
            Command::Wait => {
                wait_for_enter(ctx);
                Ok(CommandFlow::Continue)
            }
            Command::Load => load(arg, ctx),
            Command::Edit => edit(arg, ctx),
        }
    }
}

/// Sleeps for the argument's millisecond count
///
/// An unparsable argument means no delay. The sleep is sliced at the tick
/// interval with a monitor poll between slices, so a long DELAY cannot
/// starve stabilization.
fn delay(arg: &str, ctx: &mut DeviceContext) {
    let mut remaining: u64 = arg.trim().parse().unwrap_or(0);
    while remaining > 0 {
        let slice = remaining.min(TICK_INTERVAL_MS);
        ctx.clock.sleep_ms(slice);
        remaining -= slice;
        ctx.poll_monitor();
    }
}

/// Blocks until the confirm key arrives, discarding everything else
fn wait_for_enter(ctx: &mut DeviceContext) {
    loop {
        if let Tick::Input(KeyEvent::Enter) = ctx.next_tick() {
            return;
        }
    }
}

/// Reads a firmware image from removable storage and hands it to the updater
///
/// Firmware only ever ships on the removable card, whatever shape the path
/// takes. A missing image and a rejected image are both reported on screen
/// and the script continues. Only an accepted image terminates the script.
fn load(arg: &str, ctx: &mut DeviceContext) -> Result<CommandFlow, CommandError> {
    let backend = ctx.storage.backend(StorageKind::Removable);
    if !backend.exists(arg) {
        ctx.display.print_line("ERR: File not found");
        return Ok(CommandFlow::Continue);
    }

    let image = backend.read(arg)?;
    ctx.display.print_line(&format!("Loading {}...", arg));
    match ctx.updater.apply(&image) {
        Ok(_) => Ok(CommandFlow::Handoff),
        Err(e) => {
            ctx.display.print_line(&format!("ERR: {}", e));
            ctx.log.error(format!("firmware apply failed: {}", e));
            Ok(CommandFlow::Continue)
        }
    }
}

/// Runs a full editor session, then clears the screen for the script
fn edit(arg: &str, ctx: &mut DeviceContext) -> Result<CommandFlow, CommandError> {
    let session = EditorSession::open(arg, ctx)?;
    let outcome = session.run(ctx)?;
    ctx.log.info(format!("editor on {} closed: {:?}", arg, outcome));
    ctx.display.fill(Rgb::BLACK);
    Ok(CommandFlow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_device::SimDeviceSet;

    #[test]
    fn test_lookup_is_exact_and_closed() {
        assert_eq!(Command::lookup("PRINT"), Some(Command::Print));
        assert_eq!(Command::lookup("LOAD"), Some(Command::Load));
        assert_eq!(Command::lookup("PRINTX"), None);
        // Lookup happens after the parser uppercases the token.
        assert_eq!(Command::lookup("print"), None);
    }

    #[test]
    fn test_delay_sleeps_the_argument() {
        let sims = SimDeviceSet::new();
        let mut ctx = sims.context();

        Command::Delay.execute("250", &mut ctx).unwrap();
        assert_eq!(sims.clock.now(), 250);
    }

    #[test]
    fn test_delay_invalid_argument_means_zero() {
        let sims = SimDeviceSet::new();
        let mut ctx = sims.context();

        Command::Delay.execute("soon", &mut ctx).unwrap();
        Command::Delay.execute("", &mut ctx).unwrap();
        assert_eq!(sims.clock.now(), 0);
    }

    #[test]
    fn test_delay_keeps_polling_stabilization() {
        let sims = SimDeviceSet::new();
        let mut ctx = sims.context();
        ctx.health.write_fails(2).unwrap();

        Command::Delay.execute("12000", &mut ctx).unwrap();

        assert!(ctx.monitor.is_stabilized());
        assert_eq!(sims.nvram.fails(), 0);
    }

    #[test]
    fn test_color_fills_with_parsed_color() {
        let sims = SimDeviceSet::new();
        let mut ctx = sims.context();

        Command::Color.execute("FF8000", &mut ctx).unwrap();
        assert_eq!(sims.display.last_fill(), Some(Rgb::from_u32(0xFF8000)));
    }

    #[test]
    fn test_color_invalid_argument_fills_black() {
        let sims = SimDeviceSet::new();
        let mut ctx = sims.context();

        Command::Color.execute("not-a-color", &mut ctx).unwrap();
        assert_eq!(sims.display.last_fill(), Some(Rgb::BLACK));
    }

    #[test]
    fn test_wait_consumes_until_enter() {
        let sims = SimDeviceSet::new();
        sims.keyboard.type_text("ab");
        sims.keyboard.push(KeyEvent::Enter);
        sims.keyboard.push(KeyEvent::Char('z'));
        let mut ctx = sims.context();

        Command::Wait.execute("", &mut ctx).unwrap();

        // Everything up to and including Enter was consumed, nothing after.
        assert_eq!(sims.keyboard.pending(), 1);
    }

    #[test]
    fn test_load_missing_image_reports_and_continues() {
        let sims = SimDeviceSet::new();
        let mut ctx = sims.context();

        let flow = Command::Load.execute("/sd/update.bin", &mut ctx).unwrap();

        assert_eq!(flow, CommandFlow::Continue);
        assert!(sims.display.printed("ERR: File not found"));
        assert!(sims.firmware.applied_digests().is_empty());
    }

    #[test]
    fn test_load_applies_image_and_hands_off() {
        let sims = SimDeviceSet::new();
        sims.removable.preload("/sd/update.bin", b"new firmware");
        let mut ctx = sims.context();

        let flow = Command::Load.execute("/sd/update.bin", &mut ctx).unwrap();

        assert_eq!(flow, CommandFlow::Handoff);
        assert_eq!(
            sims.firmware.applied_digests(),
            vec![sim_device::SimFirmware::digest_of(b"new firmware")]
        );
    }

    #[test]
    fn test_load_always_reads_removable_storage() {
        let sims = SimDeviceSet::new();
        // The same path exists on both backends; only the card copy counts.
        sims.onboard.preload("/fw.bin", b"onboard copy");
        sims.removable.preload("/fw.bin", b"card copy");
        let mut ctx = sims.context();

        let flow = Command::Load.execute("/fw.bin", &mut ctx).unwrap();

        assert_eq!(flow, CommandFlow::Handoff);
        assert_eq!(
            sims.firmware.applied_digests(),
            vec![sim_device::SimFirmware::digest_of(b"card copy")]
        );
    }

    #[test]
    fn test_load_rejected_image_reports_and_continues() {
        let sims = SimDeviceSet::new();
        sims.removable.preload("/sd/update.bin", b"bad image");
        sims.firmware.reject_images();
        let mut ctx = sims.context();

        let flow = Command::Load.execute("/sd/update.bin", &mut ctx).unwrap();

        assert_eq!(flow, CommandFlow::Continue);
        assert!(sims.display.printed("ERR:"));
    }

    #[test]
    fn test_edit_runs_session_then_clears_screen() {
        let sims = SimDeviceSet::new();
        sims.removable.preload("data.txt", b"");
        sims.keyboard.type_text("note");
        sims.keyboard.push(KeyEvent::Escape);
        sims.keyboard.push(KeyEvent::Enter);
        let mut ctx = sims.context();

        let flow = Command::Edit.execute("data.txt", &mut ctx).unwrap();

        assert_eq!(flow, CommandFlow::Continue);
        // Relative path routed to removable, saved on confirm.
        assert_eq!(sims.removable.text("data.txt").unwrap(), "note");
        assert_eq!(sims.display.last_fill(), Some(Rgb::BLACK));
    }
}
