//! Script execution

use crate::command::{Command, CommandFlow};
use crate::line::ScriptLine;
use core_types::IndicatorState;
use runloop::DeviceContext;

/// How a script run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptOutcome {
    /// Every line ran to the end of the script
    Completed,
    /// The script was not found on either backend
    Missing,
    /// A LOAD command accepted a firmware image; control leaves the system
    Handoff,
}

/// The line-oriented interpreter
///
/// Stateless across runs; each [`Interpreter::execute`] reads the script
/// fresh and walks it once, top to bottom.
pub struct Interpreter;

impl Interpreter {
    /// Runs the script at `path` to completion
    ///
    /// The script is read from onboard storage first, then removable. The
    /// indicator shows Working for the whole run and Ok only after the last
    /// line. Unknown commands and handler errors are reported and skipped.
    pub fn execute(path: &str, ctx: &mut DeviceContext) -> ScriptOutcome {
        ctx.indicator.set(IndicatorState::Working);

        let source = match ctx.storage.read_script(path) {
            Some(source) => source,
            None => {
                ctx.log.warn(format!("script not found: {}", path));
                ctx.display.print_line(&format!("Script missing: {}", path));
                return ScriptOutcome::Missing;
            }
        };
        ctx.log.info(format!("running {}", path));

        for (number, raw) in source.lines().enumerate() {
            ctx.poll_monitor();

            let Some(line) = ScriptLine::parse(raw) else {
                continue;
            };

            let Some(command) = Command::lookup(line.token()) else {
                ctx.display.print_line(&format!("Unknown: {}", line.token()));
                ctx.log.warn(format!("line {}: unknown command {}", number + 1, line.token()));
                continue;
            };

            match command.execute(line.arg(), ctx) {
                Ok(CommandFlow::Continue) => {}
                Ok(CommandFlow::Handoff) => {
                    ctx.log.info(format!("line {}: firmware handoff", number + 1));
                    return ScriptOutcome::Handoff;
                }
                Err(e) => {
                    ctx.display.print_line(&format!("ERR: {}", e));
                    ctx.log.error(format!("line {}: {}", number + 1, e));
                }
            }
        }

        ctx.indicator.set(IndicatorState::Ok);
        ScriptOutcome::Completed
    }
}
