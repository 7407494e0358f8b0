//! The boot sequence

use crate::config::{BootConfig, ConfigError, CONFIG_PATH};
use core_types::IndicatorState;
use editor::{EditorError, EditorSession, SessionOutcome};
use health::{BootDecision, BootDevices, HealthError, RecoveryController};
use runloop::{DeviceContext, TICK_INTERVAL_MS};
use script::{Interpreter, ScriptOutcome};
use storage::StorageKind;
use thiserror::Error;

/// How far the boot got and how it ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootReport {
    /// The boot health check took over; normal boot never started
    Recovery(BootDecision),
    /// The auto-exec script ran
    Script(ScriptOutcome),
    /// No usable config; the fallback editor session ran
    Editor(SessionOutcome),
}

/// Fatal boot error
///
/// Only health-store and editor-storage failures abort a boot; everything
/// else is reported and degraded around.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("health store failed: {0}")]
    Health(#[from] HealthError),
    #[error("editor failed: {0}")]
    Editor(#[from] EditorError),
}

/// Runs one full boot over the given devices
///
/// The health check runs first, before any other device is touched. On a
/// normal boot the storage backends are initialized (failures are shown and
/// logged, not fatal), the config decides between script and editor, and the
/// chosen session runs to completion.
pub fn boot(ctx: &mut DeviceContext) -> Result<BootReport, RuntimeError> {
    let controller = RecoveryController::new();
    let decision = controller.run_boot_check(
        BootDevices {
            health: ctx.health.as_mut(),
            override_pin: ctx.override_pin.as_mut(),
            indicator: ctx.indicator.as_mut(),
            display: ctx.display.as_mut(),
            removable: ctx.storage.backend_mut(StorageKind::Removable),
            updater: ctx.updater.as_mut(),
        },
        &mut ctx.log,
    )?;
    if decision != BootDecision::Continue {
        return Ok(BootReport::Recovery(decision));
    }

    ctx.indicator.set(IndicatorState::Boot);

    let mut init_failures = Vec::new();
    ctx.storage
        .init_all(|kind, e| init_failures.push(format!("{} storage init failed: {}", kind, e)));
    for failure in init_failures {
        ctx.display.print_line(&failure);
        ctx.log.warn(failure);
    }

    // An absent config, an unparseable one, and an empty auto_exec value all
    // mean the same thing: nothing to run, drop into the editor.
    match BootConfig::load(&ctx.storage) {
        Ok(BootConfig {
            auto_exec: Some(path),
        }) if !path.is_empty() => Ok(BootReport::Script(Interpreter::execute(&path, ctx))),
        Ok(_) | Err(ConfigError::Missing) => editor_fallback(ctx),
        Err(e) => {
            ctx.log.warn(format!("{}", e));
            editor_fallback(ctx)
        }
    }
}

/// Announces the missing config, then drops into the editor on it
fn editor_fallback(ctx: &mut DeviceContext) -> Result<BootReport, RuntimeError> {
    ctx.display.print_line("No config. Starting editor...");
    pause(ctx, 1000);

    let session = EditorSession::open(CONFIG_PATH, ctx)?;
    Ok(BootReport::Editor(session.run(ctx)?))
}

/// Sleeps in tick-sized slices so the stabilization monitor keeps running
fn pause(ctx: &mut DeviceContext, mut remaining: u64) {
    while remaining > 0 {
        let slice = remaining.min(TICK_INTERVAL_MS);
        ctx.clock.sleep_ms(slice);
        remaining -= slice;
        ctx.poll_monitor();
    }
}
