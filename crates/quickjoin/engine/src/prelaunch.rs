//! Helper programs started before the companion application

use crate::api::ProcessLauncher;
use quickjoin_types::AppCommand;
use tracing::{error, info};

/// Start every app in order, detached. Returns how many were started.
///
/// Blank binaries are skipped. A failure to start one app is logged and the
/// remaining apps are still attempted.
pub fn run_all<L: ProcessLauncher + ?Sized>(launcher: &L, apps: &[AppCommand]) -> usize {
    let mut started = 0;
    for app in apps {
        if app.binary.trim().is_empty() {
            continue;
        }
        let command_line = app.command_line();
        match launcher.spawn_detached(&app.binary, &app.args) {
            Ok(()) => {
                info!(binary = %app.binary, args = %command_line, "Launched additional app");
                started += 1;
            }
            Err(e) => {
                error!(binary = %app.binary, args = %command_line, error = %e, "Failed to launch additional app");
            }
        }
    }
    started
}
