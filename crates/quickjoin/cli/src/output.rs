//! Output formatting utilities

use colored::*;
use quickjoin_engine::{Attempt, Resolution};
use quickjoin_types::LaunchOutcome;

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// One line per tried identifier
pub fn print_attempts(attempts: &[Attempt]) {
    for attempt in attempts {
        let line = format!("{}: {}", attempt.id, attempt.resolution);
        match attempt.resolution {
            Resolution::Resolved(_) => println!("  {} {}", "→".green(), line),
            _ => println!("  {} {}", "·".dimmed(), line.dimmed()),
        }
    }
}

/// Final state of a run
pub fn print_outcome(outcome: &LaunchOutcome) {
    match outcome {
        LaunchOutcome::Launched {
            target: Some(target),
            ..
        } => print_success(&format!("Launched with target {}", target)),
        LaunchOutcome::Launched { target: None, .. } => {
            print_success("Launched with no target")
        }
        LaunchOutcome::Invited(target) => print_success(&format!("Invited to {}", target)),
        LaunchOutcome::NotImplemented(mode) => {
            print_warning(&format!("Launch mode {} is not implemented", mode))
        }
        LaunchOutcome::Skipped(reason) => print_warning(&format!("Nothing launched: {}", reason)),
    }
}
