//! Argument composition for the companion application

use indexmap::IndexSet;

/// Merge configured and runtime arguments.
///
/// `configured` is split on whitespace; every token from both sources is
/// trimmed, blanks are dropped, and each distinct token is kept once. The
/// result happens to keep first-seen order, but callers only get set
/// semantics.
pub fn merge<S: AsRef<str>>(configured: &str, runtime: &[S]) -> IndexSet<String> {
    configured
        .split_whitespace()
        .chain(runtime.iter().map(|arg| arg.as_ref()))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Arguments selecting VR or desktop mode
pub fn display_mode_arguments(use_vr: bool) -> Vec<String> {
    let args: &[&str] = if use_vr {
        &["--vrmode", "OpenVR"]
    } else {
        &["--no-vr", "-vrmode", "None"]
    };
    args.iter().map(|a| a.to_string()).collect()
}
