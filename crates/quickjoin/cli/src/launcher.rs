//! Process launcher backed by the operating system

use quickjoin_engine::ProcessLauncher;
use std::ffi::OsStr;
use std::io;
use std::process::{Command, Stdio};
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System};
use tracing::debug;

/// SteamVR runs both of these while a headset session is active
const STEAMVR_PROCESSES: [&str; 2] = ["vrmonitor", "vrcompositor"];
/// Virtual Desktop streamer
const VIRTUAL_DESKTOP_PROCESS: &str = "VRServer";

/// Launches through the platform shell and inspects the process table
#[derive(Debug, Default)]
pub struct SystemLauncher;

impl SystemLauncher {
    pub fn new() -> Self {
        Self
    }

    /// Whether a VR runtime is up, to pick the display mode
    pub fn vr_runtime_running(&self) -> bool {
        let system = process_snapshot();
        let steamvr = STEAMVR_PROCESSES
            .iter()
            .all(|name| has_process(&system, name));
        let running = steamvr || has_process(&system, VIRTUAL_DESKTOP_PROCESS);
        debug!(steamvr, running, "VR runtime detection");
        running
    }
}

impl ProcessLauncher for SystemLauncher {
    fn open_uri(&self, uri: &str, args: &[String]) -> io::Result<()> {
        let mut command = shell_open_command(uri, args);
        debug!(?command, "Opening link");
        command.spawn()?;
        Ok(())
    }

    fn spawn_detached(&self, binary: &str, args: &[String]) -> io::Result<()> {
        let mut command = helper_command(binary, args);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        debug!(?command, "Starting helper");
        command.spawn()?;
        Ok(())
    }

    fn is_running(&self, process_name: &str) -> bool {
        has_process(&process_snapshot(), process_name)
    }
}

fn process_snapshot() -> System {
    let mut system = System::new_with_specifics(
        RefreshKind::nothing().with_processes(ProcessRefreshKind::nothing()),
    );
    system.refresh_processes(ProcessesToUpdate::All, true);
    system
}

fn has_process(system: &System, name: &str) -> bool {
    system
        .processes()
        .values()
        .any(|process| process_name_matches(process.name(), name))
}

/// Exact, case-insensitive match on the image name, ignoring an `.exe` suffix
fn process_name_matches(image: &OsStr, wanted: &str) -> bool {
    let image = image.to_string_lossy();
    image_stem(&image).eq_ignore_ascii_case(image_stem(wanted))
}

fn image_stem(name: &str) -> &str {
    let split = name.len().saturating_sub(4);
    match (name.get(..split), name.get(split..)) {
        (Some(stem), Some(ext)) if ext.eq_ignore_ascii_case(".exe") => stem,
        _ => name,
    }
}

/// Tail of a `cmd /C start` invocation. The empty title and the target are
/// quoted for cmd itself, so the whole tail must be passed unescaped.
#[cfg(any(windows, test))]
fn start_command_line(target: &str, args: &[String]) -> String {
    let mut line = format!("/C start \"\" \"{}\"", target);
    for arg in args {
        line.push(' ');
        if arg.is_empty() || arg.chars().any(char::is_whitespace) {
            line.push('"');
            line.push_str(arg);
            line.push('"');
        } else {
            line.push_str(arg);
        }
    }
    line
}

#[cfg(windows)]
fn shell_start(target: &str, args: &[String]) -> Command {
    use std::os::windows::process::CommandExt;

    const CREATE_NO_WINDOW: u32 = 0x0800_0000;

    let mut command = Command::new("cmd");
    command
        .raw_arg(start_command_line(target, args))
        .creation_flags(CREATE_NO_WINDOW);
    command
}

/// Command that hands `uri` to the desktop's URL handler
#[cfg(windows)]
fn shell_open_command(uri: &str, args: &[String]) -> Command {
    shell_start(uri, args)
}

/// Helpers go through the shell too, so shortcuts and documents open
#[cfg(windows)]
fn helper_command(binary: &str, args: &[String]) -> Command {
    shell_start(binary, args)
}

#[cfg(target_os = "macos")]
fn shell_open_command(uri: &str, args: &[String]) -> Command {
    let mut command = Command::new("open");
    command.arg(uri);
    if !args.is_empty() {
        command.arg("--args").args(args);
    }
    command
}

#[cfg(not(any(windows, target_os = "macos")))]
fn shell_open_command(uri: &str, args: &[String]) -> Command {
    if !args.is_empty() {
        tracing::warn!(count = args.len(), "xdg-open cannot forward game arguments; they are dropped");
    }
    let mut command = Command::new("xdg-open");
    command.arg(uri);
    command
}

/// Own process group, so terminal signals to quickjoin do not reach helpers
#[cfg(unix)]
fn helper_command(binary: &str, args: &[String]) -> Command {
    use std::os::unix::process::CommandExt;

    let mut command = Command::new(binary);
    command.args(args).process_group(0);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_start_line_keeps_title_and_target_quoted() {
        let line = start_command_line(
            "vrchat://launch?ref=quick&id=wrld_a:1",
            &strings(&["--no-vr", "-vrmode", "None", "--profile=Full Body"]),
        );
        assert_eq!(
            line,
            r#"/C start "" "vrchat://launch?ref=quick&id=wrld_a:1" --no-vr -vrmode None "--profile=Full Body""#
        );
    }

    #[test]
    fn test_start_line_for_shortcut() {
        let line = start_command_line(r"C:\Tools\Overlay.lnk", &[]);
        assert_eq!(line, r#"/C start "" "C:\Tools\Overlay.lnk""#);
    }

    #[cfg(windows)]
    #[test]
    fn test_windows_commands_pass_tail_unescaped() {
        let uri = "vrchat://launch?id=wrld_a:1";
        let args = strings(&["--no-vr"]);

        let open = shell_open_command(uri, &args);
        assert_eq!(open.get_program(), "cmd");
        let tail: Vec<_> = open.get_args().collect();
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0], start_command_line(uri, &args).as_str());
        assert!(!tail[0].to_string_lossy().contains(r#"\""#));

        let helper = helper_command(r"C:\Tools\Overlay.lnk", &[]);
        assert_eq!(helper.get_program(), "cmd");
        assert_eq!(
            helper.get_args().collect::<Vec<_>>(),
            vec![r#"/C start "" "C:\Tools\Overlay.lnk""#]
        );
    }

    #[cfg(not(any(windows, target_os = "macos")))]
    #[test]
    fn test_xdg_open_command() {
        let command = shell_open_command("vrchat://launch", &strings(&["--no-vr"]));
        assert_eq!(command.get_program(), "xdg-open");
        assert_eq!(command.get_args().collect::<Vec<_>>(), vec!["vrchat://launch"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_helper_runs_binary_directly() {
        let command = helper_command("/opt/overlay", &strings(&["--tray", "Full Body"]));
        assert_eq!(command.get_program(), "/opt/overlay");
        assert_eq!(command.get_args().collect::<Vec<_>>(), vec!["--tray", "Full Body"]);
    }

    #[test]
    fn test_process_names_match_exactly() {
        assert!(process_name_matches(OsStr::new("VRChat.exe"), "VRChat"));
        assert!(process_name_matches(OsStr::new("vrchat.EXE"), "VRChat"));
        assert!(process_name_matches(OsStr::new("VRChat"), "VRChat"));
        assert!(!process_name_matches(OsStr::new("VRChatQuickJoin.exe"), "VRChat"));
        assert!(!process_name_matches(OsStr::new("VRChatOSC"), "VRChat"));
        assert!(!process_name_matches(OsStr::new("VRCha.exe"), "VRChat"));
    }

    #[test]
    fn test_running_check_ignores_name_prefixes() {
        let system = process_snapshot();
        let pid = sysinfo::get_current_pid().unwrap();
        let image = system.process(pid).unwrap().name().to_string_lossy().into_owned();
        let own = image_stem(&image).to_string();

        let launcher = SystemLauncher::new();
        assert!(launcher.is_running(&own));

        let prefix: String = own.chars().take(own.chars().count() - 1).collect();
        assert!(!launcher.is_running(&prefix));
    }

    #[test]
    fn test_missing_process_is_not_running() {
        let launcher = SystemLauncher::new();
        assert!(!launcher.is_running("quickjoin-no-such-process-7f3a"));
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_binary_fails_to_spawn() {
        let launcher = SystemLauncher::new();
        assert!(launcher
            .spawn_detached("/nonexistent/quickjoin-helper", &[])
            .is_err());
    }
}
