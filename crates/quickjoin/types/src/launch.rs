//! Launch policy, modes and outcomes

use crate::instance::ResolvedTarget;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default deep link the companion application registers
pub const DEFAULT_GAME_URI: &str = "vrchat://launch";

/// How the companion application is started once a target is known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum LaunchMode {
    /// Unrecognized configuration value
    Unknown,
    /// Shell-open the deep link
    #[default]
    Uri,
    /// Start the companion application's launcher executable
    Launcher,
    /// Start through Steam
    Steam,
    /// Ask the platform to invite the current account
    SelfInvite,
}

impl LaunchMode {
    /// Modes in their persisted numeric order
    const ORDERED: [LaunchMode; 5] = [
        LaunchMode::Unknown,
        LaunchMode::Uri,
        LaunchMode::Launcher,
        LaunchMode::Steam,
        LaunchMode::SelfInvite,
    ];

    fn from_index(index: u64) -> Self {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ORDERED.get(i).copied())
            .unwrap_or(Self::Unknown)
    }
}

impl fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "Unknown",
            Self::Uri => "Uri",
            Self::Launcher => "Launcher",
            Self::Steam => "Steam",
            Self::SelfInvite => "SelfInvite",
        };
        f.write_str(name)
    }
}

impl FromStr for LaunchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "uri" => Ok(Self::Uri),
            "launcher" => Ok(Self::Launcher),
            "steam" => Ok(Self::Steam),
            "selfinvite" | "invite" => Ok(Self::SelfInvite),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("unknown launch mode: {}", other)),
        }
    }
}

/// Accepts either the mode name or its numeric index; anything else is
/// [`LaunchMode::Unknown`] rather than a load failure.
impl<'de> Deserialize<'de> for LaunchMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Index(u64),
            Name(String),
            Other(serde_json::Value),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Index(index) => LaunchMode::from_index(index),
            Raw::Name(name) => name.parse().unwrap_or(LaunchMode::Unknown),
            Raw::Other(_) => LaunchMode::Unknown,
        })
    }
}

/// A helper program started before the companion application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppCommand {
    pub binary: String,
    pub args: Vec<String>,
}

impl AppCommand {
    pub fn new(binary: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            binary: binary.into(),
            args,
        }
    }

    /// Build from a configured `[binary, arg, …]` tuple. Empty tuples give an
    /// empty binary, which the runner skips.
    pub fn from_parts(parts: &[String]) -> Self {
        match parts.split_first() {
            Some((binary, args)) => Self::new(binary.clone(), args.to_vec()),
            None => Self::new(String::new(), Vec::new()),
        }
    }

    /// Arguments joined by spaces, quoting any that contain whitespace
    pub fn command_line(&self) -> String {
        self.args
            .iter()
            .map(|arg| {
                if arg.chars().any(char::is_whitespace) {
                    format!("\"{}\"", arg)
                } else {
                    arg.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Launch settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPolicy {
    pub mode: LaunchMode,
    /// Whitespace separated arguments passed to the companion application
    pub game_arguments: String,
    pub additional_apps: Vec<AppCommand>,
    /// Base deep link; the target is added as its `id` query parameter
    pub game_uri: String,
    /// In `Uri` mode, self-invite instead when the application already runs
    pub invite_when_running: bool,
}

impl Default for LaunchPolicy {
    fn default() -> Self {
        Self {
            mode: LaunchMode::Uri,
            game_arguments: String::new(),
            additional_apps: Vec::new(),
            game_uri: DEFAULT_GAME_URI.to_string(),
            invite_when_running: false,
        }
    }
}

/// Terminal state of the launch phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The deep link was opened, with or without a target
    Launched {
        target: Option<ResolvedTarget>,
        link: String,
    },
    /// The platform was asked to invite the current account
    Invited(ResolvedTarget),
    /// The configured mode has no implementation
    NotImplemented(LaunchMode),
    /// Nothing was launched
    Skipped(String),
}
