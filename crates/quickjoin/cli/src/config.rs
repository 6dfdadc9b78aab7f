//! CLI configuration

use crate::error::{CliError, CliResult};
use indexmap::IndexMap;
use quickjoin_client::SessionCookies;
use quickjoin_engine::ResolveOptions;
use quickjoin_types::{AppCommand, Identifier, LaunchMode, LaunchPolicy, DEFAULT_GAME_URI};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persisted configuration. Keys are PascalCase so files written by older
/// releases keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AppConfig {
    pub wait_on_exit: bool,
    pub fetch_details: bool,
    pub overwrite_comments: bool,

    pub username: String,
    pub password: String,
    /// Stored for the user; codes are always entered by hand
    #[serde(rename = "TOTPSecret")]
    pub totp_secret: String,

    pub game_arguments: String,
    pub launch_mode: LaunchMode,
    pub game_uri: String,
    pub invite_when_running: bool,

    /// Identifier to comment, in priority order
    pub ids: IndexMap<String, String>,
    /// Helper programs as `[binary, arg, …]`
    pub run_additional: Vec<Vec<String>>,

    #[serde(rename = "_AuthCookie")]
    pub auth_cookie: String,
    #[serde(rename = "_TwoFactorAuthCookie")]
    pub two_factor_auth_cookie: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wait_on_exit: false,
            fetch_details: false,
            overwrite_comments: true,
            username: String::new(),
            password: String::new(),
            totp_secret: String::new(),
            game_arguments: String::new(),
            launch_mode: LaunchMode::Uri,
            game_uri: DEFAULT_GAME_URI.to_string(),
            invite_when_running: false,
            ids: IndexMap::new(),
            run_additional: Vec::new(),
            auth_cookie: String::new(),
            two_factor_auth_cookie: String::new(),
        }
    }
}

impl AppConfig {
    /// Configured identifiers in priority order
    pub fn identifiers(&self) -> Vec<Identifier> {
        self.ids.keys().map(|id| Identifier::parse(id)).collect()
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            fetch_details: self.fetch_details,
            overwrite_comments: self.overwrite_comments,
        }
    }

    pub fn launch_policy(&self) -> LaunchPolicy {
        let game_uri = if self.game_uri.trim().is_empty() {
            DEFAULT_GAME_URI.to_string()
        } else {
            self.game_uri.clone()
        };

        LaunchPolicy {
            mode: self.launch_mode,
            game_arguments: self.game_arguments.clone(),
            additional_apps: self
                .run_additional
                .iter()
                .map(|parts| AppCommand::from_parts(parts))
                .collect(),
            game_uri,
            invite_when_running: self.invite_when_running,
        }
    }

    pub fn session_cookies(&self) -> SessionCookies {
        fn non_empty(value: &str) -> Option<String> {
            Some(value.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        SessionCookies {
            auth: non_empty(&self.auth_cookie),
            two_factor_auth: non_empty(&self.two_factor_auth_cookie),
        }
    }

    /// Remember the session; absent cookies keep the stored value
    pub fn update_session(&mut self, cookies: &SessionCookies) {
        if let Some(auth) = &cookies.auth {
            self.auth_cookie = auth.clone();
        }
        if let Some(two_factor) = &cookies.two_factor_auth {
            self.two_factor_auth_cookie = two_factor.clone();
        }
    }
}

/// Result of loading the configuration file
#[derive(Debug)]
pub enum Loaded {
    Existing(AppConfig),
    /// No file was present; defaults were written to the path
    Created,
}

/// Reads and writes the configuration file
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store at `path`, or at the default location
    pub fn open(path: Option<&str>) -> CliResult<Self> {
        let path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load configuration from file, writing defaults when it is missing
    pub fn load(&self) -> CliResult<Loaded> {
        if !self.path.exists() {
            self.save(&AppConfig::default())?;
            return Ok(Loaded::Created);
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let config: AppConfig = serde_json::from_str(&contents).map_err(|e| {
            CliError::Config(format!("{}: {}", self.path.display(), e))
        })?;
        debug!(path = %self.path.display(), ids = config.ids.len(), "Configuration loaded");
        Ok(Loaded::Existing(config))
    }

    pub fn save(&self, config: &AppConfig) -> CliResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.path, contents)?;
        debug!(path = %self.path.display(), "Configuration saved");
        Ok(())
    }

    /// `<exe-stem>.json` beside the executable, else the user config directory
    fn default_config_path() -> CliResult<PathBuf> {
        if let Ok(exe) = std::env::current_exe() {
            if let (Some(dir), Some(stem)) = (exe.parent(), exe.file_stem()) {
                let mut name = stem.to_os_string();
                name.push(".json");
                return Ok(dir.join(name));
            }
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Cannot find config directory".into()))?;
        Ok(config_dir.join("quickjoin").join("quickjoin.json"))
    }
}
