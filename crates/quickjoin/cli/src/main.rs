//! QuickJoin CLI - Join the best instance of your favourite places
//!
//! On each run the binary:
//! - Loads the configuration (writing a default one on first start)
//! - Logs in, reusing the saved session when it is still valid
//! - Tries the configured identifiers in order until one has a joinable instance
//! - Starts helper programs and launches the companion application

use clap::Parser;
use quickjoin_client::{Credentials, PlatformClient, DEFAULT_BASE_URL};
use quickjoin_engine::args::display_mode_arguments;
use quickjoin_engine::QuickJoin;
use quickjoin_types::LaunchMode;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod launcher;
mod output;
mod session;

use config::{AppConfig, ConfigStore, Loaded};
use error::CliResult;
use launcher::SystemLauncher;
use output::{print_attempts, print_error, print_info, print_outcome};

/// QuickJoin CLI application
#[derive(Parser)]
#[command(name = "quickjoin")]
#[command(about = "QuickJoin - Launch straight into the busiest joinable instance", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "QUICKJOIN_CONFIG")]
    config: Option<String>,

    /// Platform API endpoint
    #[arg(short, long, env = "QUICKJOIN_ENDPOINT", default_value = DEFAULT_BASE_URL)]
    endpoint: String,

    /// Launch mode for this run (uri, launcher, steam, self-invite)
    #[arg(short, long)]
    launch_mode: Option<LaunchMode>,

    /// Start in VR regardless of detected runtimes
    #[arg(long, conflicts_with = "desktop")]
    vr: bool,

    /// Start in desktop mode regardless of detected runtimes
    #[arg(long)]
    desktop: bool,

    /// Second factor code, used instead of prompting
    #[arg(long, env = "QUICKJOIN_2FA_CODE")]
    code: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Extra arguments for the companion application
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    game_args: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    let (store, config) = match load_config(&cli) {
        Ok(Some(loaded)) => loaded,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let wait_on_exit = config.wait_on_exit;
    let result = run(&cli, &store, config).await;
    if let Err(e) = &result {
        print_error(&e.to_string());
    }

    if wait_on_exit {
        if let Err(e) = session::wait_for_enter() {
            debug!(error = %e, "Exit prompt failed");
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

fn init_tracing(cli: &Cli) {
    let filter = if cli.verbose { "debug" } else { "info" };
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
    );

    if cli.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().without_time())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().without_time())
            .init();
    }
}

/// `None` when a default configuration was just created
fn load_config(cli: &Cli) -> CliResult<Option<(ConfigStore, AppConfig)>> {
    let store = ConfigStore::open(cli.config.as_deref())?;
    match store.load()? {
        Loaded::Existing(config) => Ok(Some((store, config))),
        Loaded::Created => {
            print_info(&format!(
                "Default configuration created at {}. Add your credentials and ids, then run again.",
                store.path().display()
            ));
            Ok(None)
        }
    }
}

async fn run(cli: &Cli, store: &ConfigStore, mut config: AppConfig) -> CliResult<()> {
    let mut client = PlatformClient::new(&cli.endpoint)?;
    if !config.username.is_empty() {
        client = client.with_credentials(Credentials::new(
            config.username.clone(),
            config.password.clone(),
        ));
    }
    client.restore_session(&config.session_cookies());

    session::login(&client, cli.code.as_deref(), !config.totp_secret.is_empty()).await?;
    config.update_session(&client.session_cookies());
    save_config(store, &config);

    let launcher = SystemLauncher::new();
    let use_vr = if cli.vr {
        true
    } else if cli.desktop {
        false
    } else {
        launcher.vr_runtime_running()
    };
    let mut runtime_args = cli.game_args.clone();
    runtime_args.extend(display_mode_arguments(use_vr));

    let ids = config.identifiers();
    let mut policy = config.launch_policy();
    if let Some(mode) = cli.launch_mode {
        policy.mode = mode;
    }

    let report = QuickJoin::new(&client, &launcher, config.resolve_options())
        .run(&ids, &mut config.ids, &policy, &runtime_args)
        .await;
    save_config(store, &config);

    print_attempts(&report.attempts);
    let outcome = report.outcome?;
    print_outcome(&outcome);
    Ok(())
}

/// Save failures are logged, not fatal
fn save_config(store: &ConfigStore, config: &AppConfig) {
    if let Err(e) = store.save(config) {
        warn!(path = %store.path().display(), error = %e, "Could not save configuration");
    }
}
