//! Launch dispatch
//!
//! Entered once per run, after resolution, with or without a target.

use crate::api::{PlatformApi, ProcessLauncher};
use crate::args;
use crate::deeplink::build_join_link;
use crate::error::EngineResult;
use crate::prelaunch;
use quickjoin_types::{LaunchMode, LaunchOutcome, LaunchPolicy, ResolvedTarget};
use tracing::{error, info, warn};

/// Process name of the companion application
pub const COMPANION_PROCESS: &str = "VRChat";

/// Starts the companion application according to a [`LaunchPolicy`]
pub struct LaunchDispatcher<'a, A: PlatformApi + ?Sized, L: ProcessLauncher + ?Sized> {
    api: &'a A,
    launcher: &'a L,
}

impl<'a, A: PlatformApi + ?Sized, L: ProcessLauncher + ?Sized> LaunchDispatcher<'a, A, L> {
    pub fn new(api: &'a A, launcher: &'a L) -> Self {
        Self { api, launcher }
    }

    pub async fn dispatch(
        &self,
        policy: &LaunchPolicy,
        target: Option<&ResolvedTarget>,
        runtime_args: &[String],
    ) -> EngineResult<LaunchOutcome> {
        match policy.mode {
            LaunchMode::Uri => {
                if let Some(target) = target {
                    if policy.invite_when_running && self.launcher.is_running(COMPANION_PROCESS) {
                        info!(target = %target, "Application already running, inviting instead of launching");
                        return self.invite(target).await;
                    }
                }
                self.launch_uri(policy, target, runtime_args)
            }
            LaunchMode::SelfInvite => match target {
                Some(target) => {
                    if !self.launcher.is_running(COMPANION_PROCESS) {
                        warn!(process = COMPANION_PROCESS, "Using self-invite launch mode but the application is not running");
                    }
                    self.invite(target).await
                }
                None => {
                    warn!("Self-invite launch mode needs a resolved instance, nothing to do");
                    Ok(LaunchOutcome::Skipped(
                        "self-invite requires a resolved instance".to_string(),
                    ))
                }
            },
            LaunchMode::Launcher | LaunchMode::Steam => {
                warn!(mode = %policy.mode, "Launch mode is not implemented yet");
                Ok(LaunchOutcome::NotImplemented(policy.mode))
            }
            LaunchMode::Unknown => {
                error!(mode = %policy.mode, "Unknown launch mode. Please check your configuration.");
                Ok(LaunchOutcome::Skipped(format!(
                    "unknown launch mode ({})",
                    policy.mode
                )))
            }
        }
    }

    fn launch_uri(
        &self,
        policy: &LaunchPolicy,
        target: Option<&ResolvedTarget>,
        runtime_args: &[String],
    ) -> EngineResult<LaunchOutcome> {
        prelaunch::run_all(self.launcher, &policy.additional_apps);

        let link = build_join_link(&policy.game_uri, target)?;
        let arguments: Vec<String> = args::merge(&policy.game_arguments, runtime_args)
            .into_iter()
            .collect();
        match target {
            Some(target) => info!(target = %target, link = %link, "Joining instance"),
            None => info!(link = %link, "Launching without a target instance"),
        }

        self.launcher.open_uri(&link, &arguments)?;
        info!(args = %arguments.join(" "), "Started application");
        Ok(LaunchOutcome::Launched {
            target: target.cloned(),
            link,
        })
    }

    async fn invite(&self, target: &ResolvedTarget) -> EngineResult<LaunchOutcome> {
        info!(target = %target, "Inviting self");
        self.api.invite_self(target).await?;
        Ok(LaunchOutcome::Invited(target.clone()))
    }
}
