//! Run orchestration
//!
//! Tries identifiers strictly in priority order, one remote call at a time,
//! and stops at the first one that resolves. The launch phase always runs
//! afterwards, with the target or without one.

use crate::api::{PlatformApi, ProcessLauncher};
use crate::dispatcher::LaunchDispatcher;
use crate::error::EngineError;
use crate::resolver::{Annotations, IdentifierResolver, Resolution, ResolveOptions};
use quickjoin_types::{Identifier, LaunchOutcome, LaunchPolicy, ResolvedTarget};
use tracing::info;

/// One identifier tried during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub id: Identifier,
    pub resolution: Resolution,
}

/// What a run did
#[derive(Debug)]
pub struct RunReport {
    /// Identifiers tried, in order; the last one is the success if any
    pub attempts: Vec<Attempt>,
    /// Result of the launch phase
    pub outcome: Result<LaunchOutcome, EngineError>,
}

impl RunReport {
    /// The target the run resolved to
    pub fn target(&self) -> Option<&ResolvedTarget> {
        self.attempts.last().and_then(|a| a.resolution.target())
    }
}

/// Resolution followed by launch
pub struct QuickJoin<'a, A: PlatformApi + ?Sized, L: ProcessLauncher + ?Sized> {
    api: &'a A,
    launcher: &'a L,
    options: ResolveOptions,
}

impl<'a, A: PlatformApi + ?Sized, L: ProcessLauncher + ?Sized> QuickJoin<'a, A, L> {
    pub fn new(api: &'a A, launcher: &'a L, options: ResolveOptions) -> Self {
        Self {
            api,
            launcher,
            options,
        }
    }

    /// Try each identifier until one resolves.
    pub async fn resolve_first(
        &self,
        ids: &[Identifier],
        annotations: &mut Annotations,
    ) -> Vec<Attempt> {
        let resolver = IdentifierResolver::new(self.api, self.options);
        let mut attempts = Vec::new();

        for id in ids {
            info!(id = %id, kind = id.kind(), "Trying id");
            let resolution = resolver.resolve(id, annotations).await;
            let resolved = resolution.target().is_some();
            if !resolved {
                info!(id = %id, result = %resolution, "Skipping id");
            }
            attempts.push(Attempt {
                id: id.clone(),
                resolution,
            });
            if resolved {
                break;
            }
        }

        attempts
    }

    /// Full run: resolve, then launch.
    pub async fn run(
        &self,
        ids: &[Identifier],
        annotations: &mut Annotations,
        policy: &LaunchPolicy,
        runtime_args: &[String],
    ) -> RunReport {
        let attempts = self.resolve_first(ids, annotations).await;
        let target = attempts.last().and_then(|a| a.resolution.target());
        if target.is_none() {
            info!(tried = attempts.len(), "No id resolved to a joinable instance");
        }

        let outcome = LaunchDispatcher::new(self.api, self.launcher)
            .dispatch(policy, target, runtime_args)
            .await;

        RunReport { attempts, outcome }
    }
}
