//! QuickJoin Engine - Identifier resolution and launch dispatch
//!
//! Given a priority-ordered list of identifiers, the engine:
//! - Classifies and resolves each one against the platform
//! - Ranks instance candidates to pick the busiest one with room
//! - Stops at the first joinable instance
//! - Launches the companion application through the configured mode
//!
//! Remote calls and OS primitives sit behind [`PlatformApi`] and
//! [`ProcessLauncher`].

pub mod api;
pub mod args;
pub mod deeplink;
pub mod dispatcher;
pub mod error;
pub mod orchestrator;
pub mod prelaunch;
pub mod ranker;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{PlatformApi, ProcessLauncher};
pub use dispatcher::{LaunchDispatcher, COMPANION_PROCESS};
pub use error::{ApiError, ApiResult, EngineError, EngineResult};
pub use orchestrator::{Attempt, QuickJoin, RunReport};
pub use resolver::{Annotations, IdentifierResolver, Resolution, ResolveOptions};
