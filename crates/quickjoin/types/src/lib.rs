//! QuickJoin Types - Core model shared by the engine, client and CLI
//!
//! - Identifiers classified by prefix
//! - Platform records (groups, worlds, users)
//! - Instance candidates and the resolved target
//! - Launch policy, modes and outcomes

pub mod ids;
pub mod instance;
pub mod launch;
pub mod records;

pub use ids::{GroupId, Identifier, UserId, WorldId, GROUP_PREFIX, USER_PREFIX, WORLD_PREFIX};
pub use instance::{InstanceCandidate, ResolvedTarget};
pub use launch::{AppCommand, LaunchMode, LaunchOutcome, LaunchPolicy, DEFAULT_GAME_URI};
pub use records::{CurrentUser, Group, GroupInstance, InstanceWorld, User, World};
