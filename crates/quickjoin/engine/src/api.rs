//! Collaborator traits the engine drives
//!
//! The engine never talks HTTP or spawns processes itself; it goes through
//! these two seams so each can be swapped for a fake in tests.

use crate::error::ApiResult;
use async_trait::async_trait;
use quickjoin_types::{Group, GroupId, GroupInstance, ResolvedTarget, User, UserId, World, WorldId};

/// Read access to the social platform plus the self-invite call
///
/// Lookups return `Ok(None)` when the platform reports the record as absent.
#[async_trait]
pub trait PlatformApi: Send + Sync {
    /// Get group metadata
    async fn get_group(&self, id: &GroupId) -> ApiResult<Option<Group>>;

    /// List the group's live instances
    async fn get_group_instances(&self, id: &GroupId) -> ApiResult<Vec<GroupInstance>>;

    /// Get world metadata, including its public instances
    async fn get_world(&self, id: &WorldId) -> ApiResult<Option<World>>;

    /// Get a user record
    async fn get_user(&self, id: &UserId) -> ApiResult<Option<User>>;

    /// Ask the platform to invite the current account into `target`
    async fn invite_self(&self, target: &ResolvedTarget) -> ApiResult<()>;
}

/// Local OS primitives
pub trait ProcessLauncher: Send + Sync {
    /// Open `uri` with the OS default handler, passing `args` along.
    fn open_uri(&self, uri: &str, args: &[String]) -> std::io::Result<()>;

    /// Start `binary` detached; never waited on.
    fn spawn_detached(&self, binary: &str, args: &[String]) -> std::io::Result<()>;

    /// Whether a process with this name is currently running
    fn is_running(&self, process_name: &str) -> bool;
}
