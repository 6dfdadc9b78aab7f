//! In-memory fakes for the collaborator traits

use crate::api::{PlatformApi, ProcessLauncher};
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use quickjoin_types::{Group, GroupId, GroupInstance, ResolvedTarget, User, UserId, World, WorldId};
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::Mutex;

/// Platform fake. Unknown ids are reported as absent; group instance lists
/// default to empty. Every call is recorded as `"<method> <arg>"`.
#[derive(Default)]
pub struct FakeApi {
    groups: HashMap<String, Group>,
    group_instances: HashMap<String, Vec<GroupInstance>>,
    worlds: HashMap<String, World>,
    users: HashMap<String, User>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
    invites: Mutex<Vec<ResolvedTarget>>,
}

impl FakeApi {
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.insert(group.id.clone(), group);
        self
    }

    pub fn with_group_instances(mut self, id: &str, instances: Vec<GroupInstance>) -> Self {
        self.group_instances.insert(id.to_string(), instances);
        self
    }

    pub fn with_world(mut self, world: World) -> Self {
        self.worlds.insert(world.id.clone(), world);
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.id.clone(), user);
        self
    }

    /// Make the call recorded as `call` fail with a transport error
    pub fn failing(mut self, call: &str) -> Self {
        self.failing.insert(call.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn invites(&self) -> Vec<ResolvedTarget> {
        self.invites.lock().unwrap().clone()
    }

    fn record(&self, method: &str, arg: &str) -> ApiResult<()> {
        let call = format!("{} {}", method, arg);
        self.calls.lock().unwrap().push(call.clone());
        if self.failing.contains(&call) {
            return Err(ApiError::Transport(format!("connection reset during {}", call)));
        }
        Ok(())
    }
}

#[async_trait]
impl PlatformApi for FakeApi {
    async fn get_group(&self, id: &GroupId) -> ApiResult<Option<Group>> {
        self.record("get_group", id.as_str())?;
        Ok(self.groups.get(id.as_str()).cloned())
    }

    async fn get_group_instances(&self, id: &GroupId) -> ApiResult<Vec<GroupInstance>> {
        self.record("get_group_instances", id.as_str())?;
        Ok(self.group_instances.get(id.as_str()).cloned().unwrap_or_default())
    }

    async fn get_world(&self, id: &WorldId) -> ApiResult<Option<World>> {
        self.record("get_world", id.as_str())?;
        Ok(self.worlds.get(id.as_str()).cloned())
    }

    async fn get_user(&self, id: &UserId) -> ApiResult<Option<User>> {
        self.record("get_user", id.as_str())?;
        Ok(self.users.get(id.as_str()).cloned())
    }

    async fn invite_self(&self, target: &ResolvedTarget) -> ApiResult<()> {
        self.record("invite_self", &target.location())?;
        self.invites.lock().unwrap().push(target.clone());
        Ok(())
    }
}

/// A recorded launcher interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchCall {
    Open { uri: String, args: Vec<String> },
    Spawn { binary: String, args: Vec<String> },
}

/// Launcher fake that records instead of starting anything
#[derive(Default)]
pub struct RecordingLauncher {
    running: HashSet<String>,
    failing_binaries: HashSet<String>,
    fail_open: bool,
    calls: Mutex<Vec<LaunchCall>>,
}

impl RecordingLauncher {
    pub fn with_running(mut self, process: &str) -> Self {
        self.running.insert(process.to_string());
        self
    }

    pub fn failing_binary(mut self, binary: &str) -> Self {
        self.failing_binaries.insert(binary.to_string());
        self
    }

    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub fn calls(&self) -> Vec<LaunchCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProcessLauncher for RecordingLauncher {
    fn open_uri(&self, uri: &str, args: &[String]) -> io::Result<()> {
        self.calls.lock().unwrap().push(LaunchCall::Open {
            uri: uri.to_string(),
            args: args.to_vec(),
        });
        if self.fail_open {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no handler for scheme"));
        }
        Ok(())
    }

    fn spawn_detached(&self, binary: &str, args: &[String]) -> io::Result<()> {
        self.calls.lock().unwrap().push(LaunchCall::Spawn {
            binary: binary.to_string(),
            args: args.to_vec(),
        });
        if self.failing_binaries.contains(binary) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "binary not found"));
        }
        Ok(())
    }

    fn is_running(&self, process_name: &str) -> bool {
        self.running.contains(process_name)
    }
}
