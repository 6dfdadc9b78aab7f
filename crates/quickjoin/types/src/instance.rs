//! Instance candidates and resolution targets

use crate::ids::WorldId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A live instance offered by the platform, as seen during one resolution
/// attempt.
///
/// `occupancy` and `capacity` are `None` when the platform did not report a
/// usable number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceCandidate {
    pub world_id: WorldId,
    pub instance_id: String,
    pub occupancy: Option<i64>,
    pub capacity: Option<i64>,
}

impl InstanceCandidate {
    pub fn new(
        world_id: WorldId,
        instance_id: impl Into<String>,
        occupancy: Option<i64>,
        capacity: Option<i64>,
    ) -> Self {
        Self {
            world_id,
            instance_id: instance_id.into(),
            occupancy,
            capacity,
        }
    }

    pub fn target(&self) -> ResolvedTarget {
        ResolvedTarget::new(self.world_id.clone(), self.instance_id.clone())
    }
}

/// The single joinable instance a run resolves to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedTarget {
    pub world_id: WorldId,
    pub instance_id: String,
}

impl ResolvedTarget {
    pub fn new(world_id: WorldId, instance_id: impl Into<String>) -> Self {
        Self {
            world_id,
            instance_id: instance_id.into(),
        }
    }

    /// `worldId:instanceId`, the platform's location notation
    pub fn location(&self) -> String {
        format!("{}:{}", self.world_id, self.instance_id)
    }
}

impl fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.world_id, self.instance_id)
    }
}
