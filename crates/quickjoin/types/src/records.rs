//! Records returned by the platform API
//!
//! Only the fields the resolver reads are modelled; everything else in the
//! platform's payloads is ignored on deserialization.

use crate::ids::WorldId;
use crate::instance::InstanceCandidate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Group metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// The world summary embedded in a group instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceWorld {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub capacity: Option<i64>,
}

/// An instance listed under a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInstance {
    pub instance_id: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub member_count: Option<i64>,
    pub world: InstanceWorld,
}

impl GroupInstance {
    pub fn to_candidate(&self) -> InstanceCandidate {
        InstanceCandidate::new(
            WorldId::new(self.world.id.clone()),
            self.instance_id.clone(),
            self.member_count,
            self.world.capacity,
        )
    }
}

/// World metadata, including its public instances
///
/// `instances` is a list of `[instanceId, occupants]` pairs. The occupant
/// count has been seen both as a number and as a string, so entries are kept
/// raw and parsed by [`World::instance_candidates`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct World {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub capacity: Option<i64>,
    #[serde(default)]
    pub instances: Vec<Value>,
}

impl World {
    /// Convert the embedded instance pairs into candidates.
    ///
    /// Entries without an instance id are dropped. An occupant count that is
    /// neither an integer nor a string holding one is reported as unknown.
    pub fn instance_candidates(&self) -> Vec<InstanceCandidate> {
        self.instances
            .iter()
            .filter_map(|entry| {
                let pair = entry.as_array()?;
                let instance_id = pair.first()?.as_str()?;
                let occupancy = pair.get(1).and_then(parse_count);
                Some(InstanceCandidate::new(
                    WorldId::new(self.id.clone()),
                    instance_id,
                    occupancy,
                    self.capacity,
                ))
            })
            .collect()
    }

    /// `"<name> by <author>"`
    pub fn display_name(&self) -> String {
        format!("{} by {}", self.name, self.author_name)
    }
}

fn parse_count(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Another user, as visible to the current account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// The account the session is logged in as
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_world_instance_pairs() {
        let world: World = serde_json::from_value(json!({
            "id": "wrld_a",
            "name": "Box",
            "authorName": "someone",
            "capacity": 32,
            "instances": [
                ["12345~region(eu)", 4],
                ["777", "9"],
                ["888", "n/a"],
                ["999"],
                [42, 1],
                null
            ]
        }))
        .unwrap();

        let candidates = world.instance_candidates();
        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[0].instance_id, "12345~region(eu)");
        assert_eq!(candidates[0].occupancy, Some(4));
        assert_eq!(candidates[0].capacity, Some(32));
        assert_eq!(candidates[1].occupancy, Some(9));
        assert_eq!(candidates[2].occupancy, None);
        assert_eq!(candidates[3].occupancy, None);
        assert_eq!(world.display_name(), "Box by someone");
    }

    #[test]
    fn test_group_instance_candidate() {
        let instance: GroupInstance = serde_json::from_value(json!({
            "instanceId": "55555~group(grp_x)",
            "location": "wrld_b:55555~group(grp_x)",
            "memberCount": 3,
            "world": { "id": "wrld_b", "name": "Hall", "capacity": 10 }
        }))
        .unwrap();

        let candidate = instance.to_candidate();
        assert_eq!(candidate.world_id.as_str(), "wrld_b");
        assert_eq!(candidate.occupancy, Some(3));
        assert_eq!(candidate.capacity, Some(10));
    }

    #[test]
    fn test_user_without_location() {
        let user: User =
            serde_json::from_value(json!({ "id": "usr_a", "displayName": "A" })).unwrap();
        assert!(user.location.is_none());
    }
}
