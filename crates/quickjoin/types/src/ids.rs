//! Strongly-typed platform identifiers
//!
//! Configured ids are opaque strings tagged by a prefix. They are classified
//! once, when read, into an [`Identifier`] variant; nothing downstream looks at
//! the prefix again.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix carried by group ids
pub const GROUP_PREFIX: &str = "grp_";
/// Prefix carried by world ids
pub const WORLD_PREFIX: &str = "wrld_";
/// Prefix carried by user ids
pub const USER_PREFIX: &str = "usr_";

/// Identifier of a group
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a world
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldId(String);

impl WorldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A configured identifier, classified by its prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// `grp_…`
    Group(GroupId),
    /// `wrld_…`
    World(WorldId),
    /// `usr_…`
    User(UserId),
    /// Anything without a recognized prefix
    Unsupported(String),
}

impl Identifier {
    /// Classify a raw identifier string.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with(GROUP_PREFIX) {
            Self::Group(GroupId::new(raw))
        } else if raw.starts_with(WORLD_PREFIX) {
            Self::World(WorldId::new(raw))
        } else if raw.starts_with(USER_PREFIX) {
            Self::User(UserId::new(raw))
        } else {
            Self::Unsupported(raw.to_string())
        }
    }

    /// The raw identifier, exactly as configured
    pub fn as_str(&self) -> &str {
        match self {
            Self::Group(id) => id.as_str(),
            Self::World(id) => id.as_str(),
            Self::User(id) => id.as_str(),
            Self::Unsupported(raw) => raw,
        }
    }

    /// Short label of the variant, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Group(_) => "group",
            Self::World(_) => "world",
            Self::User(_) => "user",
            Self::Unsupported(_) => "unsupported",
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
