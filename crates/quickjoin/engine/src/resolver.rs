//! Identifier resolution
//!
//! Each [`Identifier`] variant has exactly one strategy. Strategies never
//! fail the run: lookup and transport errors become [`Resolution::NotFound`]
//! for that identifier and the caller moves on.

use crate::api::PlatformApi;
use crate::error::ApiError;
use crate::ranker;
use indexmap::IndexMap;
use quickjoin_types::{GroupId, Identifier, ResolvedTarget, UserId, WorldId, WORLD_PREFIX};
use std::fmt;
use tracing::{debug, info, warn};

/// Identifier → human-readable comment, persisted with the configuration.
/// Iteration order is the configured priority order.
pub type Annotations = IndexMap<String, String>;

/// User locations that can never be joined
pub const UNJOINABLE_LOCATIONS: [&str; 4] = ["", "traveling", "offline", "private"];

/// Resolution switches taken from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Fetch group metadata before listing its instances
    pub fetch_details: bool,
    /// Replace stored comments with display names seen during resolution
    pub overwrite_comments: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            fetch_details: false,
            overwrite_comments: true,
        }
    }
}

/// Result of resolving one identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A joinable instance was found
    Resolved(ResolvedTarget),
    /// The target is missing, has no usable instance, or the lookup failed
    NotFound(String),
    /// The user exists but is somewhere that cannot be joined
    Unjoinable(String),
    /// The identifier has no recognized prefix
    Unsupported,
}

impl Resolution {
    pub fn target(&self) -> Option<&ResolvedTarget> {
        match self {
            Self::Resolved(target) => Some(target),
            _ => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(target) => write!(f, "resolved to {}", target),
            Self::NotFound(reason) => write!(f, "not found: {}", reason),
            Self::Unjoinable(reason) => write!(f, "unjoinable: {}", reason),
            Self::Unsupported => f.write_str("unsupported identifier"),
        }
    }
}

/// Resolves identifiers against a [`PlatformApi`]
pub struct IdentifierResolver<'a, A: PlatformApi + ?Sized> {
    api: &'a A,
    options: ResolveOptions,
}

impl<'a, A: PlatformApi + ?Sized> IdentifierResolver<'a, A> {
    pub fn new(api: &'a A, options: ResolveOptions) -> Self {
        Self { api, options }
    }

    /// Resolve one identifier, updating its annotation when allowed.
    pub async fn resolve(&self, id: &Identifier, annotations: &mut Annotations) -> Resolution {
        let outcome = match id {
            Identifier::Group(group_id) => self.resolve_group(group_id, annotations).await,
            Identifier::World(world_id) => self.resolve_world(world_id, annotations).await,
            Identifier::User(user_id) => self.resolve_user(user_id, annotations).await,
            Identifier::Unsupported(raw) => {
                warn!(id = %raw, "Unknown or unsupported id prefix, expected grp_, wrld_ or usr_");
                return Resolution::Unsupported;
            }
        };

        outcome.unwrap_or_else(|e| {
            warn!(id = %id, error = %e, "Lookup failed");
            Resolution::NotFound(e.to_string())
        })
    }

    async fn resolve_group(
        &self,
        id: &GroupId,
        annotations: &mut Annotations,
    ) -> Result<Resolution, ApiError> {
        if self.options.fetch_details {
            let Some(group) = self.api.get_group(id).await? else {
                info!(id = %id, "Group not found");
                return Ok(Resolution::NotFound(format!("group {} not found", id)));
            };
            self.annotate(annotations, id.as_str(), group.name);
        }

        let instances = self.api.get_group_instances(id).await?;
        info!(id = %id, count = instances.len(), "Found group instances");

        let candidates: Vec<_> = instances.iter().map(|i| i.to_candidate()).collect();
        match ranker::select(&candidates) {
            Some(pick) => {
                info!(id = %id, instance = %pick.instance_id, occupancy = ?pick.occupancy, "Selected instance");
                Ok(Resolution::Resolved(pick.target()))
            }
            None => {
                info!(id = %id, "No matching instance found for group");
                Ok(Resolution::NotFound(format!(
                    "no joinable instance in group {}",
                    id
                )))
            }
        }
    }

    async fn resolve_world(
        &self,
        id: &WorldId,
        annotations: &mut Annotations,
    ) -> Result<Resolution, ApiError> {
        let Some(world) = self.api.get_world(id).await? else {
            info!(id = %id, "World not found");
            return Ok(Resolution::NotFound(format!("world {} not found", id)));
        };
        info!(id = %id, name = %world.name, author = %world.author_name, "Resolved world");
        self.annotate(annotations, id.as_str(), world.display_name());

        let candidates = world.instance_candidates();
        debug!(id = %id, count = candidates.len(), "World instances");
        match ranker::select(&candidates) {
            Some(pick) => {
                info!(id = %id, instance = %pick.instance_id, occupancy = ?pick.occupancy, "Selected instance");
                Ok(Resolution::Resolved(pick.target()))
            }
            None => {
                info!(id = %id, "No matching instance found for world");
                Ok(Resolution::NotFound(format!(
                    "no joinable instance in world {}",
                    id
                )))
            }
        }
    }

    async fn resolve_user(
        &self,
        id: &UserId,
        annotations: &mut Annotations,
    ) -> Result<Resolution, ApiError> {
        let Some(user) = self.api.get_user(id).await? else {
            info!(id = %id, "User not found or not a friend");
            return Ok(Resolution::NotFound(format!("user {} not found", id)));
        };
        self.annotate(annotations, id.as_str(), user.display_name.clone());

        let location = user.location.as_deref().unwrap_or_default();
        match parse_location(location) {
            Some(target) => {
                info!(id = %id, user = %user.display_name, location = %location, "Joining user");
                Ok(Resolution::Resolved(target))
            }
            None => {
                info!(id = %id, user = %user.display_name, location = %location, "User is not in a joinable location");
                Ok(Resolution::Unjoinable(format!(
                    "{} is not in a joinable location ({:?})",
                    user.display_name, location
                )))
            }
        }
    }

    fn annotate(&self, annotations: &mut Annotations, id: &str, comment: String) {
        if self.options.overwrite_comments {
            annotations.insert(id.to_string(), comment);
        }
    }
}

/// Split a user location into a target.
///
/// Returns `None` for the placeholder locations and for anything that is not
/// `wrld_…:<instance>[:…]`. The instance token is kept verbatim, including
/// any `~modifier(...)` suffixes.
pub fn parse_location(location: &str) -> Option<ResolvedTarget> {
    if UNJOINABLE_LOCATIONS.contains(&location) {
        return None;
    }
    let mut parts = location.split(':');
    let world = parts.next()?;
    let instance = parts.next()?;
    if !world.starts_with(WORLD_PREFIX) {
        return None;
    }
    Some(ResolvedTarget::new(WorldId::new(world), instance))
}
