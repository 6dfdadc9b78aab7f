//! Deep link construction
//!
//! The companion application expects the `id` query value as a raw
//! `worldId:instanceId` string. The colon and any `~`, `(`, `)` in the
//! instance token must reach it unescaped, so `id` is written by hand while
//! every other query parameter of the base link keeps form encoding.

use crate::error::{EngineError, EngineResult};
use quickjoin_types::ResolvedTarget;
use url::{form_urlencoded, Url};

/// Query key carrying the target location
pub const TARGET_KEY: &str = "id";

/// Build the link to open. Without a target the base link is validated and
/// returned unchanged.
pub fn build_join_link(base: &str, target: Option<&ResolvedTarget>) -> EngineResult<String> {
    let url = Url::parse(base).map_err(|source| EngineError::InvalidGameUri {
        uri: base.to_string(),
        source,
    })?;

    let Some(target) = target else {
        return Ok(base.to_string());
    };

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (encode(&k), encode(&v)))
        .collect();

    let location = target.location();
    match pairs.iter_mut().find(|(k, _)| k == TARGET_KEY) {
        Some((_, value)) => *value = location,
        None => pairs.push((TARGET_KEY.to_string(), location)),
    }

    let query = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut link = base_without_query(&url);
    link.push('?');
    link.push_str(&query);
    if let Some(fragment) = url.fragment() {
        link.push('#');
        link.push_str(fragment);
    }
    Ok(link)
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn base_without_query(url: &Url) -> String {
    let mut stripped = url.clone();
    stripped.set_query(None);
    stripped.set_fragment(None);
    stripped.to_string()
}
