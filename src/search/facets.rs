//! Facet values and autocomplete suggestions, and the cache they share.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::{Difficulty, UserId};
use crate::search::cache::Cache;

/// Distinct filterable values visible to one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSet {
    pub cuisines: Vec<String>,
    pub difficulties: Vec<Difficulty>,
    pub tags: Vec<String>,
}

impl FacetSet {
    /// Builds a facet set from raw column values. Unknown difficulty strings are dropped.
    #[must_use]
    pub fn from_raw(cuisines: Vec<String>, difficulties: Vec<String>, tags: Vec<String>) -> Self {
        let mut parsed: Vec<Difficulty> = difficulties
            .iter()
            .filter_map(|d| d.parse().ok())
            .collect();
        parsed.sort_unstable();
        parsed.dedup();

        Self {
            cuisines,
            difficulties: parsed,
            tags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Facets(UserId),
    /// The partial query is stored lowercased.
    Suggestions(UserId, String),
}

impl CacheKey {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Facets(_) => "facets",
            Self::Suggestions(..) => "suggestions",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachePayload {
    Facets(FacetSet),
    /// The full merged list; callers truncate to their own limit.
    Suggestions(Vec<String>),
}

pub type FilterCache = dyn Cache<CacheKey, CachePayload>;

/// Concatenates suggestion sources in priority order (titles, cuisines,
/// tags), dropping case-insensitive duplicates. The first spelling wins.
#[must_use]
pub fn merge_suggestions(
    titles: Vec<String>,
    cuisines: Vec<String>,
    tags: Vec<String>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    titles
        .into_iter()
        .chain(cuisines)
        .chain(tags)
        .filter(|s| seen.insert(s.to_lowercase()))
        .collect()
}
