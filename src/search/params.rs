use serde::{Deserialize, Serialize};

use crate::constants::limits::DEFAULT_SEARCH_LIMIT;
use crate::domain::{Difficulty, SortOrder};

/// Typed search input. The serving layer validates raw input before
/// building one of these; the engine trusts its contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchParams {
    pub query: Option<String>,
    pub cuisine: Vec<String>,
    pub difficulty: Vec<Difficulty>,
    pub tags: Vec<String>,
    pub max_prep_time: Option<i32>,
    pub max_cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub is_public: Option<bool>,
    /// Free-form so that unknown keys fall back to the default order instead of failing.
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub limit: u64,
    pub offset: u64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: None,
            cuisine: Vec::new(),
            difficulty: Vec::new(),
            tags: Vec::new(),
            max_prep_time: None,
            max_cook_time: None,
            servings: None,
            is_public: None,
            sort_by: None,
            sort_order: None,
            limit: DEFAULT_SEARCH_LIMIT,
            offset: 0,
        }
    }
}

impl SearchParams {
    #[must_use]
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }
}

/// Sortable recipe columns plus the `relevance` pseudo-key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Relevance,
    CreatedAt,
    UpdatedAt,
    Title,
    PrepTime,
    CookTime,
    Servings,
    Difficulty,
    Cuisine,
}

impl SortKey {
    /// Accepts both `snake_case` and `camelCase` spellings.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "relevance" => Some(Self::Relevance),
            "created_at" | "createdAt" => Some(Self::CreatedAt),
            "updated_at" | "updatedAt" => Some(Self::UpdatedAt),
            "title" => Some(Self::Title),
            "prep_time" | "prepTime" => Some(Self::PrepTime),
            "cook_time" | "cookTime" => Some(Self::CookTime),
            "servings" => Some(Self::Servings),
            "difficulty" => Some(Self::Difficulty),
            "cuisine" => Some(Self::Cuisine),
            _ => None,
        }
    }
}
