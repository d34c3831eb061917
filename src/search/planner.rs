//! Query planning: turns [`SearchParams`] into a [`QueryPlan`].
//!
//! The text decision is explicit: the index stage produces
//! `Result<Vec<RecipeId>, IndexError>` and [`resolve_text_stage`] maps it,
//! deterministically, onto either indexed candidates or the structured
//! fallback. I/O happens in the service; everything here is pure.

use crate::domain::{RecipeId, SortOrder, UserId};
use crate::search::params::{SearchParams, SortKey};
use crate::search::predicate::{Filter, Predicate, Visibility};
use crate::services::IndexError;

/// Outcome of the free-text stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextStage {
    /// No free-text query was given.
    Unfiltered,
    /// The index matched these recipes, best match first.
    Indexed(Vec<RecipeId>),
    /// The index had nothing (or failed); match these tokens structurally.
    Fallback(Vec<String>),
}

/// Page ordering handed to the store adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOrder {
    /// Keep the order the index established.
    Relevance(Vec<RecipeId>),
    Column(SortKey, SortOrder),
    /// Newest first.
    Newest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub filter: Filter,
    pub order: PageOrder,
}

/// Splits a free-text query on whitespace, dropping empty tokens.
#[must_use]
pub fn tokenize(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_string).collect()
}

/// Builds an FTS5 prefix disjunction: `"tok1"* OR "tok2"*`.
///
/// Each token is quoted (embedded quotes doubled) so user input is always
/// treated as a string, never as query syntax.
#[must_use]
pub fn fts_prefix_query(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|t| format!("\"{}\"*", t.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(" OR ")
}

#[must_use]
pub fn resolve_text_stage(
    tokens: Vec<String>,
    index_result: Result<Vec<RecipeId>, IndexError>,
) -> TextStage {
    if tokens.is_empty() {
        return TextStage::Unfiltered;
    }

    match index_result {
        Ok(ids) if !ids.is_empty() => TextStage::Indexed(ids),
        Ok(_) | Err(_) => TextStage::Fallback(tokens),
    }
}

#[must_use]
pub fn resolve_order(
    sort_by: Option<&str>,
    sort_order: Option<SortOrder>,
    text: &TextStage,
) -> PageOrder {
    match sort_by.and_then(SortKey::parse) {
        Some(SortKey::Relevance) => match text {
            TextStage::Indexed(ids) => PageOrder::Relevance(ids.clone()),
            _ => PageOrder::Newest,
        },
        Some(key) => PageOrder::Column(key, sort_order.unwrap_or_default()),
        None => PageOrder::Newest,
    }
}

/// Builds the full plan.
///
/// `tag_candidates` must already be non-empty; an empty intersection is
/// short-circuited by the caller before planning.
#[must_use]
pub fn plan(
    user: &UserId,
    params: &SearchParams,
    text: TextStage,
    tag_candidates: Option<Vec<RecipeId>>,
) -> QueryPlan {
    let visibility = match params.is_public {
        Some(true) => Visibility::PublicOnly,
        Some(false) => Visibility::PrivateOwnedBy(user.clone()),
        None => Visibility::OwnedOrPublic(user.clone()),
    };

    let mut filter = Filter::new()
        .and(Predicate::NotArchived)
        .and(Predicate::Visible(visibility));

    if let Some(ids) = tag_candidates {
        filter.push(Predicate::IdIn(ids));
    }

    match &text {
        TextStage::Unfiltered => {}
        TextStage::Indexed(ids) => filter.push(Predicate::IdIn(ids.clone())),
        TextStage::Fallback(tokens) => filter.push(Predicate::TextContains(tokens.clone())),
    }

    if !params.cuisine.is_empty() {
        filter.push(Predicate::CuisineIn(params.cuisine.clone()));
    }
    if !params.difficulty.is_empty() {
        filter.push(Predicate::DifficultyIn(params.difficulty.clone()));
    }
    if let Some(minutes) = params.max_prep_time {
        filter.push(Predicate::MaxPrepTime(minutes));
    }
    if let Some(minutes) = params.max_cook_time {
        filter.push(Predicate::MaxCookTime(minutes));
    }
    if let Some(servings) = params.servings {
        filter.push(Predicate::Servings(servings));
    }

    let order = resolve_order(params.sort_by.as_deref(), params.sort_order, &text);

    QueryPlan { filter, order }
}
