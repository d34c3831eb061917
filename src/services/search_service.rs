//! Domain service for recipe search, autocomplete and single-recipe fetches.
//!
//! Every operation is scoped to an acting user: results only ever include
//! non-archived recipes the user owns or that are public.

use crate::domain::{RecipeId, UserId};
use crate::models::recipe::{HydratedRecipe, RecipeDetail};
use crate::search::{FacetSet, Pagination, SearchParams};
use serde::Serialize;
use thiserror::Error;

/// Errors on the main search path.
///
/// Index and facet failures never surface here; both degrade in place.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for SearchError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub recipes: Vec<HydratedRecipe>,
    pub total: u64,
    pub has_more: bool,
    /// Facet values visible to the user, independent of the current filters.
    pub filters: FacetSet,
    /// Wall-clock milliseconds spent serving the request.
    pub search_time: u64,
}

impl SearchResponse {
    #[must_use]
    pub fn new(
        recipes: Vec<HydratedRecipe>,
        pagination: Pagination,
        filters: FacetSet,
        search_time: u64,
    ) -> Self {
        Self {
            recipes,
            total: pagination.total,
            has_more: pagination.has_more,
            filters,
            search_time,
        }
    }
}

/// # Examples
///
/// ```rust,ignore
/// use recipedex::domain::UserId;
/// use recipedex::search::SearchParams;
/// use recipedex::services::{SearchError, SearchService};
/// use std::sync::Arc;
///
/// async fn example(service: Arc<dyn SearchService>) -> Result<(), SearchError> {
///     let user = UserId::new("user-1");
///     let page = service.search(&user, SearchParams::with_query("chocolate")).await?;
///     println!("{} of {} recipes", page.recipes.len(), page.total);
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait SearchService: Send + Sync {
    /// Runs a filtered, sorted, paginated search and hydrates the page.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Database`] if the count, page or hydration
    /// queries fail.
    async fn search(
        &self,
        user: &UserId,
        params: SearchParams,
    ) -> Result<SearchResponse, SearchError>;

    /// Autocomplete over titles, cuisines and tags. Never fails; store
    /// errors yield an empty list.
    async fn suggestions(&self, user: &UserId, partial: &str, limit: Option<usize>)
    -> Vec<String>;

    /// Facet values for the user, served from cache when fresh.
    async fn facets(&self, user: &UserId) -> FacetSet;

    /// Fetches one recipe with its notes, if the user may see it.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Database`] on connection failures.
    async fn get_recipe(
        &self,
        user: &UserId,
        id: RecipeId,
    ) -> Result<Option<RecipeDetail>, SearchError>;

    /// Drops every cached facet and suggestion entry.
    fn clear_cache(&self);
}
