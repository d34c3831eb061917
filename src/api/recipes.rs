//! Recipe search endpoints. All routes here run behind the identity layer.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{search_params_from_query, validate_recipe_id, validate_suggestion_limit};
use super::{ApiError, ApiResponse, AppState, SearchQuery, SuggestionQuery};
use crate::domain::UserId;
use crate::models::recipe::RecipeDetail;
use crate::services::SearchResponse;

/// `GET /api/recipes/search`
pub async fn search_recipes(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let (default_limit, max_limit) = {
        let config = state.config().read().await;
        (config.search.default_limit, config.search.max_limit)
    };

    let params = search_params_from_query(query, default_limit, max_limit)?;
    let response = state.search_service().search(&user, params).await?;

    Ok(Json(ApiResponse::success(response)))
}

/// `GET /api/recipes/suggestions?q=&limit=`
pub async fn get_suggestions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
    Query(query): Query<SuggestionQuery>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let limit = validate_suggestion_limit(query.limit)?;
    let suggestions = state
        .search_service()
        .suggestions(&user, &query.q, limit)
        .await;

    Ok(Json(ApiResponse::success(suggestions)))
}

/// `GET /api/recipes/{id}`
///
/// Archived recipes and recipes the user may not see are reported as not found.
pub async fn get_recipe(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<RecipeDetail>>, ApiError> {
    let id = validate_recipe_id(id)?;

    let recipe = state
        .search_service()
        .get_recipe(&user, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Recipe", id))?;

    Ok(Json(ApiResponse::success(recipe)))
}
