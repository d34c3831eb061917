//! System endpoints: health, cache invalidation and index maintenance.
//!
//! The index routes are the hooks the persistence layer calls after it
//! commits a recipe write.

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::validation::validate_recipe_id;
use super::{
    ApiError, ApiResponse, AppState, CacheClearResponse, HealthResponse, IndexEntryResponse,
    RebuildResponse,
};

/// `GET /api/system/health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthResponse>> {
    let database = state.store().ping().await.is_ok();
    let index_entries = if database {
        state.store().count_index_entries().await.ok()
    } else {
        None
    };

    Json(ApiResponse::success(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
        index_entries,
        uptime_seconds: state.start_time.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION"),
    }))
}

/// `POST /api/system/cache/clear`
pub async fn clear_cache(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<CacheClearResponse>> {
    state.search_service().clear_cache();
    Json(ApiResponse::success(CacheClearResponse { cleared: true }))
}

/// `POST /api/system/index/rebuild`
pub async fn rebuild_index(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<RebuildResponse>>, ApiError> {
    let start = Instant::now();
    let indexed = state.index_maintainer().rebuild_index().await?;
    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    info!(indexed, duration_ms, "Index rebuild requested via API finished");

    Ok(Json(ApiResponse::success(RebuildResponse {
        indexed,
        duration_ms,
    })))
}

/// `POST /api/system/index/{id}`
///
/// Refreshes one entry after a recipe (or any of its children) changed.
pub async fn reindex_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<IndexEntryResponse>>, ApiError> {
    let id = validate_recipe_id(id)?;
    state.index_maintainer().on_recipe_updated(id).await?;

    Ok(Json(ApiResponse::success(IndexEntryResponse {
        recipe_id: id.value(),
    })))
}

/// `DELETE /api/system/index/{id}`
pub async fn remove_from_index(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<IndexEntryResponse>>, ApiError> {
    let id = validate_recipe_id(id)?;
    state.index_maintainer().on_recipe_deleted(id).await?;

    Ok(Json(ApiResponse::success(IndexEntryResponse {
        recipe_id: id.value(),
    })))
}
