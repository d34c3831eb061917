use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{IndexMaintainer, SearchService};
use crate::state::SharedState;

mod error;
mod identity;
mod observability;
mod recipes;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }

    #[must_use]
    pub fn search_service(&self) -> &Arc<dyn SearchService> {
        &self.shared.search_service
    }

    #[must_use]
    pub fn index_maintainer(&self) -> &Arc<dyn IndexMaintainer> {
        &self.shared.index_maintainer
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state
        .config()
        .read()
        .await
        .server
        .cors_allowed_origins
        .clone();

    let api_router = Router::new()
        .merge(create_recipe_router())
        .route("/system/health", get(system::health))
        .route("/system/cache/clear", post(system::clear_cache))
        .route("/system/index/rebuild", post(system::rebuild_index))
        .route("/system/index/{id}", post(system::reindex_recipe))
        .route("/system/index/{id}", delete(system::remove_from_index))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

/// Routes that read recipes on behalf of a user.
fn create_recipe_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recipes/search", get(recipes::search_recipes))
        .route("/recipes/suggestions", get(recipes::get_suggestions))
        .route("/recipes/{id}", get(recipes::get_recipe))
        .route_layer(middleware::from_fn(identity::identity_middleware))
}
