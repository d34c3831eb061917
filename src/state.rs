use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::constants::cache::FILTER_TTL;
use crate::db::Store;
use crate::search::{Clock, FilterCache, SystemClock, TtlCache};
use crate::services::{
    IndexMaintainer, SeaOrmIndexMaintainer, SeaOrmSearchService, SearchService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    /// Process-wide facet and suggestion cache, shared with the search service.
    pub filter_cache: Arc<FilterCache>,

    pub search_service: Arc<dyn SearchService>,

    pub index_maintainer: Arc<dyn IndexMaintainer>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock)).await
    }

    /// Builds the state with an explicit cache clock, so tests can step time.
    pub async fn with_clock(config: Config, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        config.validate()?;

        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let filter_cache: Arc<FilterCache> = Arc::new(TtlCache::new(FILTER_TTL, clock));
        let store_arc = Arc::new(store.clone());

        let search_service = Arc::new(SeaOrmSearchService::new(
            store_arc.clone(),
            filter_cache.clone(),
            config.search.default_suggestion_limit,
        )) as Arc<dyn SearchService + Send + Sync + 'static>;

        let index_maintainer = Arc::new(SeaOrmIndexMaintainer::new(
            store_arc,
            config.search.rebuild_batch_size,
        )) as Arc<dyn IndexMaintainer + Send + Sync + 'static>;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            filter_cache,
            search_service,
            index_maintainer,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
