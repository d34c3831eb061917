//! `SeaORM` implementation of the `SearchService` trait.
//!
//! Count and page run concurrently with the facet lookup, and the four
//! hydration queries for a page run concurrently with each other.

use crate::constants::suggestions::{CUISINE_MATCHES, MIN_QUERY_CHARS, TAG_MATCHES, TITLE_MATCHES};
use crate::db::Store;
use crate::domain::{RecipeId, UserId};
use crate::models::recipe::{HydratedRecipe, Recipe, RecipeDetail};
use crate::search::facets::merge_suggestions;
use crate::search::tags::normalize_tag_names;
use crate::search::{
    CacheKey, CachePayload, ChildRows, FacetSet, Filter, FilterCache, Pagination, SearchParams,
    TextStage, hydrate, planner,
};
use crate::services::index_service::IndexError;
use crate::services::search_service::{SearchError, SearchResponse, SearchService};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

pub struct SeaOrmSearchService {
    store: Arc<Store>,
    cache: Arc<FilterCache>,
    default_suggestion_limit: usize,
}

fn db_err(e: anyhow::Error) -> SearchError {
    SearchError::Database(e.to_string())
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

impl SeaOrmSearchService {
    #[must_use]
    pub fn new(store: Arc<Store>, cache: Arc<FilterCache>, default_suggestion_limit: usize) -> Self {
        Self {
            store,
            cache,
            default_suggestion_limit,
        }
    }

    fn cached(&self, key: &CacheKey) -> Option<CachePayload> {
        let hit = self.cache.get(key);
        let outcome = if hit.is_some() { "hit" } else { "miss" };
        metrics::counter!(
            "search_cache_requests_total",
            "kind" => key.kind(),
            "outcome" => outcome
        )
        .increment(1);
        hit
    }

    /// Runs the index stage and decides between indexed candidates and the
    /// structured fallback.
    async fn text_stage(&self, query: Option<&str>) -> TextStage {
        let tokens = query.map(planner::tokenize).unwrap_or_default();
        if tokens.is_empty() {
            return TextStage::Unfiltered;
        }

        let fts_query = planner::fts_prefix_query(&tokens);
        let index_result = self
            .store
            .match_index(&fts_query)
            .await
            .map(|ids| ids.into_iter().map(RecipeId::new).collect::<Vec<_>>())
            .map_err(|e| IndexError::Query(e.to_string()));

        match &index_result {
            Err(e) => {
                warn!(error = %e, query = %fts_query, "Search index failed, using structured match");
                metrics::counter!("search_index_fallback_total", "reason" => "error").increment(1);
            }
            Ok(ids) if ids.is_empty() => {
                debug!(query = %fts_query, "No index hits, using structured match");
                metrics::counter!("search_index_fallback_total", "reason" => "no_match")
                    .increment(1);
            }
            Ok(ids) => debug!(hits = ids.len(), "Index candidates resolved"),
        }

        planner::resolve_text_stage(tokens, index_result)
    }

    /// Attaches ingredients, instructions, tags and images to a page.
    async fn hydrate(&self, page: Vec<Recipe>) -> Result<Vec<HydratedRecipe>, SearchError> {
        if page.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = page.iter().map(|r| r.id.value()).collect();

        let (ingredients, instructions, tags, images) = tokio::try_join!(
            self.store.ingredients_for(&ids),
            self.store.instructions_for(&ids),
            self.store.tags_for(&ids),
            self.store.images_for(&ids),
        )
        .map_err(db_err)?;

        Ok(hydrate::assemble(
            page,
            ChildRows {
                ingredients,
                instructions,
                tags,
                images,
            },
        ))
    }

    async fn run_search(
        &self,
        user: &UserId,
        params: &SearchParams,
        start: Instant,
    ) -> Result<SearchResponse, SearchError> {
        let tag_names = normalize_tag_names(&params.tags);

        let tag_candidates = if tag_names.is_empty() {
            None
        } else {
            let ids = self
                .store
                .recipe_ids_with_all_tags(&tag_names)
                .await
                .map_err(db_err)?;

            if ids.is_empty() {
                debug!(tags = ?tag_names, "No recipe carries every requested tag");
                let filters = self.facets(user).await;
                return Ok(SearchResponse::new(
                    Vec::new(),
                    Pagination::empty(),
                    filters,
                    elapsed_ms(start),
                ));
            }

            Some(ids.into_iter().map(RecipeId::new).collect())
        };

        let text = self.text_stage(params.query.as_deref()).await;
        let plan = planner::plan(user, params, text, tag_candidates);
        debug!(order = ?plan.order, predicates = plan.filter.predicates().len(), "Query planned");

        let (results, filters) = tokio::join!(
            async {
                tokio::try_join!(
                    self.store.count_recipes(&plan.filter),
                    self.store
                        .page_recipes(&plan.filter, &plan.order, params.limit, params.offset),
                )
            },
            self.facets(user)
        );
        let (total, page) = results.map_err(db_err)?;

        let recipes = self.hydrate(page).await?;

        Ok(SearchResponse::new(
            recipes,
            Pagination::new(total, params.limit, params.offset),
            filters,
            elapsed_ms(start),
        ))
    }
}

#[async_trait::async_trait]
impl SearchService for SeaOrmSearchService {
    async fn search(
        &self,
        user: &UserId,
        params: SearchParams,
    ) -> Result<SearchResponse, SearchError> {
        let start = Instant::now();
        metrics::counter!("search_requests_total").increment(1);

        let result = self.run_search(user, &params, start).await;

        metrics::histogram!("search_duration_seconds").record(start.elapsed().as_secs_f64());

        match &result {
            Ok(response) => debug!(
                user = %user,
                total = response.total,
                returned = response.recipes.len(),
                search_time_ms = response.search_time,
                "Search finished"
            ),
            Err(e) => error!(
                user = %user,
                query = ?params.query,
                params = ?params,
                error = %e,
                "Recipe search failed"
            ),
        }

        result
    }

    async fn suggestions(
        &self,
        user: &UserId,
        partial: &str,
        limit: Option<usize>,
    ) -> Vec<String> {
        let fragment = partial.trim();
        if fragment.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }
        let limit = limit.unwrap_or(self.default_suggestion_limit);

        let key = CacheKey::Suggestions(user.clone(), fragment.to_lowercase());
        if let Some(CachePayload::Suggestions(all)) = self.cached(&key) {
            return all.into_iter().take(limit).collect();
        }

        let filter = Filter::visible_to(user);
        let lookups = tokio::try_join!(
            self.store.title_matches(&filter, fragment, TITLE_MATCHES),
            self.store.cuisine_matches(&filter, fragment, CUISINE_MATCHES),
            self.store.tag_matches(&filter, fragment, TAG_MATCHES),
        );

        match lookups {
            Ok((titles, cuisines, tags)) => {
                let merged = merge_suggestions(titles, cuisines, tags);
                self.cache
                    .set(key, CachePayload::Suggestions(merged.clone()));
                merged.into_iter().take(limit).collect()
            }
            Err(e) => {
                warn!(user = %user, partial = %fragment, error = %e, "Failed to compute suggestions");
                Vec::new()
            }
        }
    }

    async fn facets(&self, user: &UserId) -> FacetSet {
        let key = CacheKey::Facets(user.clone());
        if let Some(CachePayload::Facets(facets)) = self.cached(&key) {
            return facets;
        }

        let filter = Filter::visible_to(user);
        let lookups = tokio::try_join!(
            self.store.distinct_cuisines(&filter),
            self.store.distinct_difficulties(&filter),
            self.store.tag_names_in_use(&filter),
        );

        match lookups {
            Ok((cuisines, difficulties, tags)) => {
                let facets = FacetSet::from_raw(cuisines, difficulties, tags);
                self.cache.set(key, CachePayload::Facets(facets.clone()));
                facets
            }
            Err(e) => {
                warn!(user = %user, error = %e, "Failed to compute search facets");
                FacetSet::default()
            }
        }
    }

    async fn get_recipe(
        &self,
        user: &UserId,
        id: RecipeId,
    ) -> Result<Option<RecipeDetail>, SearchError> {
        let filter = Filter::visible_to(user);
        let Some(recipe) = self
            .store
            .find_recipe(id, &filter)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let ids = [id.value()];
        let (hydrated, notes) = tokio::try_join!(self.hydrate(vec![recipe]), async {
            self.store.notes_for(&ids).await.map_err(db_err)
        })?;

        Ok(hydrated.into_iter().next().map(|recipe| RecipeDetail {
            recipe,
            notes: notes.into_iter().map(|(_, note)| note).collect(),
        }))
    }

    fn clear_cache(&self) {
        self.cache.clear();
        info!("Search filter cache cleared");
    }
}
