use crate::domain::RecipeId;
use crate::models::recipe::{Image, Ingredient, Instruction, Note, Recipe, Tag};
use crate::search::{Filter, PageOrder};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod filter;
pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn recipe_repo(&self) -> repositories::recipe::RecipeRepository {
        repositories::recipe::RecipeRepository::new(self.conn.clone())
    }

    fn child_repo(&self) -> repositories::children::ChildRepository {
        repositories::children::ChildRepository::new(self.conn.clone())
    }

    fn tag_repo(&self) -> repositories::tag::TagRepository {
        repositories::tag::TagRepository::new(self.conn.clone())
    }

    fn index_repo(&self) -> repositories::search_index::SearchIndexRepository {
        repositories::search_index::SearchIndexRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Recipes
    // ========================================================================

    pub async fn get_recipe(&self, id: RecipeId) -> Result<Option<Recipe>> {
        self.recipe_repo().get(id.value()).await
    }

    pub async fn find_recipe(&self, id: RecipeId, filter: &Filter) -> Result<Option<Recipe>> {
        self.recipe_repo().find_matching(id.value(), filter).await
    }

    pub async fn count_recipes(&self, filter: &Filter) -> Result<u64> {
        self.recipe_repo().count(filter).await
    }

    pub async fn page_recipes(
        &self,
        filter: &Filter,
        order: &PageOrder,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Recipe>> {
        self.recipe_repo().page(filter, order, limit, offset).await
    }

    pub async fn active_recipes_after(&self, after: i32, limit: u64) -> Result<Vec<Recipe>> {
        self.recipe_repo().active_after(after, limit).await
    }

    pub async fn distinct_cuisines(&self, filter: &Filter) -> Result<Vec<String>> {
        self.recipe_repo().distinct_cuisines(filter).await
    }

    pub async fn distinct_difficulties(&self, filter: &Filter) -> Result<Vec<String>> {
        self.recipe_repo().distinct_difficulties(filter).await
    }

    pub async fn title_matches(
        &self,
        filter: &Filter,
        fragment: &str,
        limit: u64,
    ) -> Result<Vec<String>> {
        self.recipe_repo()
            .title_matches(filter, fragment, limit)
            .await
    }

    pub async fn cuisine_matches(
        &self,
        filter: &Filter,
        fragment: &str,
        limit: u64,
    ) -> Result<Vec<String>> {
        self.recipe_repo()
            .cuisine_matches(filter, fragment, limit)
            .await
    }

    // ========================================================================
    // Child records
    // ========================================================================

    pub async fn ingredients_for(&self, ids: &[i32]) -> Result<Vec<(RecipeId, Ingredient)>> {
        self.child_repo().ingredients_for(ids).await
    }

    pub async fn instructions_for(&self, ids: &[i32]) -> Result<Vec<(RecipeId, Instruction)>> {
        self.child_repo().instructions_for(ids).await
    }

    pub async fn images_for(&self, ids: &[i32]) -> Result<Vec<(RecipeId, Image)>> {
        self.child_repo().images_for(ids).await
    }

    pub async fn tags_for(&self, ids: &[i32]) -> Result<Vec<(RecipeId, Tag)>> {
        self.child_repo().tags_for(ids).await
    }

    pub async fn notes_for(&self, ids: &[i32]) -> Result<Vec<(RecipeId, Note)>> {
        self.child_repo().notes_for(ids).await
    }

    // ========================================================================
    // Tags
    // ========================================================================

    pub async fn recipe_ids_with_all_tags(&self, names: &[String]) -> Result<Vec<i32>> {
        self.tag_repo().recipe_ids_with_all(names).await
    }

    pub async fn tag_names_in_use(&self, filter: &Filter) -> Result<Vec<String>> {
        self.tag_repo().names_in_use(filter).await
    }

    pub async fn tag_matches(
        &self,
        filter: &Filter,
        fragment: &str,
        limit: u64,
    ) -> Result<Vec<String>> {
        self.tag_repo().name_matches(filter, fragment, limit).await
    }

    // ========================================================================
    // Search index
    // ========================================================================

    pub async fn match_index(&self, fts_query: &str) -> Result<Vec<i32>> {
        self.index_repo().match_ids(fts_query).await
    }

    pub async fn replace_index_entry(&self, id: RecipeId, content: &str) -> Result<()> {
        self.index_repo().replace(id.value(), content).await
    }

    pub async fn remove_index_entry(&self, id: RecipeId) -> Result<bool> {
        self.index_repo().remove(id.value()).await
    }

    pub async fn clear_index(&self) -> Result<u64> {
        self.index_repo().clear().await
    }

    pub async fn count_index_entries(&self) -> Result<u64> {
        self.index_repo().count().await
    }

    pub async fn index_entry(&self, id: RecipeId) -> Result<Option<String>> {
        self.index_repo().content(id.value()).await
    }
}
