//! `SeaORM` implementation of [`IndexMaintainer`].

use crate::db::Store;
use crate::domain::RecipeId;
use crate::models::recipe::Recipe;
use crate::search::document::build_document;
use crate::services::index_service::{IndexError, IndexMaintainer};
use std::sync::Arc;
use tracing::{debug, info};

pub struct SeaOrmIndexMaintainer {
    store: Arc<Store>,
    batch_size: u64,
}

impl SeaOrmIndexMaintainer {
    #[must_use]
    pub const fn new(store: Arc<Store>, batch_size: u64) -> Self {
        Self { store, batch_size }
    }

    /// Builds the index text for one recipe from its current child rows.
    async fn document_for(&self, recipe: &Recipe) -> Result<String, IndexError> {
        let ids = [recipe.id.value()];

        let (ingredients, instructions, tags, notes) = tokio::try_join!(
            self.store.ingredients_for(&ids),
            self.store.instructions_for(&ids),
            self.store.tags_for(&ids),
            self.store.notes_for(&ids),
        )
        .map_err(|e| IndexError::Database(e.to_string()))?;

        Ok(build_document(
            recipe,
            &rows_only(ingredients),
            &rows_only(instructions),
            &rows_only(tags),
            &rows_only(notes),
        ))
    }

    async fn write_entry(&self, recipe: &Recipe) -> Result<(), IndexError> {
        let content = self.document_for(recipe).await?;
        self.store
            .replace_index_entry(recipe.id, &content)
            .await
            .map_err(|e| IndexError::Write {
                id: recipe.id,
                message: e.to_string(),
            })
    }

    async fn indexable(&self, id: RecipeId) -> Result<Option<Recipe>, IndexError> {
        let recipe = self
            .store
            .get_recipe(id)
            .await
            .map_err(|e| IndexError::Database(e.to_string()))?;

        Ok(recipe.filter(|r| !r.is_archived))
    }
}

fn rows_only<T>(rows: Vec<(RecipeId, T)>) -> Vec<T> {
    rows.into_iter().map(|(_, row)| row).collect()
}

#[async_trait::async_trait]
impl IndexMaintainer for SeaOrmIndexMaintainer {
    async fn on_recipe_created(&self, id: RecipeId) -> Result<(), IndexError> {
        match self.indexable(id).await? {
            Some(recipe) => self.write_entry(&recipe).await,
            None => {
                debug!(recipe_id = %id, "Skipping index entry for missing or archived recipe");
                Ok(())
            }
        }
    }

    async fn on_recipe_updated(&self, id: RecipeId) -> Result<(), IndexError> {
        match self.indexable(id).await? {
            Some(recipe) => self.write_entry(&recipe).await,
            None => self.on_recipe_deleted(id).await,
        }
    }

    async fn on_recipe_deleted(&self, id: RecipeId) -> Result<(), IndexError> {
        let removed = self
            .store
            .remove_index_entry(id)
            .await
            .map_err(|e| IndexError::Write {
                id,
                message: e.to_string(),
            })?;

        debug!(recipe_id = %id, removed, "Removed index entry");
        Ok(())
    }

    async fn rebuild_index(&self) -> Result<u64, IndexError> {
        let cleared = self
            .store
            .clear_index()
            .await
            .map_err(|e| IndexError::Database(e.to_string()))?;

        info!(cleared, "Rebuilding search index");

        let mut written = 0u64;
        let mut after = 0;

        loop {
            let batch = self
                .store
                .active_recipes_after(after, self.batch_size)
                .await
                .map_err(|e| IndexError::Database(e.to_string()))?;

            let Some(last) = batch.last() else {
                break;
            };
            after = last.id.value();

            for recipe in &batch {
                self.write_entry(recipe).await?;
                written += 1;
            }

            debug!(written, last_id = after, "Indexed batch");
        }

        info!(written, "Search index rebuilt");
        Ok(written)
    }
}
