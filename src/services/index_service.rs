//! Domain service for keeping the full-text search index in step with the
//! recipe tables.
//!
//! The persistence layer calls these hooks after it commits a recipe write.
//! Index entries are projections of the recipe and its text-bearing
//! children; they are always rewritten whole, never patched.

use crate::domain::RecipeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    /// The index could not answer a `MATCH` (bad syntax, missing table).
    #[error("Search index query failed: {0}")]
    Query(String),

    #[error("Failed to write index entry for recipe {id}: {message}")]
    Write { id: RecipeId, message: String },

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for IndexError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait IndexMaintainer: Send + Sync {
    /// Indexes a newly created recipe. Missing or archived recipes are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Write`] if the entry cannot be stored.
    async fn on_recipe_created(&self, id: RecipeId) -> Result<(), IndexError>;

    /// Drops the existing entry and writes a fresh one, unless the recipe
    /// is now archived or gone.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Write`] if the entry cannot be stored.
    async fn on_recipe_updated(&self, id: RecipeId) -> Result<(), IndexError>;

    /// # Errors
    ///
    /// Returns [`IndexError::Write`] if the entry cannot be removed.
    async fn on_recipe_deleted(&self, id: RecipeId) -> Result<(), IndexError>;

    /// Clears the index and repopulates it from every non-archived recipe.
    /// Returns the number of entries written.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Database`] if recipes cannot be read, or
    /// [`IndexError::Write`] if an entry cannot be stored.
    async fn rebuild_index(&self) -> Result<u64, IndexError>;
}
