//! Raw access to the `recipe_search` FTS5 table.
//!
//! The table's rowid is the recipe id. `SeaORM` has no entity support for
//! virtual tables, so everything here goes through [`Statement`].

use anyhow::Result;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, FromQueryResult, Statement, TransactionTrait, Value,
};

pub struct SearchIndexRepository {
    conn: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct IndexHit {
    recipe_id: i64,
}

#[derive(Debug, FromQueryResult)]
struct IndexCount {
    total: i64,
}

#[derive(Debug, FromQueryResult)]
struct IndexContent {
    content: String,
}

impl SearchIndexRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Runs an FTS5 `MATCH` and returns matching recipe ids, best match first.
    pub async fn match_ids(&self, fts_query: &str) -> Result<Vec<i32>> {
        let backend = self.conn.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "SELECT rowid AS recipe_id FROM recipe_search WHERE recipe_search MATCH ? ORDER BY rank",
            [Value::from(fts_query)],
        );

        let hits = IndexHit::find_by_statement(stmt).all(&self.conn).await?;

        Ok(hits
            .into_iter()
            .filter_map(|h| i32::try_from(h.recipe_id).ok())
            .collect())
    }

    /// Replaces the entry for `recipe_id` atomically.
    pub async fn replace(&self, recipe_id: i32, content: &str) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let txn = self.conn.begin().await?;

        txn.execute(Statement::from_sql_and_values(
            backend,
            "DELETE FROM recipe_search WHERE rowid = ?",
            [Value::from(recipe_id)],
        ))
        .await?;

        txn.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO recipe_search (rowid, content) VALUES (?, ?)",
            [Value::from(recipe_id), Value::from(content)],
        ))
        .await?;

        txn.commit().await?;
        Ok(())
    }

    /// Returns whether an entry was removed.
    pub async fn remove(&self, recipe_id: i32) -> Result<bool> {
        let backend = self.conn.get_database_backend();
        let result = self
            .conn
            .execute(Statement::from_sql_and_values(
                backend,
                "DELETE FROM recipe_search WHERE rowid = ?",
                [Value::from(recipe_id)],
            ))
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn clear(&self) -> Result<u64> {
        let result = self
            .conn
            .execute_unprepared("DELETE FROM recipe_search")
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count(&self) -> Result<u64> {
        let backend = self.conn.get_database_backend();
        let row = IndexCount::find_by_statement(Statement::from_string(
            backend,
            "SELECT COUNT(*) AS total FROM recipe_search",
        ))
        .one(&self.conn)
        .await?;

        Ok(row.map_or(0, |r| u64::try_from(r.total).unwrap_or(0)))
    }

    pub async fn content(&self, recipe_id: i32) -> Result<Option<String>> {
        let backend = self.conn.get_database_backend();
        let row = IndexContent::find_by_statement(Statement::from_sql_and_values(
            backend,
            "SELECT content FROM recipe_search WHERE rowid = ?",
            [Value::from(recipe_id)],
        ))
        .one(&self.conn)
        .await?;

        Ok(row.map(|r| r.content))
    }
}
