use sea_orm_migration::prelude::*;

/// Creates the derived full-text index over recipe text.
///
/// The index row's `rowid` is the recipe id, so a recipe can own at most one entry.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared(
            "CREATE VIRTUAL TABLE IF NOT EXISTS recipe_search USING fts5(content, tokenize = 'unicode61 remove_diacritics 2')",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared("DROP TABLE IF EXISTS recipe_search")
            .await?;

        Ok(())
    }
}
