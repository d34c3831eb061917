use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        // Sort keys are unique per recipe and define display order.
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_ingredients_recipe_order ON ingredients(recipe_id, sort_order)",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_instructions_recipe_step ON instructions(recipe_id, step_number)",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_images_recipe_order ON images(recipe_id, sort_order)",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_recipe_notes_recipe ON recipe_notes(recipe_id)",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_recipe_tags_tag ON recipe_tags(tag_id)",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_recipes_visibility ON recipes(is_archived, is_public, owner_id)",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_recipes_created_at ON recipes(created_at)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for index in [
            "idx_recipes_created_at",
            "idx_recipes_visibility",
            "idx_recipe_tags_tag",
            "idx_recipe_notes_recipe",
            "idx_images_recipe_order",
            "idx_instructions_recipe_step",
            "idx_ingredients_recipe_order",
        ] {
            conn.execute_unprepared(&format!("DROP INDEX IF EXISTS {index}"))
                .await?;
        }

        Ok(())
    }
}
