use crate::domain::RecipeId;
use crate::entities::{
    images, ingredients, instructions, prelude::*, recipe_notes, recipe_tags, tags,
};
use crate::models::recipe::{Image, Ingredient, Instruction, Note, Tag};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

/// Batched loaders for recipe child records.
///
/// Every loader takes the full set of page ids and issues a single query,
/// returning rows paired with their owning recipe, already in display order.
pub struct ChildRepository {
    conn: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct RecipeTagRow {
    recipe_id: i32,
    tag_id: i32,
    tag_name: String,
}

impl ChildRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn ingredients_for(&self, ids: &[i32]) -> Result<Vec<(RecipeId, Ingredient)>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Ingredients::find()
            .filter(ingredients::Column::RecipeId.is_in(ids.to_vec()))
            .order_by_asc(ingredients::Column::RecipeId)
            .order_by_asc(ingredients::Column::SortOrder)
            .order_by_asc(ingredients::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|m| (RecipeId::new(m.recipe_id), m.into()))
            .collect())
    }

    pub async fn instructions_for(&self, ids: &[i32]) -> Result<Vec<(RecipeId, Instruction)>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Instructions::find()
            .filter(instructions::Column::RecipeId.is_in(ids.to_vec()))
            .order_by_asc(instructions::Column::RecipeId)
            .order_by_asc(instructions::Column::StepNumber)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|m| (RecipeId::new(m.recipe_id), m.into()))
            .collect())
    }

    pub async fn images_for(&self, ids: &[i32]) -> Result<Vec<(RecipeId, Image)>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Images::find()
            .filter(images::Column::RecipeId.is_in(ids.to_vec()))
            .order_by_asc(images::Column::RecipeId)
            .order_by_asc(images::Column::SortOrder)
            .order_by_asc(images::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|m| (RecipeId::new(m.recipe_id), m.into()))
            .collect())
    }

    /// Tags via the join table, ordered by name within each recipe.
    pub async fn tags_for(&self, ids: &[i32]) -> Result<Vec<(RecipeId, Tag)>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = RecipeTags::find()
            .select_only()
            .column(recipe_tags::Column::RecipeId)
            .column_as(tags::Column::Id, "tag_id")
            .column_as(tags::Column::Name, "tag_name")
            .join(JoinType::InnerJoin, recipe_tags::Relation::Tag.def())
            .filter(recipe_tags::Column::RecipeId.is_in(ids.to_vec()))
            .order_by_asc(recipe_tags::Column::RecipeId)
            .order_by_asc(tags::Column::Name)
            .into_model::<RecipeTagRow>()
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                (
                    RecipeId::new(r.recipe_id),
                    Tag {
                        id: r.tag_id,
                        name: r.tag_name,
                    },
                )
            })
            .collect())
    }

    pub async fn notes_for(&self, ids: &[i32]) -> Result<Vec<(RecipeId, Note)>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = RecipeNotes::find()
            .filter(recipe_notes::Column::RecipeId.is_in(ids.to_vec()))
            .order_by_asc(recipe_notes::Column::RecipeId)
            .order_by_asc(recipe_notes::Column::CreatedAt)
            .order_by_asc(recipe_notes::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|m| (RecipeId::new(m.recipe_id), m.into()))
            .collect())
    }
}
