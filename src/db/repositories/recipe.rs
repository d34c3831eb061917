use crate::db::filter::{apply_order, contains_literal, to_condition};
use crate::entities::{prelude::*, recipes};
use crate::models::recipe::Recipe;
use crate::search::{Filter, PageOrder};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

/// Repository for the `recipes` table.
pub struct RecipeRepository {
    conn: DatabaseConnection,
}

impl RecipeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<Recipe>> {
        let row = Recipes::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(Recipe::from))
    }

    /// Fetches a recipe only if it satisfies `filter`.
    pub async fn find_matching(&self, id: i32, filter: &Filter) -> Result<Option<Recipe>> {
        let row = Recipes::find_by_id(id)
            .filter(to_condition(filter))
            .one(&self.conn)
            .await?;
        Ok(row.map(Recipe::from))
    }

    pub async fn count(&self, filter: &Filter) -> Result<u64> {
        let total = Recipes::find()
            .filter(to_condition(filter))
            .count(&self.conn)
            .await?;
        Ok(total)
    }

    pub async fn page(
        &self,
        filter: &Filter,
        order: &PageOrder,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Recipe>> {
        let query = apply_order(Recipes::find().filter(to_condition(filter)), order);

        let rows = query.limit(limit).offset(offset).all(&self.conn).await?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    /// Keyset batch of non-archived recipes with `id > after`, ascending.
    pub async fn active_after(&self, after: i32, limit: u64) -> Result<Vec<Recipe>> {
        let rows = Recipes::find()
            .filter(recipes::Column::IsArchived.eq(false))
            .filter(recipes::Column::Id.gt(after))
            .order_by_asc(recipes::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    pub async fn distinct_cuisines(&self, filter: &Filter) -> Result<Vec<String>> {
        let cuisines: Vec<String> = Recipes::find()
            .select_only()
            .column(recipes::Column::Cuisine)
            .distinct()
            .filter(to_condition(filter))
            .filter(recipes::Column::Cuisine.is_not_null())
            .filter(recipes::Column::Cuisine.ne(""))
            .order_by_asc(recipes::Column::Cuisine)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(cuisines)
    }

    pub async fn distinct_difficulties(&self, filter: &Filter) -> Result<Vec<String>> {
        let levels: Vec<String> = Recipes::find()
            .select_only()
            .column(recipes::Column::Difficulty)
            .distinct()
            .filter(to_condition(filter))
            .filter(recipes::Column::Difficulty.is_not_null())
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(levels)
    }

    /// Titles containing `fragment` (case-insensitive for ASCII on SQLite).
    pub async fn title_matches(
        &self,
        filter: &Filter,
        fragment: &str,
        limit: u64,
    ) -> Result<Vec<String>> {
        let titles: Vec<String> = Recipes::find()
            .select_only()
            .column(recipes::Column::Title)
            .distinct()
            .filter(to_condition(filter))
            .filter(contains_literal(recipes::Column::Title, fragment))
            .order_by_asc(recipes::Column::Title)
            .limit(limit)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(titles)
    }

    pub async fn cuisine_matches(
        &self,
        filter: &Filter,
        fragment: &str,
        limit: u64,
    ) -> Result<Vec<String>> {
        let cuisines: Vec<String> = Recipes::find()
            .select_only()
            .column(recipes::Column::Cuisine)
            .distinct()
            .filter(to_condition(filter))
            .filter(contains_literal(recipes::Column::Cuisine, fragment))
            .order_by_asc(recipes::Column::Cuisine)
            .limit(limit)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(cuisines)
    }
}
