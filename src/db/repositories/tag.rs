use crate::db::filter::{contains_literal, to_condition};
use crate::entities::{prelude::*, recipe_tags, tags};
use crate::search::Filter;
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};

pub struct TagRepository {
    conn: DatabaseConnection,
}

impl TagRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Ids of recipes carrying every one of `names`.
    ///
    /// `names` must be distinct. `recipe_tags` is keyed on
    /// `(recipe_id, tag_id)` and tag names are unique, so each requested
    /// name contributes at most one row per recipe and the row count equals
    /// the number of matched names.
    pub async fn recipe_ids_with_all(&self, names: &[String]) -> Result<Vec<i32>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let required = i64::try_from(names.len())?;

        let ids: Vec<i32> = RecipeTags::find()
            .select_only()
            .column(recipe_tags::Column::RecipeId)
            .join(JoinType::InnerJoin, recipe_tags::Relation::Tag.def())
            .filter(tags::Column::Name.is_in(names.to_vec()))
            .group_by(recipe_tags::Column::RecipeId)
            .having(Expr::expr(recipe_tags::Column::TagId.count()).eq(required))
            .order_by_asc(recipe_tags::Column::RecipeId)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(ids)
    }

    /// Distinct tag names attached to at least one recipe matching `filter`.
    pub async fn names_in_use(&self, filter: &Filter) -> Result<Vec<String>> {
        let names: Vec<String> = Tags::find()
            .select_only()
            .column(tags::Column::Name)
            .distinct()
            .join(JoinType::InnerJoin, tags::Relation::RecipeTags.def())
            .join(JoinType::InnerJoin, recipe_tags::Relation::Recipe.def())
            .filter(to_condition(filter))
            .order_by_asc(tags::Column::Name)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(names)
    }

    pub async fn name_matches(
        &self,
        filter: &Filter,
        fragment: &str,
        limit: u64,
    ) -> Result<Vec<String>> {
        let names: Vec<String> = Tags::find()
            .select_only()
            .column(tags::Column::Name)
            .distinct()
            .join(JoinType::InnerJoin, tags::Relation::RecipeTags.def())
            .join(JoinType::InnerJoin, recipe_tags::Relation::Recipe.def())
            .filter(to_condition(filter))
            .filter(contains_literal(tags::Column::Name, fragment))
            .order_by_asc(tags::Column::Name)
            .limit(limit)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(names)
    }
}
