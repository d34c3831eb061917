//! Store adapter: translates the engine's typed [`Filter`] and [`PageOrder`]
//! into `SeaORM` conditions and orderings on the `recipes` table.

use sea_orm::sea_query::{CaseStatement, Expr, LikeExpr, SimpleExpr, Values};
use sea_orm::{ColumnTrait, Condition, Order, QueryOrder, Select};

use crate::domain::Difficulty;
use crate::entities::recipes;
use crate::search::{Filter, PageOrder, Predicate, SortKey, Visibility};

const LIKE_ESCAPE: char = '\\';

/// Escapes LIKE metacharacters so `text` only ever matches itself.
#[must_use]
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// `column LIKE '%text%' ESCAPE '\'` with `text` taken literally.
pub fn contains_literal<C: ColumnTrait>(column: C, text: &str) -> SimpleExpr {
    column.like(LikeExpr::new(format!("%{}%", escape_like(text))).escape(LIKE_ESCAPE))
}

#[must_use]
pub fn to_condition(filter: &Filter) -> Condition {
    filter
        .predicates()
        .iter()
        .fold(Condition::all(), |cond, p| cond.add(predicate_condition(p)))
}

fn predicate_condition(predicate: &Predicate) -> Condition {
    match predicate {
        Predicate::NotArchived => Condition::all().add(recipes::Column::IsArchived.eq(false)),
        Predicate::Visible(visibility) => visibility_condition(visibility),
        // An empty candidate set must match nothing, never "no filter".
        Predicate::IdIn(ids) if ids.is_empty() => Condition::all().add(Expr::cust("1 = 0")),
        Predicate::IdIn(ids) => {
            Condition::all().add(recipes::Column::Id.is_in(ids.iter().map(|id| id.value())))
        }
        Predicate::TextContains(tokens) => tokens.iter().fold(Condition::any(), |cond, token| {
            cond.add(contains_literal(recipes::Column::Title, token))
                .add(contains_literal(recipes::Column::Description, token))
                .add(contains_literal(recipes::Column::Cuisine, token))
        }),
        Predicate::CuisineIn(cuisines) => {
            Condition::all().add(recipes::Column::Cuisine.is_in(cuisines.iter().cloned()))
        }
        Predicate::DifficultyIn(levels) => Condition::all()
            .add(recipes::Column::Difficulty.is_in(levels.iter().map(|d| d.as_str()))),
        Predicate::MaxPrepTime(minutes) => {
            Condition::all().add(recipes::Column::PrepTime.lte(*minutes))
        }
        Predicate::MaxCookTime(minutes) => {
            Condition::all().add(recipes::Column::CookTime.lte(*minutes))
        }
        Predicate::Servings(servings) => {
            Condition::all().add(recipes::Column::Servings.eq(*servings))
        }
    }
}

fn visibility_condition(visibility: &Visibility) -> Condition {
    match visibility {
        Visibility::OwnedOrPublic(user) => Condition::any()
            .add(recipes::Column::OwnerId.eq(user.as_str()))
            .add(recipes::Column::IsPublic.eq(true)),
        Visibility::PublicOnly => Condition::all().add(recipes::Column::IsPublic.eq(true)),
        Visibility::PrivateOwnedBy(user) => Condition::all()
            .add(recipes::Column::IsPublic.eq(false))
            .add(recipes::Column::OwnerId.eq(user.as_str())),
    }
}

const fn sort_column(key: SortKey) -> Option<recipes::Column> {
    match key {
        SortKey::Relevance | SortKey::Difficulty => None,
        SortKey::CreatedAt => Some(recipes::Column::CreatedAt),
        SortKey::UpdatedAt => Some(recipes::Column::UpdatedAt),
        SortKey::Title => Some(recipes::Column::Title),
        SortKey::PrepTime => Some(recipes::Column::PrepTime),
        SortKey::CookTime => Some(recipes::Column::CookTime),
        SortKey::Servings => Some(recipes::Column::Servings),
        SortKey::Cuisine => Some(recipes::Column::Cuisine),
    }
}

/// Position of the difficulty level in [`Difficulty::ALL`]; unknown or
/// missing levels rank after `hard`.
fn difficulty_rank() -> SimpleExpr {
    Difficulty::ALL
        .iter()
        .zip(0_i32..)
        .fold(CaseStatement::new(), |case, (level, rank)| {
            case.case(recipes::Column::Difficulty.eq(level.as_str()), rank)
        })
        .finally(i32::try_from(Difficulty::ALL.len()).unwrap_or(i32::MAX))
        .into()
}

fn newest_first(select: Select<recipes::Entity>) -> Select<recipes::Entity> {
    select
        .order_by_desc(recipes::Column::CreatedAt)
        .order_by_desc(recipes::Column::Id)
}

#[must_use]
pub fn apply_order(select: Select<recipes::Entity>, order: &PageOrder) -> Select<recipes::Entity> {
    match order {
        // Renders as CASE WHEN id = .. THEN 0 .. on SQLite, i.e. candidate position.
        PageOrder::Relevance(ids) => select
            .order_by(
                recipes::Column::Id,
                Order::Field(Values(ids.iter().map(|id| id.value().into()).collect())),
            )
            .order_by_asc(recipes::Column::Id),
        PageOrder::Column(key, direction) => {
            let ord = if direction.is_ascending() {
                Order::Asc
            } else {
                Order::Desc
            };
            let select = match (key, sort_column(*key)) {
                (_, Some(column)) => select.order_by(column, ord.clone()),
                // Level order, not the lexical order of the stored text.
                (SortKey::Difficulty, None) => select.order_by(difficulty_rank(), ord.clone()),
                _ => return newest_first(select),
            };
            select.order_by(recipes::Column::Id, ord)
        }
        PageOrder::Newest => newest_first(select),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RecipeId, SortOrder, UserId};
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn sql(filter: &Filter, order: &PageOrder) -> String {
        apply_order(
            recipes::Entity::find().filter(to_condition(filter)),
            order,
        )
        .build(DbBackend::Sqlite)
        .to_string()
    }

    #[test]
    fn default_visibility_is_owner_or_public() {
        let sql = sql(&Filter::visible_to(&UserId::new("alice")), &PageOrder::Newest);
        assert!(sql.contains(r#""recipes"."is_archived" = FALSE"#));
        assert!(sql.contains(r#""recipes"."owner_id" = 'alice' OR "recipes"."is_public" = TRUE"#));
        assert!(sql.contains(r#"ORDER BY "recipes"."created_at" DESC, "recipes"."id" DESC"#));
    }

    #[test]
    fn empty_candidate_set_matches_nothing() {
        let filter = Filter::new().and(Predicate::IdIn(Vec::new()));
        assert!(sql(&filter, &PageOrder::Newest).contains("1 = 0"));
    }

    #[test]
    fn text_fallback_ors_tokens_across_columns() {
        let filter = Filter::new().and(Predicate::TextContains(vec![
            "choc".to_string(),
            "cake".to_string(),
        ]));
        let sql = sql(&filter, &PageOrder::Newest);
        assert!(sql.contains(r#""recipes"."title" LIKE '%choc%' ESCAPE '\'"#));
        assert!(sql.contains(r#""recipes"."cuisine" LIKE '%cake%' ESCAPE '\'"#));
        assert!(sql.contains(" OR "));
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("100% rye"), r"100\% rye");
        assert_eq!(escape_like("snake_case"), r"snake\_case");
        assert_eq!(escape_like(r"a\b"), r"a\\b");
        assert_eq!(escape_like("plain"), "plain");

        let filter = Filter::new().and(Predicate::TextContains(vec!["50%".to_string()]));
        let sql = sql(&filter, &PageOrder::Newest);
        assert!(sql.contains(r#""recipes"."title" LIKE '%50\%%' ESCAPE '\'"#));
    }

    #[test]
    fn relevance_orders_by_candidate_position() {
        let filter = Filter::new();
        let order = PageOrder::Relevance(vec![RecipeId::new(7), RecipeId::new(3)]);
        let sql = sql(&filter, &order);
        assert!(sql.contains("CASE WHEN"));
        assert!(sql.contains("THEN 0"));
        assert!(sql.contains("THEN 1"));
    }

    #[test]
    fn explicit_sort_adds_id_tiebreaker() {
        let order = PageOrder::Column(SortKey::Title, SortOrder::Ascending);
        let sql = sql(&Filter::new(), &order);
        assert!(sql.contains(r#"ORDER BY "recipes"."title" ASC, "recipes"."id" ASC"#));
    }

    #[test]
    fn difficulty_sorts_by_level() {
        let order = PageOrder::Column(SortKey::Difficulty, SortOrder::Descending);
        let sql = sql(&Filter::new(), &order);
        assert!(sql.contains("ORDER BY (CASE WHEN"));
        assert!(sql.contains(r#""recipes"."difficulty" = 'easy') THEN 0"#));
        assert!(sql.contains(r#""recipes"."difficulty" = 'medium') THEN 1"#));
        assert!(sql.contains(r#""recipes"."difficulty" = 'hard') THEN 2"#));
        assert!(sql.contains(r#"ELSE 3 END) DESC, "recipes"."id" DESC"#));
    }
}
