//! Typed predicates over the recipe table.
//!
//! The planner composes these into a [`Filter`] (a conjunction); the store
//! adapter in `crate::db::filter` translates a filter into a `SeaORM`
//! condition. Nothing here builds query text.

use crate::domain::{Difficulty, RecipeId, UserId};

/// Which recipes the acting user may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    /// Default scope: the user's own recipes plus every public recipe.
    OwnedOrPublic(UserId),
    /// Explicit `isPublic = true`.
    PublicOnly,
    /// Explicit `isPublic = false`: private recipes, which only their owner may see.
    PrivateOwnedBy(UserId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    NotArchived,
    Visible(Visibility),
    /// Restrict to a candidate set. An empty set matches nothing.
    IdIn(Vec<RecipeId>),
    /// Structured text fallback: any token contained in title, description or cuisine.
    TextContains(Vec<String>),
    CuisineIn(Vec<String>),
    DifficultyIn(Vec<Difficulty>),
    MaxPrepTime(i32),
    MaxCookTime(i32),
    Servings(i32),
}

/// A conjunction of predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-archived recipes the user may see, with no further narrowing.
    #[must_use]
    pub fn visible_to(user: &UserId) -> Self {
        Self::new()
            .and(Predicate::NotArchived)
            .and(Predicate::Visible(Visibility::OwnedOrPublic(user.clone())))
    }

    #[must_use]
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    #[must_use]
    pub fn contains(&self, predicate: &Predicate) -> bool {
        self.predicates.contains(predicate)
    }
}
