use serde::{Deserialize, Serialize};

use crate::domain::{Difficulty, RecipeId};
use crate::entities::{images, ingredients, instructions, recipe_notes, recipes, tags};

/// Recipe row as returned by the search page query, before hydration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub servings: Option<i32>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub cuisine: Option<String>,
    pub is_public: bool,
    pub is_archived: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub notes: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    pub id: i32,
    pub step_number: i32,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: i32,
    pub url: String,
    pub caption: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i32,
    pub content: String,
    pub created_at: String,
}

/// A recipe with its child records attached, as returned by search.
///
/// Notes are not part of search hydration; see [`RecipeDetail`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydratedRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
    pub tags: Vec<Tag>,
    pub images: Vec<Image>,
}

impl HydratedRecipe {
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }
}

/// A single recipe fetched individually, including its notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: HydratedRecipe,
    pub notes: Vec<Note>,
}

impl From<recipes::Model> for Recipe {
    fn from(m: recipes::Model) -> Self {
        Self {
            id: RecipeId::new(m.id),
            owner_id: m.owner_id,
            title: m.title,
            description: m.description,
            servings: m.servings,
            prep_time: m.prep_time,
            cook_time: m.cook_time,
            difficulty: m.difficulty.and_then(|d| d.parse().ok()),
            cuisine: m.cuisine,
            is_public: m.is_public,
            is_archived: m.is_archived,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<ingredients::Model> for Ingredient {
    fn from(m: ingredients::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            quantity: m.quantity,
            unit: m.unit,
            notes: m.notes,
            sort_order: m.sort_order,
        }
    }
}

impl From<instructions::Model> for Instruction {
    fn from(m: instructions::Model) -> Self {
        Self {
            id: m.id,
            step_number: m.step_number,
            content: m.content,
        }
    }
}

impl From<images::Model> for Image {
    fn from(m: images::Model) -> Self {
        Self {
            id: m.id,
            url: m.url,
            caption: m.caption,
            sort_order: m.sort_order,
        }
    }
}

impl From<tags::Model> for Tag {
    fn from(m: tags::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

impl From<recipe_notes::Model> for Note {
    fn from(m: recipe_notes::Model) -> Self {
        Self {
            id: m.id,
            content: m.content,
            created_at: m.created_at,
        }
    }
}
