//! Result-shape assembly: grouping batched child rows under their recipe.

use std::collections::HashMap;

use crate::domain::RecipeId;
use crate::models::recipe::{HydratedRecipe, Image, Ingredient, Instruction, Recipe, Tag};

/// Child rows fetched for one page, each paired with its owning recipe and
/// already in display order.
#[derive(Debug, Default)]
pub struct ChildRows {
    pub ingredients: Vec<(RecipeId, Ingredient)>,
    pub instructions: Vec<(RecipeId, Instruction)>,
    pub tags: Vec<(RecipeId, Tag)>,
    pub images: Vec<(RecipeId, Image)>,
}

/// Groups rows by recipe, preserving the relative order of each group.
#[must_use]
pub fn group_by_recipe<T>(rows: Vec<(RecipeId, T)>) -> HashMap<RecipeId, Vec<T>> {
    let mut grouped: HashMap<RecipeId, Vec<T>> = HashMap::new();
    for (id, row) in rows {
        grouped.entry(id).or_default().push(row);
    }
    grouped
}

/// Attaches child rows to the page in page order. Recipes without rows of
/// a kind get an empty list.
#[must_use]
pub fn assemble(page: Vec<Recipe>, children: ChildRows) -> Vec<HydratedRecipe> {
    let mut ingredients = group_by_recipe(children.ingredients);
    let mut instructions = group_by_recipe(children.instructions);
    let mut tags = group_by_recipe(children.tags);
    let mut images = group_by_recipe(children.images);

    page.into_iter()
        .map(|recipe| {
            let id = recipe.id;
            HydratedRecipe {
                recipe,
                ingredients: ingredients.remove(&id).unwrap_or_default(),
                instructions: instructions.remove(&id).unwrap_or_default(),
                tags: tags.remove(&id).unwrap_or_default(),
                images: images.remove(&id).unwrap_or_default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: i32) -> Recipe {
        Recipe {
            id: RecipeId::new(id),
            owner_id: "owner".to_string(),
            title: format!("Recipe {id}"),
            description: None,
            servings: None,
            prep_time: None,
            cook_time: None,
            difficulty: None,
            cuisine: None,
            is_public: true,
            is_archived: false,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    fn step(id: i32, n: i32) -> Instruction {
        Instruction {
            id,
            step_number: n,
            content: format!("step {n}"),
        }
    }

    #[test]
    fn groups_preserve_row_order() {
        let rows = vec![
            (RecipeId::new(1), "a"),
            (RecipeId::new(2), "x"),
            (RecipeId::new(1), "b"),
        ];
        let grouped = group_by_recipe(rows);
        assert_eq!(grouped[&RecipeId::new(1)], vec!["a", "b"]);
        assert_eq!(grouped[&RecipeId::new(2)], vec!["x"]);
    }

    #[test]
    fn assemble_keeps_page_order_and_defaults_to_empty() {
        let children = ChildRows {
            instructions: vec![
                (RecipeId::new(2), step(10, 1)),
                (RecipeId::new(2), step(11, 2)),
            ],
            tags: vec![(
                RecipeId::new(1),
                Tag {
                    id: 1,
                    name: "dessert".to_string(),
                },
            )],
            ..ChildRows::default()
        };

        let hydrated = assemble(vec![recipe(2), recipe(1), recipe(3)], children);

        let order: Vec<i32> = hydrated.iter().map(|r| r.recipe.id.value()).collect();
        assert_eq!(order, vec![2, 1, 3]);
        assert_eq!(hydrated[0].instructions, vec![step(10, 1), step(11, 2)]);
        assert!(hydrated[1].has_tag("dessert"));
        assert!(hydrated[2].ingredients.is_empty());
        assert!(hydrated[2].instructions.is_empty());
        assert!(hydrated[2].tags.is_empty());
        assert!(hydrated[2].images.is_empty());
    }
}
