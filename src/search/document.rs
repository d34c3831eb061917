//! Text of a search index entry.
//!
//! The entry is a projection of the recipe and all of its text-bearing
//! children at write time; it is never edited in place.

use crate::models::recipe::{Ingredient, Instruction, Note, Recipe, Tag};

#[must_use]
pub fn build_document(
    recipe: &Recipe,
    ingredients: &[Ingredient],
    instructions: &[Instruction],
    tags: &[Tag],
    notes: &[Note],
) -> String {
    let mut parts: Vec<&str> = vec![recipe.title.as_str()];
    parts.extend(recipe.description.as_deref());
    parts.extend(recipe.cuisine.as_deref());

    for ingredient in ingredients {
        parts.push(&ingredient.name);
        parts.extend(ingredient.unit.as_deref());
        parts.extend(ingredient.notes.as_deref());
    }
    parts.extend(instructions.iter().map(|i| i.content.as_str()));
    parts.extend(tags.iter().map(|t| t.name.as_str()));
    parts.extend(notes.iter().map(|n| n.content.as_str()));

    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecipeId;

    #[test]
    fn document_concatenates_every_text_source() {
        let recipe = Recipe {
            id: RecipeId::new(1),
            owner_id: "u".to_string(),
            title: "Brownies".to_string(),
            description: Some("Fudgy".to_string()),
            servings: Some(8),
            prep_time: None,
            cook_time: None,
            difficulty: None,
            cuisine: Some("American".to_string()),
            is_public: true,
            is_archived: false,
            created_at: String::new(),
            updated_at: String::new(),
        };
        let ingredients = vec![Ingredient {
            id: 1,
            name: "cocoa".to_string(),
            quantity: Some("50".to_string()),
            unit: Some("g".to_string()),
            notes: Some("dutch processed".to_string()),
            sort_order: 0,
        }];
        let instructions = vec![Instruction {
            id: 1,
            step_number: 1,
            content: "Whisk everything".to_string(),
        }];
        let tags = vec![Tag {
            id: 1,
            name: "dessert".to_string(),
        }];
        let notes = vec![Note {
            id: 1,
            content: "  grandma's  ".to_string(),
            created_at: String::new(),
        }];

        let doc = build_document(&recipe, &ingredients, &instructions, &tags, &notes);
        assert_eq!(
            doc,
            "Brownies Fudgy American cocoa g dutch processed Whisk everything dessert grandma's"
        );
        assert!(!doc.contains("50"));
    }
}
