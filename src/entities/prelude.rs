pub use super::images::Entity as Images;
pub use super::ingredients::Entity as Ingredients;
pub use super::instructions::Entity as Instructions;
pub use super::recipe_notes::Entity as RecipeNotes;
pub use super::recipe_tags::Entity as RecipeTags;
pub use super::recipes::Entity as Recipes;
pub use super::tags::Entity as Tags;
