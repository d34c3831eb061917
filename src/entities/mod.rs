pub mod prelude;

pub mod images;
pub mod ingredients;
pub mod instructions;
pub mod recipe_notes;
pub mod recipe_tags;
pub mod recipes;
pub mod tags;
