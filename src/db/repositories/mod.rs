pub mod children;
pub mod recipe;
pub mod search_index;
pub mod tag;
