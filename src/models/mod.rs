mod recipe;

pub use recipe::{Recipe, RecipeId};
