mod persist;
mod recipe_store;

pub use recipe_store::RecipeStore;

use crate::models::RecipeId;

/// Reasons a mutation was rejected. The collection is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeError {
    #[error("Recipe title cannot be empty")]
    EmptyTitle,
    #[error("Recipe not found: {0}")]
    NotFound(RecipeId),
}

/// What [`RecipeStore::load`] found in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing saved yet.
    Missing,
    /// Collection restored with this many recipes.
    Loaded(usize),
    /// Saved data could not be decoded; started empty.
    Corrupt,
    /// Backend could not be read; started empty.
    Unavailable,
}
