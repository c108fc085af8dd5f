use std::sync::Arc;

use super::persist::PersistQueue;
use super::{LoadOutcome, RecipeError};
use crate::models::{Recipe, RecipeId};
use crate::storage::{StorageAdapter, RECIPES_KEY};

/// Owner of the recipe collection.
///
/// Every successful mutation queues a full snapshot of the collection for
/// the persist worker and returns without waiting for it. Storage failures
/// are logged and never undo the in-memory change.
pub struct RecipeStore {
    recipes: Vec<Recipe>,
    storage: Arc<dyn StorageAdapter>,
    persist: PersistQueue,
}

impl RecipeStore {
    /// Starts the persist worker and hydrates the collection from `storage`.
    pub async fn open(storage: Arc<dyn StorageAdapter>) -> Self {
        let persist = PersistQueue::spawn(storage.clone());
        let mut store = Self {
            recipes: Vec::new(),
            storage,
            persist,
        };
        store.load().await;
        store
    }

    /// Replaces the collection with whatever is saved under [`RECIPES_KEY`].
    ///
    /// Missing, unreadable, or undecodable data all leave the collection
    /// empty.
    pub async fn load(&mut self) -> LoadOutcome {
        // Let queued writes land first so we read our own latest state
        self.persist.flush().await;

        let (recipes, outcome) = match self.storage.get(RECIPES_KEY).await {
            Ok(None) => {
                tracing::info!("No saved recipes found, starting with 0 recipes");
                (Vec::new(), LoadOutcome::Missing)
            }
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Recipe>>(&raw) {
                Ok(recipes) => {
                    tracing::info!("Loaded {} recipe(s)", recipes.len());
                    let count = recipes.len();
                    (recipes, LoadOutcome::Loaded(count))
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to decode saved recipes ({} bytes), starting empty: {}",
                        raw.len(),
                        e
                    );
                    (Vec::new(), LoadOutcome::Corrupt)
                }
            },
            Err(e) => {
                tracing::error!("Failed to load recipes: {}", e);
                (Vec::new(), LoadOutcome::Unavailable)
            }
        };

        self.recipes = recipes;
        outcome
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: &RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| &r.id == id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Appends a new recipe with all fields trimmed.
    pub fn create(
        &mut self,
        title: &str,
        ingredients: &str,
        preparation_method: &str,
    ) -> Result<RecipeId, RecipeError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(RecipeError::EmptyTitle);
        }

        let recipe = Recipe::new(title, ingredients.trim(), preparation_method.trim());
        let id = recipe.id.clone();
        tracing::debug!("Created recipe {} ({})", id, recipe.title);

        self.recipes.push(recipe);
        self.persist();
        Ok(id)
    }

    /// Replaces the content of an existing recipe, keeping its id and position.
    pub fn update(
        &mut self,
        id: &RecipeId,
        title: &str,
        ingredients: &str,
        preparation_method: &str,
    ) -> Result<(), RecipeError> {
        if title.trim().is_empty() {
            return Err(RecipeError::EmptyTitle);
        }

        let recipe = self
            .recipes
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| RecipeError::NotFound(id.clone()))?;

        recipe.title = title.to_string();
        recipe.ingredients = ingredients.to_string();
        recipe.preparation_method = preparation_method.to_string();
        tracing::debug!("Updated recipe {}", id);

        self.persist();
        Ok(())
    }

    /// Returns whether a recipe was removed.
    pub fn delete(&mut self, id: &RecipeId) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|r| &r.id != id);
        if self.recipes.len() == before {
            tracing::debug!("Delete ignored, no recipe {}", id);
            return false;
        }

        tracing::debug!("Deleted recipe {}", id);
        self.persist();
        true
    }

    /// Drops every recipe and removes the saved collection.
    pub fn clear(&mut self) {
        self.recipes.clear();
        tracing::debug!("Cleared all recipes");
        self.persist.remove();
    }

    /// Waits for all queued persists to reach storage.
    pub async fn flush(&self) {
        self.persist.flush().await;
    }

    fn persist(&self) {
        match serde_json::to_string(&self.recipes) {
            Ok(snapshot) => self.persist.write(snapshot),
            Err(e) => tracing::error!("Failed to serialize recipes: {}", e),
        }
    }
}
