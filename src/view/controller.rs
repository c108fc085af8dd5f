use super::{Confirm, Mode, ViewError};
use crate::models::{Recipe, RecipeId};
use crate::store::{RecipeError, RecipeStore};

/// Working copy of the form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub ingredients: String,
    pub preparation_method: String,
}

/// Transient UI state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub mode: Mode,
    pub form: FormFields,
    pub editing_id: Option<RecipeId>,
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
    /// Confirmed, but the recipe was already gone.
    Missing,
}

/// Switches between the recipe list and the add/edit form and forwards
/// submitted forms to the [`RecipeStore`].
#[derive(Debug, Default)]
pub struct ViewController {
    state: ViewState,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn form(&self) -> &FormFields {
        &self.state.form
    }

    pub fn editing_id(&self) -> Option<&RecipeId> {
        self.state.editing_id.as_ref()
    }

    pub fn form_heading(&self) -> &'static str {
        if self.state.editing_id.is_some() {
            "Edit Recipe"
        } else {
            "Add Recipe"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.state.editing_id.is_some() {
            "Update"
        } else {
            "Save"
        }
    }

    /// Opens an empty form for a new recipe.
    pub fn start_add(&mut self) -> Result<(), ViewError> {
        self.require(Mode::List, "start add")?;
        self.state = ViewState {
            mode: Mode::Form,
            ..ViewState::default()
        };
        Ok(())
    }

    /// Opens the form pre-filled with `recipe`.
    pub fn start_edit(&mut self, recipe: &Recipe) -> Result<(), ViewError> {
        self.require(Mode::List, "start edit")?;
        self.state = ViewState {
            mode: Mode::Form,
            form: FormFields {
                title: recipe.title.clone(),
                ingredients: recipe.ingredients.clone(),
                preparation_method: recipe.preparation_method.clone(),
            },
            editing_id: Some(recipe.id.clone()),
        };
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), ViewError> {
        self.require(Mode::Form, "edit title")?;
        self.state.form.title = title.into();
        Ok(())
    }

    pub fn set_ingredients(&mut self, ingredients: impl Into<String>) -> Result<(), ViewError> {
        self.require(Mode::Form, "edit ingredients")?;
        self.state.form.ingredients = ingredients.into();
        Ok(())
    }

    pub fn set_preparation_method(
        &mut self,
        preparation_method: impl Into<String>,
    ) -> Result<(), ViewError> {
        self.require(Mode::Form, "edit preparation method")?;
        self.state.form.preparation_method = preparation_method.into();
        Ok(())
    }

    /// Leaves the form without touching the store.
    pub fn cancel(&mut self) -> Result<(), ViewError> {
        self.require(Mode::Form, "cancel")?;
        self.state = ViewState::default();
        Ok(())
    }

    /// Saves the form and returns to the list.
    ///
    /// The form is reset whether or not the store accepted it; the store's
    /// verdict is handed back as the inner result.
    pub fn submit(
        &mut self,
        store: &mut RecipeStore,
    ) -> Result<Result<RecipeId, RecipeError>, ViewError> {
        self.require(Mode::Form, "submit")?;
        let ViewState {
            form, editing_id, ..
        } = std::mem::take(&mut self.state);

        let result = match editing_id {
            Some(id) => store
                .update(
                    &id,
                    &form.title,
                    &form.ingredients,
                    &form.preparation_method,
                )
                .map(|()| id),
            None => store.create(&form.title, &form.ingredients, &form.preparation_method),
        };

        if let Err(e) = &result {
            tracing::debug!("Form submission rejected: {}", e);
        }
        Ok(result)
    }

    /// Deletes `recipe` once `confirm` accepts. Stays on the list.
    pub fn delete(
        &mut self,
        store: &mut RecipeStore,
        recipe: &Recipe,
        confirm: &dyn Confirm,
    ) -> Result<DeleteOutcome, ViewError> {
        self.require(Mode::List, "delete")?;

        let message = format!(
            "Are you sure you want to delete the recipe \"{}\"?",
            recipe.title
        );
        if !confirm.confirm("Delete Recipe", &message) {
            return Ok(DeleteOutcome::Declined);
        }

        if store.delete(&recipe.id) {
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Missing)
        }
    }

    fn require(&self, expected: Mode, action: &'static str) -> Result<(), ViewError> {
        if self.state.mode == expected {
            return Ok(());
        }
        tracing::warn!("Ignoring '{}' while in {:?} mode", action, self.state.mode);
        Err(ViewError::InvalidTransition {
            from: self.state.mode,
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::cell::Cell;
    use std::sync::Arc;

    async fn empty_store() -> RecipeStore {
        RecipeStore::open(Arc::new(MemoryStorage::new())).await
    }

    #[tokio::test]
    async fn test_add_flow() {
        let mut store = empty_store().await;
        let mut view = ViewController::new();
        assert_eq!(view.mode(), Mode::List);

        view.start_add().unwrap();
        assert_eq!(view.mode(), Mode::Form);
        assert_eq!(view.form_heading(), "Add Recipe");
        assert_eq!(view.submit_label(), "Save");

        view.set_title("Bolo").unwrap();
        view.set_ingredients("Farinha, Ovos").unwrap();
        view.set_preparation_method("Misture e asse").unwrap();
        let id = view.submit(&mut store).unwrap().unwrap();

        assert_eq!(view.state(), &ViewState::default());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().title, "Bolo");
    }

    #[tokio::test]
    async fn test_start_add_clears_leftover_fields() {
        let mut store = empty_store().await;
        store.create("Bolo", "a", "b").unwrap();
        let recipe = store.recipes()[0].clone();

        let mut view = ViewController::new();
        view.start_edit(&recipe).unwrap();
        view.cancel().unwrap();
        view.start_add().unwrap();

        assert_eq!(view.form(), &FormFields::default());
        assert!(view.editing_id().is_none());
    }

    #[tokio::test]
    async fn test_edit_flow() {
        let mut store = empty_store().await;
        let id = store.create("Bolo", "Farinha", "Asse").unwrap();
        let recipe = store.get(&id).unwrap().clone();

        let mut view = ViewController::new();
        view.start_edit(&recipe).unwrap();
        assert_eq!(view.editing_id(), Some(&id));
        assert_eq!(view.form().title, "Bolo");
        assert_eq!(view.form_heading(), "Edit Recipe");
        assert_eq!(view.submit_label(), "Update");

        view.set_title("Bolo de Chocolate").unwrap();
        assert_eq!(view.submit(&mut store).unwrap(), Ok(id.clone()));

        assert_eq!(view.mode(), Mode::List);
        assert!(view.editing_id().is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().title, "Bolo de Chocolate");
        assert_eq!(store.get(&id).unwrap().ingredients, "Farinha");
    }

    #[tokio::test]
    async fn test_submit_blank_title_resets_form_without_mutation() {
        let mut store = empty_store().await;
        let mut view = ViewController::new();

        view.start_add().unwrap();
        view.set_title("   ").unwrap();
        view.set_ingredients("Leite").unwrap();

        assert_eq!(
            view.submit(&mut store).unwrap(),
            Err(RecipeError::EmptyTitle)
        );
        assert_eq!(view.state(), &ViewState::default());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_submit_edit_of_deleted_recipe() {
        let mut store = empty_store().await;
        let id = store.create("Bolo", "", "").unwrap();
        let recipe = store.get(&id).unwrap().clone();

        let mut view = ViewController::new();
        view.start_edit(&recipe).unwrap();
        store.delete(&id);

        assert_eq!(
            view.submit(&mut store).unwrap(),
            Err(RecipeError::NotFound(id))
        );
        assert!(store.is_empty());
        assert_eq!(view.mode(), Mode::List);
    }

    #[tokio::test]
    async fn test_cancel_discards_changes() {
        let mut store = empty_store().await;
        let id = store.create("Bolo", "", "").unwrap();
        let recipe = store.get(&id).unwrap().clone();

        let mut view = ViewController::new();
        view.start_edit(&recipe).unwrap();
        view.set_title("Something else").unwrap();
        view.cancel().unwrap();

        assert_eq!(view.state(), &ViewState::default());
        assert_eq!(store.get(&id).unwrap().title, "Bolo");
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let mut store = empty_store().await;
        let id = store.create("Bolo", "", "").unwrap();
        let recipe = store.get(&id).unwrap().clone();
        let mut view = ViewController::new();

        let asked = Cell::new(String::new());
        let decline = |title: &str, message: &str| {
            asked.set(format!("{}: {}", title, message));
            false
        };
        assert_eq!(
            view.delete(&mut store, &recipe, &decline).unwrap(),
            DeleteOutcome::Declined
        );
        assert_eq!(
            asked.take(),
            "Delete Recipe: Are you sure you want to delete the recipe \"Bolo\"?"
        );
        assert_eq!(store.len(), 1);

        let accept = |_: &str, _: &str| true;
        assert_eq!(
            view.delete(&mut store, &recipe, &accept).unwrap(),
            DeleteOutcome::Deleted
        );
        assert!(store.is_empty());
        assert_eq!(view.mode(), Mode::List);

        assert_eq!(
            view.delete(&mut store, &recipe, &accept).unwrap(),
            DeleteOutcome::Missing
        );
    }

    #[tokio::test]
    async fn test_invalid_transitions_are_rejected() {
        let mut store = empty_store().await;
        let mut view = ViewController::new();

        assert_eq!(
            view.submit(&mut store),
            Err(ViewError::InvalidTransition {
                from: Mode::List,
                action: "submit",
            })
        );
        assert!(view.cancel().is_err());
        assert!(view.set_title("x").is_err());

        view.start_add().unwrap();
        assert!(view.start_add().is_err());
        let recipe = Recipe::new("Bolo", "", "");
        assert!(view
            .delete(&mut store, &recipe, &|_: &str, _: &str| true)
            .is_err());
        assert_eq!(view.mode(), Mode::Form);
        assert!(store.is_empty());
    }
}
