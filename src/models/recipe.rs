use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque recipe identifier.
///
/// New ids are random UUIDs, but any string read back from storage is
/// accepted as-is so collections written by older builds keep their ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecipeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub ingredients: String,
    pub preparation_method: String,
}

impl Recipe {
    pub fn new(
        title: impl Into<String>,
        ingredients: impl Into<String>,
        preparation_method: impl Into<String>,
    ) -> Self {
        Self {
            id: RecipeId::generate(),
            title: title.into(),
            ingredients: ingredients.into(),
            preparation_method: preparation_method.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<RecipeId>) -> Self {
        self.id = id.into();
        self
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;

        if !self.ingredients.is_empty() {
            writeln!(f, "\nIngredients:\n{}", self.ingredients)?;
        }

        if !self.preparation_method.is_empty() {
            writeln!(f, "\nPreparation:\n{}", self.preparation_method)?;
        }

        Ok(())
    }
}
