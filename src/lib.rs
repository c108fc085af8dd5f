//! Recipe Book
//!
//! A personal recipe collection kept in memory and mirrored to local
//! storage after every change.

pub mod models;
pub mod storage;
pub mod store;
pub mod view;

pub use models::{Recipe, RecipeId};
pub use storage::{for_platform, MemoryStorage, Platform, StorageAdapter, StorageError, RECIPES_KEY};
pub use store::{LoadOutcome, RecipeError, RecipeStore};
pub use view::{Confirm, DeleteOutcome, Mode, ViewController, ViewError, ViewState};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
