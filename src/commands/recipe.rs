use clap::Subcommand;

use recipe_book::view::{AssumeYes, Confirm, DeleteOutcome, TerminalConfirm};
use recipe_book::{Recipe, RecipeId, RecipeStore, ViewController};

use super::OutputFormat;

#[derive(Subcommand)]
pub enum RecipeCommand {
    /// List all recipes
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a recipe's details
    Show {
        /// Recipe ID
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a new recipe
    Add {
        /// Title of the recipe
        title: String,

        /// Ingredient list
        #[arg(long, default_value = "")]
        ingredients: String,

        /// Preparation method
        #[arg(long, default_value = "")]
        method: String,
    },

    /// Edit an existing recipe
    Edit {
        /// Recipe ID
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New ingredient list
        #[arg(long)]
        ingredients: Option<String>,

        /// New preparation method
        #[arg(long)]
        method: Option<String>,
    },

    /// Delete a recipe
    Delete {
        /// Recipe ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Delete every recipe
    Clear {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl RecipeCommand {
    /// Returns true for commands that can change the collection.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            RecipeCommand::Add { .. }
                | RecipeCommand::Edit { .. }
                | RecipeCommand::Delete { .. }
                | RecipeCommand::Clear { .. }
        )
    }

    pub fn run(&self, store: &mut RecipeStore) -> Result<(), Box<dyn std::error::Error>> {
        let mut view = ViewController::new();

        match self {
            RecipeCommand::List { format } => {
                let recipes = store.recipes();

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(recipes)?);
                    }
                    OutputFormat::Text => {
                        if recipes.is_empty() {
                            println!("No recipes yet.");
                            return Ok(());
                        }
                        println!("{:<36}  TITLE", "ID");
                        println!("{}", "-".repeat(80));
                        for recipe in recipes {
                            println!("{:<36}  {}", recipe.id, truncate(&recipe.title, 40));
                        }
                        println!("\nTotal: {} recipe(s)", recipes.len());
                    }
                }
                Ok(())
            }

            RecipeCommand::Show { id, format } => {
                let recipe = find(store, id)?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(recipe)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", recipe);
                    }
                }
                Ok(())
            }

            RecipeCommand::Add {
                title,
                ingredients,
                method,
            } => {
                view.start_add()?;
                view.set_title(title.as_str())?;
                view.set_ingredients(ingredients.as_str())?;
                view.set_preparation_method(method.as_str())?;

                let id = view.submit(store)??;
                if let Some(created) = store.get(&id) {
                    println!("Created recipe:");
                    println!("{}", created);
                }
                Ok(())
            }

            RecipeCommand::Edit {
                id,
                title,
                ingredients,
                method,
            } => {
                if title.is_none() && ingredients.is_none() && method.is_none() {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let recipe = find(store, id)?.clone();
                view.start_edit(&recipe)?;
                if let Some(title) = title {
                    view.set_title(title.as_str())?;
                }
                if let Some(ingredients) = ingredients {
                    view.set_ingredients(ingredients.as_str())?;
                }
                if let Some(method) = method {
                    view.set_preparation_method(method.as_str())?;
                }

                let id = view.submit(store)??;
                if let Some(updated) = store.get(&id) {
                    println!("Updated recipe:");
                    println!("{}", updated);
                }
                Ok(())
            }

            RecipeCommand::Delete { id, force } => {
                let recipe = find(store, id)?.clone();
                match view.delete(store, &recipe, confirmer(*force))? {
                    DeleteOutcome::Deleted => println!("Deleted recipe: {}", recipe.title),
                    DeleteOutcome::Declined => println!("Deletion cancelled."),
                    DeleteOutcome::Missing => {
                        return Err(format!("Recipe not found: {}", id).into())
                    }
                }
                Ok(())
            }

            RecipeCommand::Clear { force } => {
                if store.is_empty() {
                    println!("No recipes yet.");
                    return Ok(());
                }

                let message = format!("Delete all {} recipe(s)?", store.len());
                if !confirmer(*force).confirm("Delete All Recipes", &message) {
                    println!("Deletion cancelled.");
                    return Ok(());
                }

                let count = store.len();
                store.clear();
                println!("Deleted {} recipe(s)", count);
                Ok(())
            }
        }
    }
}

fn find<'a>(store: &'a RecipeStore, id: &str) -> Result<&'a Recipe, Box<dyn std::error::Error>> {
    store
        .get(&RecipeId::from(id))
        .ok_or_else(|| format!("Recipe not found: {}", id).into())
}

fn confirmer(force: bool) -> &'static dyn Confirm {
    if force {
        &AssumeYes
    } else {
        &TerminalConfirm
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
