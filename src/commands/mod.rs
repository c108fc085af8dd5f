use clap::ValueEnum;

mod config_cmd;
mod recipe;

pub use config_cmd::ConfigCommand;
pub use recipe::RecipeCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
