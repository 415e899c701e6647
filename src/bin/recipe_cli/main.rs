// ABOUTME: Recipe generator CLI - terminal front end for generating and saving recipes
// ABOUTME: Parses commands, installs logging, and maps failures to process exit codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors
//!
//! Usage:
//! ```bash
//! # Generate a dinner recipe from what is in the fridge
//! recipe-generator generate -i "rice,2,cup(s)" -i onion -i "chicken breast,500,g"
//!
//! # Vegan lunch with Groq, saved to favorites
//! recipe-generator generate -i tofu -i spinach --meal-type lunch --diet vegan \
//!     --provider groq --save
//!
//! # Print the share text instead of the full view
//! recipe-generator generate -i eggs --meal-type breakfast --share
//!
//! # Manage favorites
//! recipe-generator favorites list
//! recipe-generator favorites show "Garlic Fried Rice"
//! recipe-generator favorites remove "Garlic Fried Rice"
//!
//! # Show meal types, dietary restrictions and units
//! recipe-generator catalog
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use recipe_generator::errors::AppResult;
use recipe_generator::logging::LoggingConfig;
use recipe_generator::models::IngredientEntry;
use tracing::debug;

use commands::generate::{parse_ingredient, GenerateArgs};
use commands::ConfigOverrides;

#[derive(Parser)]
#[command(
    name = "recipe-generator",
    version,
    about = "Turn the ingredients you have into a recipe",
    long_about = "Generates a complete recipe from your ingredients, meal type and dietary restrictions using an LLM provider, and keeps your favorite recipes locally."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Favorites directory override (defaults to RECIPE_DATA_DIR or the platform data directory)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Generate a recipe
    Generate {
        /// Ingredient as "name[,quantity[,unit]]" (repeatable)
        #[arg(long = "ingredient", short = 'i', value_parser = parse_ingredient)]
        ingredients: Vec<IngredientEntry>,

        /// Meal type (Breakfast, Lunch, Dinner, Snack, Dessert)
        #[arg(long, short = 'm', default_value = "Dinner")]
        meal_type: String,

        /// Dietary restriction (repeatable, e.g. "Gluten-Free")
        #[arg(long = "diet", short = 'd')]
        diets: Vec<String>,

        /// LLM provider override (gemini, openai, groq, local, ollama)
        #[arg(long)]
        provider: Option<String>,

        /// Model override
        #[arg(long)]
        model: Option<String>,

        /// Save the recipe to favorites
        #[arg(long)]
        save: bool,

        /// Print the plain share text
        #[arg(long, conflicts_with = "json")]
        share: bool,

        /// Print the recipe as JSON
        #[arg(long)]
        json: bool,
    },

    /// Favorite recipes
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },

    /// List meal types, dietary restrictions, units and providers
    Catalog,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum FavoritesCommand {
    /// List saved recipe names
    List,

    /// Show a saved recipe
    Show {
        /// Recipe name
        name: String,

        /// Print the plain share text
        #[arg(long, conflicts_with = "json")]
        share: bool,

        /// Print the recipe as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a saved recipe
    Remove {
        /// Recipe name
        name: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = LoggingConfig::from_env().with_verbose(cli.verbose).init() {
        eprintln!("Warning: logging disabled: {e}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            debug!(code = ?error.code, "Command failed");
            eprintln!("Error: {}", error.message);
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let mut overrides = ConfigOverrides {
        data_dir: cli.data_dir,
        ..ConfigOverrides::default()
    };

    match cli.command {
        Command::Generate {
            ingredients,
            meal_type,
            diets,
            provider,
            model,
            save,
            share,
            json,
        } => {
            overrides.provider = provider;
            overrides.model = model;
            let args = GenerateArgs {
                ingredients,
                meal_type,
                diets,
                save,
                view: helpers::display::RecipeView::from_flags(share, json),
            };
            commands::generate::run(&overrides, args).await
        }
        Command::Favorites { action } => match action {
            FavoritesCommand::List => commands::favorites::list(&overrides),
            FavoritesCommand::Show { name, share, json } => commands::favorites::show(
                &overrides,
                &name,
                helpers::display::RecipeView::from_flags(share, json),
            ),
            FavoritesCommand::Remove { name } => commands::favorites::remove(&overrides, &name),
        },
        Command::Catalog => {
            commands::catalog::run();
            Ok(())
        }
    }
}
