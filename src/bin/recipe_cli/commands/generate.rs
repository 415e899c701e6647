// ABOUTME: Generate command - builds a request from flags and runs one generation cycle
// ABOUTME: Optionally saves the resulting recipe to favorites
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

use std::sync::Arc;

use recipe_generator::errors::AppResult;
use recipe_generator::favorites::{Favorites, FileStore};
use recipe_generator::generator::RecipeGenerator;
use recipe_generator::llm::{ConfiguredProvider, RecipeProvider};
use recipe_generator::models::{IngredientEntry, RecipeRequest};
use tracing::info;

use super::ConfigOverrides;
use crate::helpers::display::{display_recipe, display_save_outcome, RecipeView};

/// Parsed `generate` flags
pub struct GenerateArgs {
    pub ingredients: Vec<IngredientEntry>,
    pub meal_type: String,
    pub diets: Vec<String>,
    pub save: bool,
    pub view: RecipeView,
}

/// Parse "name[,quantity[,unit]]"
pub fn parse_ingredient(value: &str) -> Result<IngredientEntry, String> {
    let mut parts = value.splitn(3, ',');
    let name = parts.next().unwrap_or_default();
    if name.trim().is_empty() {
        return Err("ingredient name must not be empty".to_owned());
    }
    let quantity = parts.next().map(str::to_owned);
    let unit = parts.next().map(str::to_owned);
    Ok(IngredientEntry::new(name, quantity, unit))
}

pub async fn run(overrides: &ConfigOverrides, args: GenerateArgs) -> AppResult<()> {
    // Reject bad input before touching configuration or the network
    let request = RecipeRequest::from_labels(args.ingredients, &args.meal_type, &args.diets)?;

    let config = overrides.recipe_config()?;
    let provider = ConfiguredProvider::from_config(&config.llm)?;
    info!(
        provider = provider.display_name(),
        model = provider.default_model(),
        "Generating recipe"
    );

    let generator = RecipeGenerator::new(Arc::new(provider));
    let recipe = generator.generate(&request).await?;

    display_recipe(&recipe, args.view)?;

    if args.save {
        let mut favorites = Favorites::load(FileStore::new(&config.data_dir));
        let added = favorites.add(recipe.clone())?;
        display_save_outcome(&recipe.recipe_name, added);
    }
    Ok(())
}
