// ABOUTME: Favorites commands - list, show and remove saved recipes
// ABOUTME: Reads and rewrites the favorites store in the configured data directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

use recipe_generator::errors::{AppError, AppResult};

use super::ConfigOverrides;
use crate::helpers::display::{display_favorites, display_recipe, RecipeView};

pub fn list(overrides: &ConfigOverrides) -> AppResult<()> {
    let favorites = overrides.favorites()?;
    display_favorites(favorites.collection());
    Ok(())
}

pub fn show(overrides: &ConfigOverrides, name: &str, view: RecipeView) -> AppResult<()> {
    let favorites = overrides.favorites()?;
    let recipe = favorites
        .get(name)
        .ok_or_else(|| AppError::not_found(format!("Favorite '{name}'")))?;
    display_recipe(recipe, view)
}

pub fn remove(overrides: &ConfigOverrides, name: &str) -> AppResult<()> {
    let mut favorites = overrides.favorites()?;
    if favorites.remove(name)? {
        println!("Removed '{name}' from favorites.");
    } else {
        println!("'{name}' is not in your favorites.");
    }
    Ok(())
}
