// ABOUTME: Output formatting helpers for recipe-generator
// ABOUTME: Prints recipes, favorites and catalogs consistently on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

use recipe_generator::errors::AppResult;
use recipe_generator::favorites::FavoritesCollection;
use recipe_generator::formatters::{format_recipe, share_text, OutputFormat};
use recipe_generator::models::Recipe;

/// How a recipe is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeView {
    /// Full terminal view, nutrition included
    Full,
    /// Plain share text
    Share,
    /// JSON
    Json,
}

impl RecipeView {
    pub const fn from_flags(share: bool, json: bool) -> Self {
        if json {
            Self::Json
        } else if share {
            Self::Share
        } else {
            Self::Full
        }
    }
}

pub fn display_recipe(recipe: &Recipe, view: RecipeView) -> AppResult<()> {
    let text = match view {
        RecipeView::Full => format_recipe(recipe, OutputFormat::Text)?,
        RecipeView::Share => share_text(recipe),
        RecipeView::Json => format_recipe(recipe, OutputFormat::Json)?,
    };
    println!("{text}");
    Ok(())
}

pub fn display_save_outcome(recipe_name: &str, added: bool) {
    if added {
        println!("\nSaved '{recipe_name}' to favorites.");
    } else {
        println!("\n'{recipe_name}' is already in your favorites.");
    }
}

pub fn display_favorites(favorites: &FavoritesCollection) {
    if favorites.is_empty() {
        println!("No favorite recipes yet. Use `generate --save` to keep one.");
        return;
    }
    println!("Favorite recipes ({}):", favorites.len());
    println!("{}", "=".repeat(40));
    for (index, recipe) in favorites.iter().enumerate() {
        println!("{:>3}. {}", index + 1, recipe.recipe_name);
    }
}

pub fn display_list<'a>(title: &str, items: impl Iterator<Item = &'a str>) {
    println!("{title}:");
    for item in items {
        println!("  - {item}");
    }
    println!();
}
