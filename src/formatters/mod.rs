// ABOUTME: Plain-text and JSON rendering of recipes for sharing and terminal display
// ABOUTME: Share text mirrors the copy-to-clipboard layout; terminal text adds nutrition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

//! Recipe Rendering
//!
//! - **Share text**: name, description, servings and times, bulleted
//!   ingredients and numbered instructions, ready to paste anywhere
//! - **Terminal text**: share text plus a nutrition section when present
//! - **JSON**: the recipe in the provider's camelCase shape
//!
//! ## Usage
//!
//! ```rust
//! use recipe_generator::formatters::{format_recipe, OutputFormat};
//! use recipe_generator::models::Recipe;
//!
//! let recipe = Recipe {
//!     recipe_name: "Toast".to_owned(),
//!     description: "Crunchy bread".to_owned(),
//!     servings: "1".to_owned(),
//!     prep_time: "1 minute".to_owned(),
//!     cook_time: "3 minutes".to_owned(),
//!     ingredients: vec!["1 slice bread".to_owned()],
//!     instructions: vec!["Toast the bread.".to_owned()],
//!     nutrition: None,
//! };
//! let text = format_recipe(&recipe, OutputFormat::Text).unwrap();
//! assert!(text.starts_with("Recipe: Toast"));
//! ```

use std::fmt::{self, Write};

use crate::errors::{serialization_error, AppResult};
use crate::models::Recipe;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Render a recipe in the requested format
///
/// # Errors
///
/// Returns a serialization error if JSON encoding fails.
pub fn format_recipe(recipe: &Recipe, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Text => Ok(render_recipe(recipe)),
        OutputFormat::Json => serde_json::to_string_pretty(recipe)
            .map_err(|e| serialization_error("Failed to encode recipe", e)),
    }
}

/// Plain text for sharing a recipe
#[must_use]
pub fn share_text(recipe: &Recipe) -> String {
    let mut text = String::new();
    // Writing to a String cannot fail
    let _ = write_share_text(&mut text, recipe);
    text.trim().to_owned()
}

/// Share text plus nutrition, for terminal display
#[must_use]
pub fn render_recipe(recipe: &Recipe) -> String {
    let mut text = share_text(recipe);
    if let Some(nutrition) = &recipe.nutrition {
        let _ = write!(
            text,
            "\n\nNutrition (per serving):\n\
             - Calories: {}\n\
             - Protein: {}\n\
             - Carbs: {}\n\
             - Fat: {}",
            nutrition.calories, nutrition.protein, nutrition.carbs, nutrition.fat
        );
    }
    text
}

fn write_share_text(out: &mut String, recipe: &Recipe) -> fmt::Result {
    writeln!(out, "Recipe: {}", recipe.recipe_name)?;
    writeln!(out)?;
    writeln!(out, "{}", recipe.description)?;
    writeln!(out)?;
    writeln!(out, "Servings: {}", recipe.servings)?;
    writeln!(out, "Prep time: {}", recipe.prep_time)?;
    writeln!(out, "Cook time: {}", recipe.cook_time)?;
    writeln!(out)?;

    writeln!(out, "Ingredients:")?;
    for ingredient in &recipe.ingredients {
        writeln!(out, "- {ingredient}")?;
    }
    writeln!(out)?;

    writeln!(out, "Instructions:")?;
    for (step, instruction) in recipe.instructions.iter().enumerate() {
        writeln!(out, "{}. {instruction}", step + 1)?;
    }
    Ok(())
}
