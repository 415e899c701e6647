// ABOUTME: Recipe data model shared by the generator, favorites, and CLI
// ABOUTME: Re-exports Recipe, Nutrition, RecipeRequest, and the label catalogs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

mod recipe;
mod request;

pub use recipe::{Nutrition, Recipe};
pub use request::{DietaryRestriction, IngredientEntry, MealType, RecipeRequest, COMMON_UNITS};
