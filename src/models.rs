// ABOUTME: Core data models for the recipe generator
// ABOUTME: Re-exports Recipe, Nutrition, RecipeRequest and the label catalogs from recipe-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

//! # Data Models
//!
//! - `RecipeRequest`: validated input of one generation cycle
//! - `Recipe`: the generated result, persisted verbatim when favorited
//! - `MealType`, `DietaryRestriction`, `COMMON_UNITS`: fixed label catalogs

pub use recipe_core::models::{
    DietaryRestriction, IngredientEntry, MealType, Nutrition, Recipe, RecipeRequest, COMMON_UNITS,
};
