// ABOUTME: Ordered set of saved recipes keyed by recipe name
// ABOUTME: Add and remove are no-ops on duplicates and unknown names; serialized as a JSON array
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

use std::slice::Iter;

use serde::Serialize;

use crate::errors::{serialization_error, AppResult};
use crate::models::Recipe;

/// Saved recipes in insertion order, unique by `recipe_name`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FavoritesCollection {
    recipes: Vec<Recipe>,
}

impl FavoritesCollection {
    /// Empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self {
            recipes: Vec::new(),
        }
    }

    /// Build from recipes, keeping the first of any duplicate names
    #[must_use]
    pub fn from_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let mut collection = Self::new();
        for recipe in recipes {
            collection.add(recipe);
        }
        collection
    }

    /// Append a recipe unless one with the same name is already saved
    ///
    /// Returns whether the collection changed.
    pub fn add(&mut self, recipe: Recipe) -> bool {
        if self.contains(&recipe.recipe_name) {
            return false;
        }
        self.recipes.push(recipe);
        true
    }

    /// Remove the recipe with this name, if any
    ///
    /// Returns whether the collection changed.
    pub fn remove(&mut self, recipe_name: &str) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|recipe| recipe.recipe_name != recipe_name);
        self.recipes.len() != before
    }

    /// Whether a recipe with this name is saved
    #[must_use]
    pub fn contains(&self, recipe_name: &str) -> bool {
        self.get(recipe_name).is_some()
    }

    /// The saved recipe with this name
    #[must_use]
    pub fn get(&self, recipe_name: &str) -> Option<&Recipe> {
        self.recipes
            .iter()
            .find(|recipe| recipe.recipe_name == recipe_name)
    }

    /// Recipes in insertion order
    pub fn iter(&self) -> Iter<'_, Recipe> {
        self.recipes.iter()
    }

    /// Number of saved recipes
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether nothing is saved
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Serialize as a JSON array of recipes
    ///
    /// # Errors
    ///
    /// Returns a serialization error if a recipe cannot be encoded.
    pub fn to_json(&self) -> AppResult<String> {
        serde_json::to_string(&self.recipes)
            .map_err(|e| serialization_error("Failed to encode favorites", e))
    }

    /// Parse a JSON array of recipes
    ///
    /// Duplicate names collapse to the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the text is not a recipe array.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)
            .map_err(|e| serialization_error("Failed to decode favorites", e))?;
        Ok(Self::from_recipes(recipes))
    }
}

impl<'a> IntoIterator for &'a FavoritesCollection {
    type Item = &'a Recipe;
    type IntoIter = Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
