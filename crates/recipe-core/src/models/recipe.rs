// ABOUTME: The Recipe entity produced by the response interpreter
// ABOUTME: Serialized with the provider's camelCase JSON shape, nutrition optional
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

use serde::{Deserialize, Serialize};

/// Estimated nutrition per serving, each a free-form quantity with unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrition {
    /// e.g. "350 kcal"
    pub calories: String,
    /// e.g. "15g"
    pub protein: String,
    /// e.g. "40g"
    pub carbs: String,
    /// e.g. "12g"
    pub fat: String,
}

/// A generated recipe
///
/// `recipe_name` is the natural key inside a favorites collection. Times and
/// servings are descriptive strings and are never parsed. Field contents are
/// kept exactly as the provider produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Name of the dish
    pub recipe_name: String,
    /// Short appetizing description
    pub description: String,
    /// How many people it serves
    pub servings: String,
    /// Preparation time, e.g. "15 minutes"
    pub prep_time: String,
    /// Cooking time, e.g. "30 minutes"
    pub cook_time: String,
    /// Ingredient phrases with quantities
    pub ingredients: Vec<String>,
    /// Ordered steps
    pub instructions: Vec<String>,
    /// Nutrition estimate, when the provider supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
}

impl Recipe {
    /// Whether nutrition data is available for rendering
    #[must_use]
    pub const fn has_nutrition(&self) -> bool {
        self.nutrition.is_some()
    }
}
