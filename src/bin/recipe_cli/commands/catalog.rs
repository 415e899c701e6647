// ABOUTME: Catalog command - prints the accepted meal types, restrictions, units and providers
// ABOUTME: Labels are the same ones the generate command accepts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

use recipe_generator::config::LlmProviderType;
use recipe_generator::models::{DietaryRestriction, MealType, COMMON_UNITS};

use crate::helpers::display::display_list;

pub fn run() {
    display_list("Meal types", MealType::ALL.iter().map(MealType::label));
    display_list(
        "Dietary restrictions",
        DietaryRestriction::ALL.iter().map(DietaryRestriction::label),
    );
    display_list("Units", COMMON_UNITS.iter().copied());
    display_list("Providers", LlmProviderType::ALL.iter().map(LlmProviderType::as_str));
}
