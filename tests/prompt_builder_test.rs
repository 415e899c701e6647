// ABOUTME: Integration tests for prompt construction from recipe requests
// ABOUTME: Checks determinism, ingredient phrasing, dietary sentences and the required field list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::sample_request;
use recipe_generator::constants::generation::STAPLE_INGREDIENTS;
use recipe_generator::models::{DietaryRestriction, IngredientEntry, MealType, RecipeRequest};
use recipe_generator::prompts::{
    PromptBuilder, SchemaDescriptor, CHEF_PERSONA, NO_RESTRICTIONS_SENTENCE,
};

#[test]
fn test_identical_requests_yield_identical_prompts() {
    let first = PromptBuilder::build(&sample_request());
    let second = PromptBuilder::build(&sample_request());
    assert_eq!(first, second);
}

#[test]
fn test_ingredient_phrases_in_input_order() {
    let prompt = PromptBuilder::build(&sample_request());
    assert!(prompt
        .instruction_text
        .contains("The main ingredients available are: 2 cup(s) rice, 1 unit(s) onion."));
}

#[test]
fn test_blank_ingredients_are_dropped() {
    let request = RecipeRequest::new(
        [
            IngredientEntry::named("  "),
            IngredientEntry::new("tofu", None, Some("g".to_owned())),
        ],
        MealType::Lunch,
        [],
    )
    .unwrap();

    let prompt = PromptBuilder::build(&request);
    assert!(prompt
        .instruction_text
        .contains("The main ingredients available are: g tofu."));
    assert!(prompt.instruction_text.contains("\"Lunch\" meal"));
}

#[test]
fn test_no_restrictions_sentence() {
    let prompt = PromptBuilder::build(&sample_request());
    assert!(prompt.instruction_text.contains(NO_RESTRICTIONS_SENTENCE));
    assert!(!prompt.instruction_text.contains("must follow"));
}

#[test]
fn test_restrictions_listed_in_catalog_order() {
    let request = RecipeRequest::new(
        [IngredientEntry::named("lentils")],
        MealType::Dinner,
        [
            DietaryRestriction::Keto,
            DietaryRestriction::Vegan,
            DietaryRestriction::GlutenFree,
            DietaryRestriction::Vegan,
        ],
    )
    .unwrap();

    let prompt = PromptBuilder::build(&request);
    assert!(prompt
        .instruction_text
        .contains("The recipe must follow these dietary restrictions: Vegan, Gluten-Free, Keto."));
    assert!(!prompt.instruction_text.contains(NO_RESTRICTIONS_SENTENCE));
}

#[test]
fn test_staples_and_persona() {
    let prompt = PromptBuilder::build(&sample_request());
    assert_eq!(prompt.system_text, CHEF_PERSONA);
    assert!(prompt
        .instruction_text
        .contains(&STAPLE_INGREDIENTS.join(", ")));
    assert!(prompt.combined_text().starts_with(CHEF_PERSONA));
    assert!(prompt.combined_text().ends_with(&prompt.instruction_text));
}

#[test]
fn test_every_schema_field_is_named() {
    let prompt = PromptBuilder::build(&sample_request());
    for name in SchemaDescriptor::recipe().field_names() {
        assert!(
            prompt.instruction_text.contains(&format!("- \"{name}\"")),
            "field {name} missing from prompt"
        );
    }
    assert!(prompt.instruction_text.contains("single JSON object only"));
    assert_eq!(prompt.output_schema, SchemaDescriptor::recipe());
}

#[test]
fn test_labels_from_free_text_are_normalized() {
    let request =
        RecipeRequest::from_ingredients_text("eggs, spinach", "breakfast", &["gluten free"])
            .unwrap();
    assert_eq!(request.meal_type(), MealType::Breakfast);

    let prompt = PromptBuilder::build(&request);
    assert!(prompt.instruction_text.contains("eggs, spinach"));
    assert!(prompt.instruction_text.contains("Gluten-Free"));
}
