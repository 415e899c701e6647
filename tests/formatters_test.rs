// ABOUTME: Integration tests for recipe share text, terminal text and JSON output
// ABOUTME: Pins the exact share layout and the optional nutrition section
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{named_recipe, sample_recipe};
use recipe_generator::formatters::{format_recipe, render_recipe, share_text, OutputFormat};
use recipe_generator::interpreter::ResponseInterpreter;

#[test]
fn test_share_text_layout() {
    let expected = "\
Recipe: Garlic Fried Rice

Crispy rice tossed with golden garlic and onion.

Servings: 2 servings
Prep time: 10 minutes
Cook time: 15 minutes

Ingredients:
- 2 cup(s) cooked rice
- 1 unit(s) onion, diced
- 4 cloves garlic, minced
- 2 tbsp oil
- salt to taste

Instructions:
1. Heat the oil in a wok over medium heat.
2. Fry the garlic until golden, then add the onion.
3. Add the rice and stir-fry until crispy. Season with salt.";

    assert_eq!(share_text(&sample_recipe()), expected);
}

#[test]
fn test_share_text_omits_nutrition() {
    assert!(!share_text(&sample_recipe()).contains("Nutrition"));
}

#[test]
fn test_terminal_text_appends_nutrition_when_present() {
    let text = render_recipe(&sample_recipe());
    assert!(text.starts_with(&share_text(&sample_recipe())));
    assert!(text.ends_with(
        "Nutrition (per serving):\n- Calories: 420 kcal\n- Protein: 8g\n- Carbs: 70g\n- Fat: 12g"
    ));

    let without = named_recipe("Plain Rice");
    assert_eq!(render_recipe(&without), share_text(&without));
}

#[test]
fn test_json_output_parses_back_to_the_same_recipe() {
    let json = format_recipe(&sample_recipe(), OutputFormat::Json).unwrap();
    assert!(json.contains("\"recipeName\": \"Garlic Fried Rice\""));
    assert_eq!(ResponseInterpreter::parse_text(&json).unwrap(), sample_recipe());
}

#[test]
fn test_default_output_format_is_text() {
    let recipe = sample_recipe();
    assert_eq!(OutputFormat::default(), OutputFormat::Text);
    assert_eq!(
        format_recipe(&recipe, OutputFormat::default()).unwrap(),
        render_recipe(&recipe)
    );
}
