// ABOUTME: Shared fixtures for recipe generator integration tests
// ABOUTME: Provides sample recipes, requests, provider envelopes and quiet logging setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `recipe_generator`

use std::sync::Once;

use recipe_generator::models::{IngredientEntry, MealType, Nutrition, Recipe, RecipeRequest};
use serde_json::{json, Value};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    });
}

/// A complete recipe in the provider's JSON shape
pub fn sample_recipe_value() -> Value {
    json!({
        "recipeName": "Garlic Fried Rice",
        "description": "Crispy rice tossed with golden garlic and onion.",
        "servings": "2 servings",
        "prepTime": "10 minutes",
        "cookTime": "15 minutes",
        "ingredients": [
            "2 cup(s) cooked rice",
            "1 unit(s) onion, diced",
            "4 cloves garlic, minced",
            "2 tbsp oil",
            "salt to taste"
        ],
        "instructions": [
            "Heat the oil in a wok over medium heat.",
            "Fry the garlic until golden, then add the onion.",
            "Add the rice and stir-fry until crispy. Season with salt."
        ],
        "nutrition": {
            "calories": "420 kcal",
            "protein": "8g",
            "carbs": "70g",
            "fat": "12g"
        }
    })
}

/// [`sample_recipe_value`] as compact JSON text
pub fn sample_recipe_json() -> String {
    sample_recipe_value().to_string()
}

/// The typed equivalent of [`sample_recipe_value`]
pub fn sample_recipe() -> Recipe {
    Recipe {
        recipe_name: "Garlic Fried Rice".to_owned(),
        description: "Crispy rice tossed with golden garlic and onion.".to_owned(),
        servings: "2 servings".to_owned(),
        prep_time: "10 minutes".to_owned(),
        cook_time: "15 minutes".to_owned(),
        ingredients: vec![
            "2 cup(s) cooked rice".to_owned(),
            "1 unit(s) onion, diced".to_owned(),
            "4 cloves garlic, minced".to_owned(),
            "2 tbsp oil".to_owned(),
            "salt to taste".to_owned(),
        ],
        instructions: vec![
            "Heat the oil in a wok over medium heat.".to_owned(),
            "Fry the garlic until golden, then add the onion.".to_owned(),
            "Add the rice and stir-fry until crispy. Season with salt.".to_owned(),
        ],
        nutrition: Some(Nutrition {
            calories: "420 kcal".to_owned(),
            protein: "8g".to_owned(),
            carbs: "70g".to_owned(),
            fat: "12g".to_owned(),
        }),
    }
}

/// A recipe with a different name, for favorites tests
pub fn named_recipe(name: &str) -> Recipe {
    Recipe {
        recipe_name: name.to_owned(),
        nutrition: None,
        ..sample_recipe()
    }
}

/// A valid dinner request without restrictions
pub fn sample_request() -> RecipeRequest {
    RecipeRequest::new(
        [
            IngredientEntry::new("rice", Some("2".to_owned()), Some("cup(s)".to_owned())),
            IngredientEntry::new("onion", Some("1".to_owned()), Some("unit(s)".to_owned())),
        ],
        MealType::Dinner,
        [],
    )
    .unwrap()
}

/// Gemini `generateContent` success body carrying `text`
pub fn gemini_envelope(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 300}
    })
}

/// `OpenAI` chat completion success body carrying `content`
pub fn openai_envelope(content: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

/// Ollama `/api/generate` success body carrying `response`
pub fn ollama_envelope(response: &str) -> Value {
    json!({
        "model": "llama3.1",
        "created_at": "2025-01-01T00:00:00Z",
        "response": response,
        "done": true
    })
}
