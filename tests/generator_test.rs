// ABOUTME: Integration tests for the end-to-end recipe generation flow
// ABOUTME: Uses the fake provider to check call counts, prompts and error propagation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{init_test_logging, sample_recipe, sample_recipe_json, sample_request};
use recipe_generator::errors::{GenerationError, ProviderFailureKind};
use recipe_generator::generator::RecipeGenerator;
use recipe_generator::llm::{FakeProvider, FakeReply, RawResponse, RecipeProvider};
use serde_json::json;

fn generator_with(provider: &Arc<FakeProvider>) -> RecipeGenerator {
    let provider: Arc<dyn RecipeProvider> = provider.clone();
    RecipeGenerator::new(provider)
}

#[tokio::test]
async fn test_one_provider_call_per_generation() {
    init_test_logging();
    let provider = Arc::new(FakeProvider::with_text(sample_recipe_json()));
    let generator = generator_with(&provider);

    let recipe = generator.generate(&sample_request()).await.unwrap();
    assert_eq!(recipe, sample_recipe());
    assert_eq!(provider.call_count(), 1);

    generator.generate(&sample_request()).await.unwrap();
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_prompt_reflects_loose_inputs() {
    init_test_logging();
    let provider = Arc::new(FakeProvider::with_text(sample_recipe_json()));
    let generator = generator_with(&provider);

    generator
        .generate_recipe("2 cup(s) rice, 1 unit(s) onion", "Dinner", &["Vegan"])
        .await
        .unwrap();

    let prompts = provider.recorded_prompts();
    assert_eq!(prompts.len(), 1);
    let text = &prompts[0].instruction_text;
    assert!(text.contains("2 cup(s) rice, 1 unit(s) onion"));
    assert!(text.contains("\"Dinner\" meal"));
    assert!(text.contains("dietary restrictions: Vegan."));
}

#[tokio::test]
async fn test_invalid_request_never_reaches_provider() {
    init_test_logging();
    let provider = Arc::new(FakeProvider::with_text(sample_recipe_json()));
    let generator = generator_with(&provider);

    let no_ingredients = generator
        .generate_recipe(" , ,", "Dinner", &[] as &[&str])
        .await
        .unwrap_err();
    assert!(matches!(no_ingredients, GenerationError::InvalidRequest { .. }));

    let bad_meal = generator
        .generate_recipe("rice", "Brunch", &[] as &[&str])
        .await
        .unwrap_err();
    assert!(matches!(bad_meal, GenerationError::InvalidRequest { .. }));

    let bad_restriction = generator
        .generate_recipe("rice", "Lunch", &["Carnivore"])
        .await
        .unwrap_err();
    assert!(matches!(bad_restriction, GenerationError::InvalidRequest { .. }));

    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_network_failure_is_reported_once() {
    init_test_logging();
    let provider = Arc::new(
        FakeProvider::new().with_reply(FakeReply::NetworkFailure("connection refused".to_owned())),
    );
    let generator = generator_with(&provider);

    let error = generator.generate(&sample_request()).await.unwrap_err();
    match error {
        GenerationError::Network { message } => assert_eq!(message, "connection refused"),
        other => panic!("expected Network, got {other:?}"),
    }
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_provider_failure_is_not_retried() {
    init_test_logging();
    let provider = Arc::new(
        FakeProvider::new()
            .with_reply(FakeReply::Response(RawResponse::json(
                json!({"status": "rate_limited", "retry_after": 5}),
            )))
            .with_default_reply(FakeReply::text(sample_recipe_json())),
    );
    let generator = generator_with(&provider);

    let error = generator.generate(&sample_request()).await.unwrap_err();
    match &error {
        GenerationError::Provider { kind, .. } => {
            assert_eq!(*kind, ProviderFailureKind::RateLimited);
        }
        other => panic!("expected Provider, got {other:?}"),
    }
    assert_eq!(error.retry_after(), Some(Duration::from_secs(5)));
    assert_eq!(provider.call_count(), 1);

    // The next submission is a fresh call
    let recipe = generator.generate(&sample_request()).await.unwrap();
    assert_eq!(recipe.recipe_name, "Garlic Fried Rice");
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_unusable_output_is_classified() {
    init_test_logging();
    let provider = Arc::new(
        FakeProvider::new()
            .with_reply(FakeReply::text("Sorry, I cannot cook today."))
            .with_reply(FakeReply::text(r#"{"recipeName":"X"}"#))
            .with_reply(FakeReply::text("   ")),
    );
    let generator = generator_with(&provider);

    let invalid_json = generator.generate(&sample_request()).await.unwrap_err();
    assert!(matches!(invalid_json, GenerationError::InvalidJson { .. }));

    let schema = generator.generate(&sample_request()).await.unwrap_err();
    assert!(matches!(schema, GenerationError::SchemaViolation { ref field, .. } if field == "description"));

    let empty = generator.generate(&sample_request()).await.unwrap_err();
    assert!(matches!(empty, GenerationError::EmptyInput));
}
