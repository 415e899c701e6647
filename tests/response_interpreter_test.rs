// ABOUTME: Integration tests for turning provider output into validated recipes
// ABOUTME: Covers fencing, prose tolerance, JSON errors, field check order and provider failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::time::Duration;

use common::{sample_recipe, sample_recipe_json, sample_recipe_value};
use recipe_generator::constants::diagnostics::MAX_SNIPPET_CHARS;
use recipe_generator::errors::{GenerationError, ProviderFailureKind};
use recipe_generator::interpreter::ResponseInterpreter;
use recipe_generator::llm::{DirectEnvelope, RawResponse};
use serde_json::json;

fn schema_field(error: &GenerationError) -> &str {
    match error {
        GenerationError::SchemaViolation { field, .. } => field,
        other => panic!("expected SchemaViolation, got {other:?}"),
    }
}

// ============================================================================
// Happy paths
// ============================================================================

#[test]
fn test_plain_json_parses_field_for_field() {
    let recipe = ResponseInterpreter::parse_text(&sample_recipe_json()).unwrap();
    assert_eq!(recipe, sample_recipe());
}

#[test]
fn test_fenced_json_matches_unfenced() {
    let plain = ResponseInterpreter::parse_text(&sample_recipe_json()).unwrap();

    let fenced = format!("```json\n{}\n```", sample_recipe_json());
    assert_eq!(ResponseInterpreter::parse_text(&fenced).unwrap(), plain);

    let untagged = format!("```\n{}\n```", sample_recipe_json());
    assert_eq!(ResponseInterpreter::parse_text(&untagged).unwrap(), plain);
}

#[test]
fn test_prose_around_json_is_tolerated() {
    let text = format!(
        "Here is a recipe you will love:\n{}\nEnjoy your meal!",
        sample_recipe_json()
    );
    let recipe = ResponseInterpreter::parse_text(&text).unwrap();
    assert_eq!(recipe.recipe_name, "Garlic Fried Rice");
}

#[test]
fn test_braces_in_leading_prose_are_skipped() {
    let text = format!(
        "Here is your recipe {{as requested}}:\n{}\nEnjoy!",
        sample_recipe_json()
    );
    assert_eq!(ResponseInterpreter::parse_text(&text).unwrap(), sample_recipe());
}

#[test]
fn test_fenced_block_followed_by_prose() {
    let text = format!(
        "Sure!\n```json\n{}\n```\nEnjoy {{smile}}",
        sample_recipe_json()
    );
    assert_eq!(ResponseInterpreter::parse_text(&text).unwrap(), sample_recipe());
}

#[test]
fn test_missing_nutrition_is_tolerated() {
    let mut value = sample_recipe_value();
    value.as_object_mut().unwrap().remove("nutrition");

    let recipe = ResponseInterpreter::parse_text(&value.to_string()).unwrap();
    assert!(recipe.nutrition.is_none());
    assert!(!recipe.has_nutrition());
}

#[test]
fn test_null_nutrition_counts_as_absent() {
    let mut value = sample_recipe_value();
    value["nutrition"] = json!(null);

    let recipe = ResponseInterpreter::parse_text(&value.to_string()).unwrap();
    assert!(recipe.nutrition.is_none());
}

#[test]
fn test_strings_are_kept_verbatim() {
    let mut value = sample_recipe_value();
    value["description"] = json!("  spaced  out  ");
    value["instructions"] = json!(["Step two first?", "  Then step one.  "]);

    let recipe = ResponseInterpreter::parse_text(&value.to_string()).unwrap();
    assert_eq!(recipe.description, "  spaced  out  ");
    assert_eq!(
        recipe.instructions,
        vec!["Step two first?", "  Then step one.  "]
    );
}

#[test]
fn test_unknown_fields_are_ignored() {
    let mut value = sample_recipe_value();
    value["difficulty"] = json!("easy");

    assert_eq!(
        ResponseInterpreter::parse_text(&value.to_string()).unwrap(),
        sample_recipe()
    );
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_not_json_is_invalid_json() {
    let error = ResponseInterpreter::parse_text("not json").unwrap_err();
    match error {
        GenerationError::InvalidJson { snippet, .. } => assert_eq!(snippet, "not json"),
        other => panic!("expected InvalidJson, got {other:?}"),
    }
}

#[test]
fn test_invalid_json_snippet_is_truncated() {
    let text = format!("{{\"recipeName\": \"{}", "x".repeat(1000));
    let error = ResponseInterpreter::parse_text(&text).unwrap_err();
    match error {
        GenerationError::InvalidJson { snippet, .. } => {
            assert!(snippet.chars().count() <= MAX_SNIPPET_CHARS + 3);
            assert!(snippet.ends_with("..."));
        }
        other => panic!("expected InvalidJson, got {other:?}"),
    }
}

#[test]
fn test_empty_text_is_empty_input() {
    for text in ["", "   \n", "```json\n```"] {
        let error = ResponseInterpreter::parse_text(text).unwrap_err();
        assert!(
            matches!(error, GenerationError::EmptyInput),
            "{text:?} gave {error:?}"
        );
    }
}

#[test]
fn test_missing_description_reported_first() {
    let error = ResponseInterpreter::parse_text(r#"{"recipeName":"X"}"#).unwrap_err();
    assert_eq!(schema_field(&error), "description");
}

#[test]
fn test_check_order_is_stable() {
    let cases = [
        ("recipeName", json!(42)),
        ("servings", json!(null)),
        ("cookTime", json!(["30 minutes"])),
        ("ingredients", json!("rice, onion")),
        ("instructions", json!(["Cook.", 2])),
        ("nutrition", json!("420 kcal")),
    ];

    for (field, bad_value) in cases {
        let mut value = sample_recipe_value();
        value[field] = bad_value;
        let error = ResponseInterpreter::parse_text(&value.to_string()).unwrap_err();
        assert_eq!(schema_field(&error), field);
    }
}

#[test]
fn test_earlier_field_wins_over_later_field() {
    let mut value = sample_recipe_value();
    let fields = value.as_object_mut().unwrap();
    fields.remove("instructions");
    fields.remove("prepTime");

    let error = ResponseInterpreter::parse_text(&value.to_string()).unwrap_err();
    assert_eq!(schema_field(&error), "prepTime");
}

#[test]
fn test_nutrition_subfield_is_named() {
    let mut value = sample_recipe_value();
    value["nutrition"].as_object_mut().unwrap().remove("carbs");

    let error = ResponseInterpreter::parse_text(&value.to_string()).unwrap_err();
    assert_eq!(schema_field(&error), "nutrition.carbs");
}

#[test]
fn test_non_object_root_is_schema_violation() {
    let error = ResponseInterpreter::parse_text(&format!("[{}]", sample_recipe_json())).unwrap_err();
    assert_eq!(schema_field(&error), "(root)");
}

// ============================================================================
// Envelope handling
// ============================================================================

#[test]
fn test_rate_limited_envelope_carries_retry_after() {
    let raw = RawResponse::json(json!({"status": "rate_limited", "retry_after": 5}));
    let error = ResponseInterpreter::parse(&raw, &DirectEnvelope::default()).unwrap_err();

    match &error {
        GenerationError::Provider {
            kind, retry_after, ..
        } => {
            assert_eq!(*kind, ProviderFailureKind::RateLimited);
            assert_eq!(*retry_after, Some(Duration::from_secs(5)));
        }
        other => panic!("expected Provider, got {other:?}"),
    }
    assert_eq!(error.retry_after(), Some(Duration::from_secs(5)));
}

#[test]
fn test_direct_envelope_accepts_parsed_object() {
    let raw = RawResponse::json(sample_recipe_value());
    let recipe = ResponseInterpreter::parse(&raw, &DirectEnvelope::default()).unwrap();
    assert_eq!(recipe, sample_recipe());
}

#[test]
fn test_recipe_status_field_is_data_not_failure() {
    let mut value = sample_recipe_value();
    value["status"] = json!("draft");
    value["error"] = json!("none");

    let recipe = ResponseInterpreter::parse(&RawResponse::json(value), &DirectEnvelope::default())
        .unwrap();
    assert_eq!(recipe, sample_recipe());
}

#[test]
fn test_recipe_body_still_fails_on_http_error() {
    let mut raw = RawResponse::json(sample_recipe_value());
    raw.http_status = Some(503);

    let error = ResponseInterpreter::parse(&raw, &DirectEnvelope::default()).unwrap_err();
    assert!(matches!(error, GenerationError::Provider { .. }), "{error:?}");
}

#[test]
fn test_direct_envelope_accepts_json_string_payload() {
    let raw = RawResponse::json(json!(format!("```json\n{}\n```", sample_recipe_json())));
    let recipe = ResponseInterpreter::parse(&raw, &DirectEnvelope::default()).unwrap();
    assert_eq!(recipe, sample_recipe());
}

#[test]
fn test_null_payload_is_empty_input() {
    let raw = RawResponse::json(json!(null));
    let error = ResponseInterpreter::parse(&raw, &DirectEnvelope::default()).unwrap_err();
    assert!(matches!(error, GenerationError::EmptyInput));
}
