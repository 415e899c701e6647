// ABOUTME: Integration tests for provider envelope extraction and failure classification
// ABOUTME: Exercises Gemini, OpenAI-compatible and Ollama response shapes without network access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::time::Duration;

use common::{gemini_envelope, ollama_envelope, openai_envelope, sample_recipe, sample_recipe_json};
use recipe_generator::errors::{GenerationError, ProviderFailureKind};
use recipe_generator::interpreter::ResponseInterpreter;
use recipe_generator::llm::{
    EnvelopeExtractor, GeminiProvider, OllamaProvider, OpenAiCompatibleConfig,
    OpenAiCompatibleProvider, RawResponse,
};
use reqwest::Client;
use serde_json::{json, Value};

fn gemini() -> GeminiProvider {
    GeminiProvider::new("test-key", Client::new())
}

fn openai() -> OpenAiCompatibleProvider {
    OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::openai("test-key"), Client::new())
}

fn ollama() -> OllamaProvider {
    OllamaProvider::new(Client::new())
}

fn http(status: u16, retry_after: Option<&str>, body: &Value) -> RawResponse {
    RawResponse::from_http(status, retry_after, body.to_string())
}

fn provider_failure(error: GenerationError) -> (String, ProviderFailureKind, String, Option<Duration>) {
    match error {
        GenerationError::Provider {
            provider,
            kind,
            message,
            retry_after,
        } => (provider, kind, message, retry_after),
        other => panic!("expected Provider, got {other:?}"),
    }
}

// ============================================================================
// Success envelopes
// ============================================================================

#[test]
fn test_gemini_candidate_text_is_extracted() {
    let raw = http(200, None, &gemini_envelope("{\"a\":1}"));
    assert_eq!(gemini().extract_candidate_text(&raw).unwrap(), "{\"a\":1}");
}

#[test]
fn test_gemini_parts_are_concatenated() {
    let body = json!({
        "candidates": [{
            "content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]},
            "finishReason": "STOP"
        }]
    });
    let raw = http(200, None, &body);
    assert_eq!(gemini().extract_candidate_text(&raw).unwrap(), "{\"a\":1}");
}

#[test]
fn test_gemini_thought_parts_are_skipped() {
    let body = json!({
        "candidates": [{
            "content": {"parts": [
                {"text": "The user wants {something} with rice.", "thought": true},
                {"text": sample_recipe_json()}
            ]},
            "finishReason": "STOP"
        }]
    });
    let raw = http(200, None, &body);
    assert_eq!(gemini().extract_candidate_text(&raw).unwrap(), sample_recipe_json());
    assert_eq!(
        ResponseInterpreter::parse(&raw, &gemini()).unwrap(),
        sample_recipe()
    );
}

#[test]
fn test_openai_message_content_is_extracted() {
    let raw = http(200, None, &openai_envelope("hello"));
    assert_eq!(openai().extract_candidate_text(&raw).unwrap(), "hello");
}

#[test]
fn test_ollama_response_is_extracted() {
    let raw = http(200, None, &ollama_envelope("hello"));
    assert_eq!(ollama().extract_candidate_text(&raw).unwrap(), "hello");
}

#[test]
fn test_fenced_recipe_through_each_envelope() {
    let fenced = format!("```json\n{}\n```", sample_recipe_json());

    let from_gemini = http(200, None, &gemini_envelope(&fenced));
    let from_openai = http(200, None, &openai_envelope(&fenced));
    let from_ollama = http(200, None, &ollama_envelope(&fenced));

    assert_eq!(ResponseInterpreter::parse(&from_gemini, &gemini()).unwrap(), sample_recipe());
    assert_eq!(ResponseInterpreter::parse(&from_openai, &openai()).unwrap(), sample_recipe());
    assert_eq!(ResponseInterpreter::parse(&from_ollama, &ollama()).unwrap(), sample_recipe());
}

// ============================================================================
// Malformed envelopes
// ============================================================================

#[test]
fn test_gemini_without_candidates_is_malformed() {
    let raw = http(200, None, &json!({"candidates": []}));
    let error = gemini().extract_candidate_text(&raw).unwrap_err();
    assert!(matches!(error, GenerationError::MalformedEnvelope { .. }), "{error:?}");
}

#[test]
fn test_openai_null_content_is_malformed() {
    let body = json!({"choices": [{"message": {"role": "assistant", "content": null}}]});
    let error = openai()
        .extract_candidate_text(&http(200, None, &body))
        .unwrap_err();
    match error {
        GenerationError::MalformedEnvelope { provider, detail } => {
            assert_eq!(provider, "openai");
            assert!(detail.contains("choices[0].message.content"));
        }
        other => panic!("expected MalformedEnvelope, got {other:?}"),
    }
}

#[test]
fn test_non_json_success_body_is_malformed() {
    let raw = RawResponse::from_http(200, None, "<html>gateway</html>".to_owned());
    let error = ollama().extract_candidate_text(&raw).unwrap_err();
    assert!(matches!(error, GenerationError::MalformedEnvelope { .. }), "{error:?}");
}

#[test]
fn test_empty_success_body_is_empty_input() {
    let raw = RawResponse::from_http(200, None, String::new());
    let error = openai().extract_candidate_text(&raw).unwrap_err();
    assert!(matches!(error, GenerationError::EmptyInput), "{error:?}");
}

// ============================================================================
// Provider-reported failures
// ============================================================================

#[test]
fn test_gemini_resource_exhausted_with_retry_info() {
    let body = json!({
        "error": {
            "code": 429,
            "message": "Resource has been exhausted (e.g. check quota).",
            "status": "RESOURCE_EXHAUSTED",
            "details": [{
                "@type": "type.googleapis.com/google.rpc.RetryInfo",
                "retryDelay": "7s"
            }]
        }
    });
    let error = gemini()
        .extract_candidate_text(&http(429, None, &body))
        .unwrap_err();
    assert_eq!(error.retry_after(), Some(Duration::from_secs(7)));

    let (provider, kind, message, _) = provider_failure(error);
    assert_eq!(provider, "gemini");
    assert_eq!(kind, ProviderFailureKind::RateLimited);
    assert_eq!(message, "Resource has been exhausted (e.g. check quota).");
}

#[test]
fn test_gemini_quota_failure_detail_means_quota_exceeded() {
    let body = json!({
        "error": {
            "code": 429,
            "message": "You exceeded your current quota. Please retry in 6s.",
            "status": "RESOURCE_EXHAUSTED",
            "details": [{"@type": "type.googleapis.com/google.rpc.QuotaFailure"}]
        }
    });
    let (_, kind, _, retry_after) =
        provider_failure(gemini().extract_candidate_text(&http(429, None, &body)).unwrap_err());
    assert_eq!(kind, ProviderFailureKind::QuotaExceeded);
    assert_eq!(retry_after, Some(Duration::from_secs(6)));
}

#[test]
fn test_gemini_blocked_prompt() {
    let body = json!({"promptFeedback": {"blockReason": "SAFETY"}});
    let (_, kind, message, _) =
        provider_failure(gemini().extract_candidate_text(&http(200, None, &body)).unwrap_err());
    assert_eq!(kind, ProviderFailureKind::Blocked);
    assert!(message.contains("SAFETY"));
}

#[test]
fn test_openai_rate_limit_uses_retry_after_header() {
    let body = json!({
        "error": {
            "message": "Rate limit reached for gpt-4o-mini.",
            "type": "requests",
            "code": "rate_limit_exceeded"
        }
    });
    let error = openai()
        .extract_candidate_text(&http(429, Some("20"), &body))
        .unwrap_err();
    assert_eq!(error.to_string(), "Rate limit reached for gpt-4o-mini. (retry after 20 seconds)");

    let (_, kind, _, retry_after) = provider_failure(error);
    assert_eq!(kind, ProviderFailureKind::RateLimited);
    assert_eq!(retry_after, Some(Duration::from_secs(20)));
}

#[test]
fn test_openai_error_codes_are_classified() {
    let cases = [
        (429, "insufficient_quota", ProviderFailureKind::QuotaExceeded),
        (401, "invalid_api_key", ProviderFailureKind::Unauthorized),
        (404, "model_not_found", ProviderFailureKind::InvalidRequest),
    ];

    for (status, code, expected) in cases {
        let body = json!({"error": {"message": "nope", "type": "whatever", "code": code}});
        let (_, kind, message, _) = provider_failure(
            openai()
                .extract_candidate_text(&http(status, None, &body))
                .unwrap_err(),
        );
        assert_eq!(kind, expected, "code {code}");
        assert_eq!(message, "nope");
    }
}

#[test]
fn test_openai_refusal_is_blocked() {
    let body = json!({
        "choices": [{
            "message": {"role": "assistant", "content": null, "refusal": "I can't help with that."}
        }]
    });
    let (_, kind, message, _) =
        provider_failure(openai().extract_candidate_text(&http(200, None, &body)).unwrap_err());
    assert_eq!(kind, ProviderFailureKind::Blocked);
    assert_eq!(message, "I can't help with that.");
}

#[test]
fn test_ollama_string_error_falls_back_to_http_status() {
    let body = json!({"error": "model 'llama9' not found, try pulling it first"});
    let (provider, kind, message, _) =
        provider_failure(ollama().extract_candidate_text(&http(404, None, &body)).unwrap_err());
    assert_eq!(provider, "ollama");
    assert_eq!(kind, ProviderFailureKind::InvalidRequest);
    assert_eq!(message, "model 'llama9' not found, try pulling it first");
}

#[test]
fn test_plain_text_error_body_keeps_message() {
    let raw = RawResponse::from_http(503, None, "upstream overloaded".to_owned());
    let (_, kind, message, _) = provider_failure(gemini().extract_candidate_text(&raw).unwrap_err());
    assert_eq!(kind, ProviderFailureKind::Unavailable);
    assert_eq!(message, "upstream overloaded");
}

#[test]
fn test_error_field_on_success_status_is_still_a_failure() {
    let body = json!({"error": {"message": "API key not valid. Please pass a valid API key."}});
    let (_, kind, _, _) =
        provider_failure(gemini().extract_candidate_text(&http(200, None, &body)).unwrap_err());
    assert_eq!(kind, ProviderFailureKind::Unauthorized);
}
