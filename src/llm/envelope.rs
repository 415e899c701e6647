// ABOUTME: Envelope rules shared by every provider extractor
// ABOUTME: Detects provider-reported failures and classifies them, structured fields first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

//! # Shared Envelope Rules
//!
//! Applied by every extractor before it looks for its success field:
//!
//! 1. a non-2xx HTTP status is a provider failure
//! 2. a JSON body whose `status` is not a success word is a provider failure
//! 3. a JSON body with a non-null top-level `error` is a provider failure
//!
//! The failure kind is taken from structured data when the provider gives
//! any (Gemini `error.status` and error details, `OpenAI` `error.code` and
//! `error.type`, the body `status`, the HTTP status). Matching words inside
//! the human-readable message is the last resort.
//!
//! The retry delay is taken from the `Retry-After` header, then from
//! `retry_after`/`retryAfter` body fields, then from a Gemini `RetryInfo`
//! detail, then from a "retry in Ns" phrase in the message.

use std::time::Duration;

use serde_json::Value;

use super::{RawPayload, RawResponse};
use crate::errors::{truncate_snippet, GenerationError, ProviderFailureKind};

/// Body `status` values that mean the request went through
const SUCCESS_STATUSES: &[&str] = &["ok", "success", "succeeded", "completed", "done"];

/// Apply the shared failure rules to a response
///
/// # Errors
///
/// Returns `GenerationError::Provider` when the response reports a failure.
pub fn check_envelope(provider: &str, raw: &RawResponse) -> Result<(), GenerationError> {
    check_http_status(provider, raw)?;

    let RawPayload::Json(body) = &raw.payload else {
        return Ok(());
    };

    if let Some(status) = failed_body_status(body) {
        let message = structured_message(body)
            .unwrap_or_else(|| format!("{provider} reported status '{status}'"));
        return Err(provider_failure(provider, raw, Some(body), message));
    }

    if body.get("error").is_some_and(|error| !error.is_null()) {
        let message = structured_message(body)
            .unwrap_or_else(|| format!("{provider} reported an error"));
        return Err(provider_failure(provider, raw, Some(body), message));
    }

    Ok(())
}

/// Apply only the HTTP status rule
///
/// # Errors
///
/// Returns `GenerationError::Provider` for a non-2xx status.
pub fn check_http_status(provider: &str, raw: &RawResponse) -> Result<(), GenerationError> {
    if raw.is_http_success() {
        return Ok(());
    }

    let body = match &raw.payload {
        RawPayload::Json(value) => Some(value),
        RawPayload::Text(_) => None,
    };
    let message = body
        .and_then(structured_message)
        .or_else(|| text_body(raw))
        .unwrap_or_else(|| format!("HTTP {}", raw.http_status.unwrap_or_default()));
    Err(provider_failure(provider, raw, body, message))
}

/// Return the JSON body, classifying payloads that cannot hold an envelope
///
/// # Errors
///
/// - `EmptyInput` for a blank text body or JSON `null`
/// - `MalformedEnvelope` for a non-JSON text body
pub fn json_body<'a>(provider: &str, raw: &'a RawResponse) -> Result<&'a Value, GenerationError> {
    match &raw.payload {
        RawPayload::Json(Value::Null) => Err(GenerationError::EmptyInput),
        RawPayload::Json(value) => Ok(value),
        RawPayload::Text(text) if text.trim().is_empty() => Err(GenerationError::EmptyInput),
        RawPayload::Text(text) => Err(GenerationError::malformed_envelope(
            provider,
            format!("response body is not JSON: {}", truncate_snippet(text)),
        )),
    }
}

/// Require a non-empty string at the end of an envelope path
///
/// # Errors
///
/// Returns `MalformedEnvelope` naming `path` when the field is absent, not a
/// string, or blank.
pub fn required_text(
    provider: &str,
    value: Option<&str>,
    path: &str,
) -> Result<String, GenerationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.to_owned()),
        Some(_) => Err(GenerationError::malformed_envelope(
            provider,
            format!("'{path}' is empty"),
        )),
        None => Err(GenerationError::malformed_envelope(
            provider,
            format!("'{path}' is missing"),
        )),
    }
}

/// Parse a number of seconds given as a JSON-ish string ("5", "6.5", "6s")
#[must_use]
pub fn parse_seconds(text: &str) -> Option<Duration> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('s').unwrap_or(trimmed).trim();
    number.parse::<f64>().ok().and_then(seconds_to_duration)
}

/// Article-and-noun description of a JSON value's type, for messages
#[must_use]
pub const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn seconds_to_duration(seconds: f64) -> Option<Duration> {
    if seconds.is_finite() && seconds >= 0.0 {
        Duration::try_from_secs_f64(seconds).ok()
    } else {
        None
    }
}

fn text_body(raw: &RawResponse) -> Option<String> {
    match &raw.payload {
        RawPayload::Text(text) if !text.trim().is_empty() => Some(truncate_snippet(text.trim())),
        _ => None,
    }
}

fn failed_body_status(body: &Value) -> Option<String> {
    match body.get("status")? {
        Value::String(status) => {
            let normalized = status.trim().to_ascii_lowercase();
            (!SUCCESS_STATUSES.contains(&normalized.as_str())).then(|| status.clone())
        }
        Value::Number(code) => code
            .as_u64()
            .filter(|code| !(200..300).contains(code))
            .map(|code| code.to_string()),
        _ => None,
    }
}

/// Human-readable message from the usual error fields
fn structured_message(body: &Value) -> Option<String> {
    let error = body.get("error");
    error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .or_else(|| error.and_then(Value::as_str))
        .or_else(|| body.get("message").and_then(Value::as_str))
        .or_else(|| body.get("detail").and_then(Value::as_str))
        .filter(|message| !message.trim().is_empty())
        .map(str::to_owned)
}

fn provider_failure(
    provider: &str,
    raw: &RawResponse,
    body: Option<&Value>,
    message: String,
) -> GenerationError {
    let kind = classify_failure(raw.http_status, body, &message);
    let retry_after = raw
        .retry_after
        .or_else(|| body.and_then(body_retry_after))
        .or_else(|| body.and_then(gemini_retry_delay))
        .or_else(|| retry_hint_in_message(&message));
    GenerationError::provider(provider, kind, message, retry_after)
}

// ============================================================================
// Failure classification
// ============================================================================

/// Classify a provider failure, structured data first
#[must_use]
pub fn classify_failure(
    http_status: Option<u16>,
    body: Option<&Value>,
    message: &str,
) -> ProviderFailureKind {
    body.and_then(classify_structured_error)
        .or_else(|| body.and_then(classify_body_status))
        .or_else(|| http_status.and_then(classify_http_status))
        .unwrap_or_else(|| classify_message(message))
}

/// Gemini `error.status` / `QuotaFailure` details, `OpenAI` `error.code` / `error.type`
fn classify_structured_error(body: &Value) -> Option<ProviderFailureKind> {
    let error = body.get("error")?;

    let has_quota_failure = error
        .get("details")
        .and_then(Value::as_array)
        .is_some_and(|details| {
            details.iter().any(|detail| {
                detail
                    .get("@type")
                    .and_then(Value::as_str)
                    .is_some_and(|kind| kind.ends_with("QuotaFailure"))
            })
        });

    let code_words = ["status", "code", "type"]
        .into_iter()
        .filter_map(|key| error.get(key).and_then(Value::as_str))
        .map(str::to_ascii_lowercase);

    for word in code_words {
        let kind = match word.as_str() {
            "resource_exhausted" if has_quota_failure => ProviderFailureKind::QuotaExceeded,
            "resource_exhausted" | "rate_limit_exceeded" | "rate_limit_error" => {
                ProviderFailureKind::RateLimited
            }
            "insufficient_quota" => ProviderFailureKind::QuotaExceeded,
            "unauthenticated" | "permission_denied" | "invalid_api_key"
            | "authentication_error" => ProviderFailureKind::Unauthorized,
            "invalid_argument" | "failed_precondition" | "not_found" | "model_not_found"
            | "invalid_request_error" => ProviderFailureKind::InvalidRequest,
            "unavailable" | "internal" | "deadline_exceeded" | "server_error"
            | "overloaded_error" => ProviderFailureKind::Unavailable,
            _ => continue,
        };
        return Some(kind);
    }
    None
}

fn classify_body_status(body: &Value) -> Option<ProviderFailureKind> {
    let status = body.get("status")?.as_str()?.trim().to_ascii_lowercase();
    let kind = match status.as_str() {
        "rate_limited" | "rate_limit" | "too_many_requests" | "throttled" => {
            ProviderFailureKind::RateLimited
        }
        "quota_exceeded" | "insufficient_quota" => ProviderFailureKind::QuotaExceeded,
        "unauthorized" | "forbidden" | "unauthenticated" | "invalid_api_key" => {
            ProviderFailureKind::Unauthorized
        }
        "invalid_request" | "bad_request" | "invalid" => ProviderFailureKind::InvalidRequest,
        "blocked" | "refused" | "content_filter" | "safety" => ProviderFailureKind::Blocked,
        "unavailable" | "overloaded" | "timeout" => ProviderFailureKind::Unavailable,
        _ => return None,
    };
    Some(kind)
}

const fn classify_http_status(status: u16) -> Option<ProviderFailureKind> {
    match status {
        429 => Some(ProviderFailureKind::RateLimited),
        401 | 403 => Some(ProviderFailureKind::Unauthorized),
        400 | 404 | 413 | 422 => Some(ProviderFailureKind::InvalidRequest),
        500..=599 => Some(ProviderFailureKind::Unavailable),
        _ => None,
    }
}

/// Last resort: match well-known phrases in the message
fn classify_message(message: &str) -> ProviderFailureKind {
    let lower = message.to_lowercase();
    if lower.contains("quota") {
        ProviderFailureKind::QuotaExceeded
    } else if lower.contains("rate limit") || lower.contains("too many requests") {
        ProviderFailureKind::RateLimited
    } else if lower.contains("api key not valid")
        || lower.contains("invalid api key")
        || lower.contains("unauthorized")
    {
        ProviderFailureKind::Unauthorized
    } else if lower.contains("overloaded") || lower.contains("unavailable") {
        ProviderFailureKind::Unavailable
    } else {
        ProviderFailureKind::Other
    }
}

// ============================================================================
// Retry delay
// ============================================================================

fn body_retry_after(body: &Value) -> Option<Duration> {
    let candidates = [Some(body), body.get("error")];
    candidates
        .into_iter()
        .flatten()
        .flat_map(|scope| ["retry_after", "retryAfter"].map(|key| scope.get(key)))
        .flatten()
        .find_map(duration_from_value)
}

fn duration_from_value(value: &Value) -> Option<Duration> {
    match value {
        Value::Number(number) => number.as_f64().and_then(seconds_to_duration),
        Value::String(text) => parse_seconds(text),
        _ => None,
    }
}

/// Gemini `error.details[*]` entry of type `google.rpc.RetryInfo`
fn gemini_retry_delay(body: &Value) -> Option<Duration> {
    body.get("error")?
        .get("details")?
        .as_array()?
        .iter()
        .filter(|detail| {
            detail
                .get("@type")
                .and_then(Value::as_str)
                .is_some_and(|kind| kind.ends_with("RetryInfo"))
        })
        .find_map(|detail| detail.get("retryDelay").and_then(duration_from_value))
}

/// "Please retry in 6.2s" / "try again in 20s" / "try again in 450ms"
fn retry_hint_in_message(message: &str) -> Option<Duration> {
    let lower = message.to_lowercase();
    ["retry in ", "try again in "].into_iter().find_map(|marker| {
        let start = lower.find(marker)? + marker.len();
        let rest = &lower[start..];
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let number: f64 = rest[..number_len].trim_end_matches('.').parse().ok()?;
        let unit = &rest[number_len..];
        if unit.starts_with("ms") {
            seconds_to_duration(number / 1000.0)
        } else if unit.starts_with('s') || unit.starts_with(" s") {
            seconds_to_duration(number)
        } else {
            None
        }
    })
}
