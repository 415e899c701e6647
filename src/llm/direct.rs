// ABOUTME: Extractor for payloads that already are the recipe text or object
// ABOUTME: Used for bare provider bodies, cached responses, and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

use serde_json::Value;

use super::envelope::{check_envelope, check_http_status, json_kind};
use super::{EnvelopeExtractor, RawPayload, RawResponse};
use crate::errors::GenerationError;

const RECIPE_NAME_FIELD: &str = "recipeName";

/// Treats the whole payload as the candidate text
///
/// A text payload or a top-level JSON string is returned as is; a JSON
/// object is serialized back to text so the interpreter sees one input type.
/// The shared envelope rules still apply, so a body such as
/// `{"status": "rate_limited", "retry_after": 5}` is a provider failure.
/// A body that is itself a recipe (it has `recipeName`) is only held to the
/// HTTP status rule, so its own `status` or `error` fields are data.
#[derive(Debug, Clone)]
pub struct DirectEnvelope {
    provider: String,
}

impl Default for DirectEnvelope {
    fn default() -> Self {
        Self::new("direct")
    }
}

impl DirectEnvelope {
    /// Create an extractor reporting failures under `provider`
    #[must_use]
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
        }
    }
}

impl EnvelopeExtractor for DirectEnvelope {
    fn provider_name(&self) -> &str {
        &self.provider
    }

    fn extract_candidate_text(&self, raw: &RawResponse) -> Result<String, GenerationError> {
        let is_recipe = matches!(
            &raw.payload,
            RawPayload::Json(Value::Object(fields)) if fields.contains_key(RECIPE_NAME_FIELD)
        );
        if is_recipe {
            check_http_status(&self.provider, raw)?;
        } else {
            check_envelope(&self.provider, raw)?;
        }

        match &raw.payload {
            RawPayload::Text(text) | RawPayload::Json(Value::String(text)) => {
                if text.trim().is_empty() {
                    Err(GenerationError::EmptyInput)
                } else {
                    Ok(text.clone())
                }
            }
            RawPayload::Json(Value::Null) => Err(GenerationError::EmptyInput),
            RawPayload::Json(value @ Value::Object(_)) => Ok(value.to_string()),
            RawPayload::Json(other) => Err(GenerationError::malformed_envelope(
                &self.provider,
                format!("expected a JSON object or string, got {}", json_kind(other)),
            )),
        }
    }
}
