// ABOUTME: Google Gemini provider using schema-constrained JSON generation
// ABOUTME: Sends generateContent with responseSchema and extracts the candidate parts text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

//! # Gemini Provider
//!
//! Uses the Generative Language API `generateContent` method with
//! `responseMimeType: application/json` and a `responseSchema`, so the model
//! is constrained to the recipe shape.
//!
//! ## Configuration
//!
//! Set `GEMINI_API_KEY` (or `RECIPE_LLM_API_KEY`) with a key from Google AI
//! Studio. `RECIPE_LLM_MODEL` overrides the default `gemini-2.5-flash`.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use super::envelope::{check_envelope, json_body, required_text};
use super::http::send;
use super::{EnvelopeExtractor, LlmCapabilities, RawResponse, RecipeProvider};
use crate::constants::generation::DEFAULT_TEMPERATURE;
use crate::constants::providers::{GEMINI_BASE_URL, GEMINI_DEFAULT_MODEL};
use crate::errors::{GenerationError, ProviderFailureKind};
use crate::prompts::RecipePrompt;

const PROVIDER_NAME: &str = "gemini";

/// Finish reasons meaning the candidate was withheld
const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    system_instruction: GeminiContent<'a>,
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    candidate_count: u32,
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    /// Set on thinking-model reasoning parts, which are not the answer
    #[serde(default)]
    thought: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini recipe provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    base_url: String,
    default_model: String,
    temperature: f32,
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl GeminiProvider {
    /// Create a provider with an API key and a shared HTTP client
    #[must_use]
    pub fn new(api_key: impl Into<String>, client: Client) -> Self {
        Self {
            api_key: api_key.into(),
            client,
            base_url: GEMINI_BASE_URL.to_owned(),
            default_model: GEMINI_DEFAULT_MODEL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Set a custom default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Point at a different API base URL (proxies, test servers)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.default_model
        )
    }

    fn build_request<'a>(&self, prompt: &'a RecipePrompt) -> GeminiRequest<'a> {
        GeminiRequest {
            system_instruction: GeminiContent {
                role: None,
                parts: vec![RequestPart {
                    text: &prompt.system_text,
                }],
            },
            contents: vec![GeminiContent {
                role: Some("user"),
                parts: vec![RequestPart {
                    text: &prompt.instruction_text,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                candidate_count: 1,
                response_mime_type: "application/json",
                response_schema: prompt.output_schema.to_gemini_schema(),
            },
        }
    }
}

impl EnvelopeExtractor for GeminiProvider {
    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }

    fn extract_candidate_text(&self, raw: &RawResponse) -> Result<String, GenerationError> {
        check_envelope(PROVIDER_NAME, raw)?;
        let body = json_body(PROVIDER_NAME, raw)?;

        let response = GeminiResponse::deserialize(body).map_err(|e| {
            GenerationError::malformed_envelope(PROVIDER_NAME, format!("unexpected shape: {e}"))
        })?;

        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            return Err(GenerationError::provider(
                PROVIDER_NAME,
                ProviderFailureKind::Blocked,
                format!("The request was blocked by Gemini ({reason})"),
                None,
            ));
        }

        let candidate = response.candidates.first().ok_or_else(|| {
            GenerationError::malformed_envelope(PROVIDER_NAME, "'candidates' is missing or empty")
        })?;

        let parts: Vec<&str> = candidate
            .content
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter(|part| part.thought != Some(true))
            .filter_map(|part| part.text.as_deref())
            .collect();
        let text = parts.concat();

        if text.trim().is_empty() {
            if let Some(reason) = candidate
                .finish_reason
                .as_deref()
                .filter(|reason| BLOCKING_FINISH_REASONS.contains(reason))
            {
                return Err(GenerationError::provider(
                    PROVIDER_NAME,
                    ProviderFailureKind::Blocked,
                    format!("Gemini withheld the recipe (finish reason {reason})"),
                    None,
                ));
            }
        }

        required_text(
            PROVIDER_NAME,
            (!parts.is_empty()).then_some(text.as_str()),
            "candidates[0].content.parts[].text",
        )
    }
}

#[async_trait]
impl RecipeProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn display_name(&self) -> &'static str {
        "Google Gemini"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::structured()
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, prompt), fields(model = %self.default_model))]
    async fn generate(&self, prompt: &RecipePrompt) -> Result<RawResponse, GenerationError> {
        let request = self.build_request(prompt);
        debug!("Sending recipe request to Gemini API");

        send(
            PROVIDER_NAME,
            self.client
                .post(self.build_url())
                .header("x-goog-api-key", &self.api_key)
                .json(&request),
        )
        .await
    }
}
