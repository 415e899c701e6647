// ABOUTME: Generic OpenAI-compatible chat completion provider
// ABOUTME: Presets for OpenAI, Groq, and local servers; extracts choices[0].message.content
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

//! # `OpenAI`-Compatible Provider
//!
//! Plain chat completion against any endpoint implementing the `OpenAI`
//! chat completions API. The recipe shape is described in the prompt text;
//! when the endpoint supports JSON mode, `response_format` asks for a JSON
//! object as well.
//!
//! ## Presets
//!
//! - **`OpenAI`**: <https://api.openai.com/v1> (`OPENAI_API_KEY`)
//! - **Groq**: <https://api.groq.com/openai/v1> (`GROQ_API_KEY`)
//! - **Local**: Ollama, vLLM or `LocalAI` at <http://localhost:11434/v1>
//!   (`LOCAL_LLM_API_KEY`, optional)

use std::borrow::Cow;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::envelope::{check_envelope, json_body, required_text};
use super::http::send;
use super::{EnvelopeExtractor, LlmCapabilities, RawResponse, RecipeProvider};
use crate::constants::generation::DEFAULT_TEMPERATURE;
use crate::constants::providers::{
    GROQ_BASE_URL, GROQ_DEFAULT_MODEL, LOCAL_BASE_URL, LOCAL_DEFAULT_MODEL, OPENAI_BASE_URL,
    OPENAI_DEFAULT_MODEL,
};
use crate::errors::{GenerationError, ProviderFailureKind};
use crate::prompts::RecipePrompt;

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: Option<OpenAiResponseMessage>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
    refusal: Option<String>,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for an `OpenAI`-compatible endpoint
#[derive(Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API (e.g., <http://localhost:11434/v1>)
    pub base_url: String,
    /// API key (optional for local servers)
    pub api_key: Option<String>,
    /// Model to use
    pub default_model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Provider name for logging and errors
    pub provider_name: &'static str,
    /// Provider display name
    pub display_name: &'static str,
    /// Capabilities of this endpoint
    pub capabilities: LlmCapabilities,
}

impl Debug for OpenAiCompatibleConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("OpenAiCompatibleConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("default_model", &self.default_model)
            .field("provider_name", &self.provider_name)
            .finish_non_exhaustive()
    }
}

impl OpenAiCompatibleConfig {
    /// Configuration for the `OpenAI` API
    #[must_use]
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            base_url: OPENAI_BASE_URL.to_owned(),
            api_key: Some(api_key.into()),
            default_model: OPENAI_DEFAULT_MODEL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            provider_name: "openai",
            display_name: "OpenAI",
            capabilities: LlmCapabilities::JSON_MODE | LlmCapabilities::SYSTEM_MESSAGES,
        }
    }

    /// Configuration for Groq's `OpenAI`-compatible API
    #[must_use]
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self {
            base_url: GROQ_BASE_URL.to_owned(),
            api_key: Some(api_key.into()),
            default_model: GROQ_DEFAULT_MODEL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            provider_name: "groq",
            display_name: "Groq",
            capabilities: LlmCapabilities::JSON_MODE | LlmCapabilities::SYSTEM_MESSAGES,
        }
    }

    /// Configuration for a local `OpenAI`-compatible server
    #[must_use]
    pub fn local(api_key: Option<String>) -> Self {
        Self {
            base_url: LOCAL_BASE_URL.to_owned(),
            api_key: api_key.filter(|key| !key.is_empty()),
            default_model: LOCAL_DEFAULT_MODEL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            provider_name: "local",
            display_name: "Local LLM",
            capabilities: LlmCapabilities::SYSTEM_MESSAGES,
        }
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Generic `OpenAI`-compatible recipe provider
#[derive(Debug)]
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a provider from a configuration and a shared HTTP client
    #[must_use]
    pub const fn new(config: OpenAiCompatibleConfig, client: Client) -> Self {
        Self { client, config }
    }

    /// The configuration this provider was built from
    #[must_use]
    pub const fn config(&self) -> &OpenAiCompatibleConfig {
        &self.config
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    fn build_request<'a>(&'a self, prompt: &'a RecipePrompt) -> OpenAiRequest<'a> {
        let messages = if self.config.capabilities.supports_system_messages() {
            vec![
                OpenAiMessage {
                    role: "system",
                    content: Cow::Borrowed(&prompt.system_text),
                },
                OpenAiMessage {
                    role: "user",
                    content: Cow::Borrowed(&prompt.instruction_text),
                },
            ]
        } else {
            vec![OpenAiMessage {
                role: "user",
                content: Cow::Owned(prompt.combined_text()),
            }]
        };

        let response_format = self
            .config
            .capabilities
            .supports_json_mode()
            .then_some(ResponseFormat {
                format_type: "json_object",
            });

        OpenAiRequest {
            model: &self.config.default_model,
            messages,
            temperature: self.config.temperature,
            response_format,
        }
    }
}

impl EnvelopeExtractor for OpenAiCompatibleProvider {
    fn provider_name(&self) -> &str {
        self.config.provider_name
    }

    fn extract_candidate_text(&self, raw: &RawResponse) -> Result<String, GenerationError> {
        let provider = self.config.provider_name;
        check_envelope(provider, raw)?;
        let body = json_body(provider, raw)?;

        let response = OpenAiResponse::deserialize(body).map_err(|e| {
            GenerationError::malformed_envelope(provider, format!("unexpected shape: {e}"))
        })?;

        let choice = response.choices.first().ok_or_else(|| {
            GenerationError::malformed_envelope(provider, "'choices' is missing or empty")
        })?;
        let message = choice.message.as_ref();

        if let Some(refusal) = message
            .and_then(|m| m.refusal.as_deref())
            .filter(|refusal| !refusal.trim().is_empty())
        {
            return Err(GenerationError::provider(
                provider,
                ProviderFailureKind::Blocked,
                refusal,
                None,
            ));
        }

        let content = message.and_then(|m| m.content.as_deref());
        if content.is_none_or(|text| text.trim().is_empty())
            && choice.finish_reason.as_deref() == Some("content_filter")
        {
            return Err(GenerationError::provider(
                provider,
                ProviderFailureKind::Blocked,
                format!("{} filtered the generated recipe", self.config.display_name),
                None,
            ));
        }

        required_text(provider, content, "choices[0].message.content")
    }
}

#[async_trait]
impl RecipeProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        self.config.provider_name
    }

    fn display_name(&self) -> &'static str {
        self.config.display_name
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.config.capabilities
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, prompt), fields(provider = self.config.provider_name, model = %self.config.default_model))]
    async fn generate(&self, prompt: &RecipePrompt) -> Result<RawResponse, GenerationError> {
        let request = self.build_request(prompt);
        debug!(
            json_mode = request.response_format.is_some(),
            "Sending chat completion request"
        );

        let mut builder = self
            .client
            .post(self.api_url("chat/completions"))
            .json(&request);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        send(self.config.provider_name, builder).await
    }
}
