// ABOUTME: Native Ollama provider using raw-text generation
// ABOUTME: Calls /api/generate with a JSON schema format and extracts the top-level response field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

//! # Ollama Provider
//!
//! Talks to Ollama's own `/api/generate` endpoint rather than its
//! `OpenAI`-compatible layer, because the native API accepts a JSON schema in
//! `format` and constrains generation to it. Streaming is disabled, so the
//! whole text arrives in one `response` field.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use super::envelope::{check_envelope, json_body, required_text};
use super::http::send;
use super::{EnvelopeExtractor, LlmCapabilities, RawResponse, RecipeProvider};
use crate::constants::generation::DEFAULT_TEMPERATURE;
use crate::constants::providers::{OLLAMA_BASE_URL, OLLAMA_DEFAULT_MODEL};
use crate::errors::GenerationError;
use crate::prompts::RecipePrompt;

const PROVIDER_NAME: &str = "ollama";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    format: Value,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

/// Ollama recipe provider
#[derive(Debug)]
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    default_model: String,
    temperature: f32,
}

impl OllamaProvider {
    /// Create a provider for the default local Ollama server
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: OLLAMA_BASE_URL.to_owned(),
            default_model: OLLAMA_DEFAULT_MODEL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Set a custom default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Point at a different Ollama server
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

    fn build_request<'a>(&'a self, prompt: &'a RecipePrompt) -> GenerateRequest<'a> {
        GenerateRequest {
            model: &self.default_model,
            system: &prompt.system_text,
            prompt: &prompt.instruction_text,
            format: prompt.output_schema.to_json_schema(),
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
            },
        }
    }
}

impl EnvelopeExtractor for OllamaProvider {
    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }

    fn extract_candidate_text(&self, raw: &RawResponse) -> Result<String, GenerationError> {
        check_envelope(PROVIDER_NAME, raw)?;
        let body = json_body(PROVIDER_NAME, raw)?;

        let response = GenerateResponse::deserialize(body).map_err(|e| {
            GenerationError::malformed_envelope(PROVIDER_NAME, format!("unexpected shape: {e}"))
        })?;

        required_text(PROVIDER_NAME, response.response.as_deref(), "response")
    }
}

#[async_trait]
impl RecipeProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn display_name(&self) -> &'static str {
        "Ollama"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::structured()
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, prompt), fields(model = %self.default_model))]
    async fn generate(&self, prompt: &RecipePrompt) -> Result<RawResponse, GenerationError> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));
        debug!(url = %url, "Sending generate request to Ollama");

        send(
            PROVIDER_NAME,
            self.client.post(url).json(&self.build_request(prompt)),
        )
        .await
    }
}
