// ABOUTME: LLM provider abstraction layer for recipe generation
// ABOUTME: Defines RawResponse, the envelope extraction seam, and the RecipeProvider contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

//! # Recipe Provider Interface
//!
//! Every provider integration does two things:
//!
//! - **transport**: [`RecipeProvider::generate`] serializes a [`RecipePrompt`]
//!   the way its API expects and returns whatever came back as a
//!   [`RawResponse`]. Only transport failures are errors at this stage; a
//!   non-2xx status is data for the next step.
//! - **extraction**: [`EnvelopeExtractor::extract_candidate_text`] finds the
//!   generated text inside the provider's envelope, turning provider-reported
//!   failures into `GenerationError::Provider`.
//!
//! The response interpreter only ever talks to the extractor, so no provider
//! envelope shape leaks into JSON parsing or recipe validation.
//!
//! ## Key Concepts
//!
//! - **`LlmCapabilities`**: bitflags describing what the provider supports
//! - **`ConfiguredProvider`**: the provider selected from configuration
//! - **`DirectEnvelope`**: extractor for payloads that already are the recipe
//! - **`FakeProvider`**: deterministic in-process provider for tests

mod direct;
pub mod envelope;
mod fake;
mod gemini;
mod http;
mod ollama;
mod openai_compatible;
mod provider;

pub use direct::DirectEnvelope;
pub use fake::{FakeProvider, FakeReply};
pub use gemini::GeminiProvider;
pub use http::build_http_client;
pub use ollama::OllamaProvider;
pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};
pub use provider::ConfiguredProvider;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::GenerationError;
use crate::prompts::RecipePrompt;

// ============================================================================
// Capability Flags
// ============================================================================

bitflags::bitflags! {
    /// Provider capability flags
    ///
    /// Decide how a prompt is framed: whether the persona goes in a system
    /// message and whether the output shape can be enforced by the API.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LlmCapabilities: u8 {
        /// Provider can be told to emit a JSON object
        const JSON_MODE = 0b0000_0001;
        /// Provider enforces a caller-supplied output schema
        const STRUCTURED_OUTPUT = 0b0000_0010;
        /// Provider supports system messages
        const SYSTEM_MESSAGES = 0b0000_0100;
    }
}

impl LlmCapabilities {
    /// Capabilities of a schema-constrained generation API
    #[must_use]
    pub const fn structured() -> Self {
        Self::JSON_MODE
            .union(Self::STRUCTURED_OUTPUT)
            .union(Self::SYSTEM_MESSAGES)
    }

    /// Check if JSON mode is supported
    #[must_use]
    pub const fn supports_json_mode(&self) -> bool {
        self.contains(Self::JSON_MODE)
    }

    /// Check if a response schema can be enforced
    #[must_use]
    pub const fn supports_structured_output(&self) -> bool {
        self.contains(Self::STRUCTURED_OUTPUT)
    }

    /// Check if system messages are supported
    #[must_use]
    pub const fn supports_system_messages(&self) -> bool {
        self.contains(Self::SYSTEM_MESSAGES)
    }
}

// ============================================================================
// Raw Responses
// ============================================================================

/// Body of a provider response, as received
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    /// Body that did not parse as JSON
    Text(String),
    /// Body that parsed as JSON
    Json(Value),
}

/// A provider response before any interpretation
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status, when the response came over HTTP
    pub http_status: Option<u16>,
    /// Delay from a `Retry-After` header
    pub retry_after: Option<Duration>,
    /// Response body
    pub payload: RawPayload,
}

impl RawResponse {
    /// Wrap a plain-text payload with no transport metadata
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            http_status: None,
            retry_after: None,
            payload: RawPayload::Text(text.into()),
        }
    }

    /// Wrap an already-parsed JSON payload with no transport metadata
    #[must_use]
    pub const fn json(value: Value) -> Self {
        Self {
            http_status: None,
            retry_after: None,
            payload: RawPayload::Json(value),
        }
    }

    /// Build from an HTTP exchange
    ///
    /// JSON bodies are kept parsed, anything else is kept as text. The
    /// `Retry-After` header is honored when it is a number of seconds.
    #[must_use]
    pub fn from_http(status: u16, retry_after_header: Option<&str>, body: String) -> Self {
        let payload = serde_json::from_str::<Value>(&body)
            .map_or_else(|_| RawPayload::Text(body), RawPayload::Json);
        Self {
            http_status: Some(status),
            retry_after: retry_after_header.and_then(envelope::parse_seconds),
            payload,
        }
    }

    /// Whether the HTTP status, if any, is a success status
    #[must_use]
    pub fn is_http_success(&self) -> bool {
        self.http_status
            .is_none_or(|status| (200..300).contains(&status))
    }
}

// ============================================================================
// Provider Traits
// ============================================================================

/// Finds the generated text inside a provider's response envelope
pub trait EnvelopeExtractor: Send + Sync {
    /// Provider identifier used in error messages
    fn provider_name(&self) -> &str;

    /// Extract the candidate text
    ///
    /// # Errors
    ///
    /// - `Provider` when the response reports a non-success status
    /// - `EmptyInput` when the payload is empty
    /// - `MalformedEnvelope` when the expected field is absent or empty
    fn extract_candidate_text(&self, raw: &RawResponse) -> Result<String, GenerationError>;
}

/// A recipe text generation backend
#[async_trait]
pub trait RecipeProvider: EnvelopeExtractor {
    /// Unique provider identifier (e.g., "gemini", "openai", "ollama")
    fn name(&self) -> &'static str;

    /// Human-readable display name for the provider
    fn display_name(&self) -> &'static str;

    /// Provider capabilities
    fn capabilities(&self) -> LlmCapabilities;

    /// Model used for generation
    fn default_model(&self) -> &str;

    /// Send one prompt and return the raw response
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Network` when no response was received.
    async fn generate(&self, prompt: &RecipePrompt) -> Result<RawResponse, GenerationError>;
}
