// ABOUTME: Fake recipe provider for tests and offline runs
// ABOUTME: Replays canned responses in order and records every prompt it receives
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

//! Fake provider for testing.
//!
//! Replies are consumed in order; once the queue is empty the default reply,
//! if any, is returned for every further call. Envelope extraction follows
//! [`DirectEnvelope`](super::DirectEnvelope), so canned responses are the
//! recipe text itself (or a provider-style failure body).

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use super::{DirectEnvelope, EnvelopeExtractor, LlmCapabilities, RawResponse, RecipeProvider};
use crate::errors::GenerationError;
use crate::prompts::RecipePrompt;

const PROVIDER_NAME: &str = "fake";

/// One scripted outcome of a `generate` call
#[derive(Debug, Clone)]
pub enum FakeReply {
    /// A response was received
    Response(RawResponse),
    /// The transport failed with this message
    NetworkFailure(String),
}

impl FakeReply {
    /// A successful plain-text response
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Response(RawResponse::text(text))
    }
}

/// Deterministic in-process provider
#[derive(Debug)]
pub struct FakeProvider {
    replies: Mutex<VecDeque<FakeReply>>,
    default_reply: Option<FakeReply>,
    prompts: Mutex<Vec<RecipePrompt>>,
    extractor: DirectEnvelope,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeProvider {
    /// Create a provider with no scripted replies
    #[must_use]
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            default_reply: None,
            prompts: Mutex::new(Vec::new()),
            extractor: DirectEnvelope::new(PROVIDER_NAME),
        }
    }

    /// Create a provider that always answers with `text`
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new().with_default_reply(FakeReply::text(text))
    }

    /// Queue a reply
    #[must_use]
    pub fn with_reply(self, reply: FakeReply) -> Self {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
        self
    }

    /// Reply used once the queue is exhausted
    #[must_use]
    pub fn with_default_reply(mut self, reply: FakeReply) -> Self {
        self.default_reply = Some(reply);
        self
    }

    /// Prompts received so far, oldest first
    #[must_use]
    pub fn recorded_prompts(&self) -> Vec<RecipePrompt> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of `generate` calls so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn next_reply(&self) -> Option<FakeReply> {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .or_else(|| self.default_reply.clone())
    }
}

impl EnvelopeExtractor for FakeProvider {
    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }

    fn extract_candidate_text(&self, raw: &RawResponse) -> Result<String, GenerationError> {
        self.extractor.extract_candidate_text(raw)
    }
}

#[async_trait]
impl RecipeProvider for FakeProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn display_name(&self) -> &'static str {
        "Fake Provider"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::structured()
    }

    fn default_model(&self) -> &str {
        "fake-model"
    }

    async fn generate(&self, prompt: &RecipePrompt) -> Result<RawResponse, GenerationError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.clone());

        match self.next_reply() {
            Some(FakeReply::Response(response)) => {
                debug!("FakeProvider returning canned response");
                Ok(response)
            }
            Some(FakeReply::NetworkFailure(message)) => Err(GenerationError::network(message)),
            None => Err(GenerationError::network(
                "FakeProvider: no response configured",
            )),
        }
    }
}
