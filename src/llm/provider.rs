// ABOUTME: Configured recipe provider selected once at startup
// ABOUTME: Enum dispatch over Gemini, OpenAI-compatible and Ollama providers sharing one HTTP client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

//! # Provider Selector
//!
//! Builds the provider named by [`LlmConfig`] exactly once. The result is
//! handed to the generator as `Arc<dyn RecipeProvider>`; nothing else in the
//! crate holds a provider.
//!
//! ## Configuration
//!
//! Set `RECIPE_LLM_PROVIDER`:
//! - `gemini` (default): `GeminiProvider` (requires `GEMINI_API_KEY`)
//! - `openai`: `OpenAiCompatibleProvider` (requires `OPENAI_API_KEY`)
//! - `groq`: `OpenAiCompatibleProvider` (requires `GROQ_API_KEY`)
//! - `local`: `OpenAiCompatibleProvider` against a local server
//! - `ollama`: `OllamaProvider`

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::{
    build_http_client, EnvelopeExtractor, GeminiProvider, LlmCapabilities, OllamaProvider,
    OpenAiCompatibleConfig, OpenAiCompatibleProvider, RawResponse, RecipeProvider,
};
use crate::config::{LlmConfig, LlmProviderType};
use crate::errors::{AppError, AppResult, GenerationError};
use crate::prompts::RecipePrompt;

/// The provider chosen by configuration
#[derive(Debug)]
pub enum ConfiguredProvider {
    /// Google Gemini with schema-constrained output
    Gemini(GeminiProvider),
    /// `OpenAI`, Groq or a local `OpenAI`-compatible server
    OpenAiCompatible(OpenAiCompatibleProvider),
    /// Ollama's native generate API
    Ollama(OllamaProvider),
}

impl ConfiguredProvider {
    /// Build the configured provider and its HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is incomplete or the HTTP
    /// client cannot be created.
    pub fn from_config(config: &LlmConfig) -> AppResult<Self> {
        config.validate()?;

        info!(
            "Initializing LLM provider: {} (set {} to change)",
            config.provider,
            LlmProviderType::ENV_VAR
        );

        let client = build_http_client(&config.http)?;
        let provider = Self::create_provider(config, client)?;

        debug!(
            "Provider {} initialized with model: {}",
            provider.display_name(),
            provider.default_model()
        );
        Ok(provider)
    }

    fn create_provider(config: &LlmConfig, client: Client) -> AppResult<Self> {
        match config.provider {
            LlmProviderType::Gemini => {
                let mut provider = GeminiProvider::new(required_key(config)?, client)
                    .with_temperature(config.temperature);
                if let Some(model) = &config.model {
                    provider = provider.with_default_model(model);
                }
                if let Some(base_url) = &config.base_url {
                    provider = provider.with_base_url(base_url);
                }
                Ok(Self::Gemini(provider))
            }
            LlmProviderType::OpenAi => Ok(Self::openai_compatible(
                OpenAiCompatibleConfig::openai(required_key(config)?),
                config,
                client,
            )),
            LlmProviderType::Groq => Ok(Self::openai_compatible(
                OpenAiCompatibleConfig::groq(required_key(config)?),
                config,
                client,
            )),
            LlmProviderType::Local => Ok(Self::openai_compatible(
                OpenAiCompatibleConfig::local(config.api_key.clone()),
                config,
                client,
            )),
            LlmProviderType::Ollama => {
                let mut provider = OllamaProvider::new(client).with_temperature(config.temperature);
                if let Some(model) = &config.model {
                    provider = provider.with_default_model(model);
                }
                if let Some(base_url) = &config.base_url {
                    provider = provider.with_base_url(base_url);
                }
                Ok(Self::Ollama(provider))
            }
        }
    }

    fn openai_compatible(
        mut preset: OpenAiCompatibleConfig,
        config: &LlmConfig,
        client: Client,
    ) -> Self {
        preset.temperature = config.temperature;
        if let Some(model) = &config.model {
            preset.default_model.clone_from(model);
        }
        if let Some(base_url) = &config.base_url {
            preset.base_url.clone_from(base_url);
        }
        Self::OpenAiCompatible(OpenAiCompatibleProvider::new(preset, client))
    }

    fn inner(&self) -> &dyn RecipeProvider {
        match self {
            Self::Gemini(provider) => provider,
            Self::OpenAiCompatible(provider) => provider,
            Self::Ollama(provider) => provider,
        }
    }
}

fn required_key(config: &LlmConfig) -> AppResult<String> {
    config.api_key.clone().ok_or_else(|| {
        AppError::config_missing(format!("No API key for the {} provider", config.provider))
    })
}

impl EnvelopeExtractor for ConfiguredProvider {
    fn provider_name(&self) -> &str {
        self.inner().provider_name()
    }

    fn extract_candidate_text(&self, raw: &RawResponse) -> Result<String, GenerationError> {
        self.inner().extract_candidate_text(raw)
    }
}

#[async_trait]
impl RecipeProvider for ConfiguredProvider {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn display_name(&self) -> &'static str {
        self.inner().display_name()
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.inner().capabilities()
    }

    fn default_model(&self) -> &str {
        self.inner().default_model()
    }

    async fn generate(&self, prompt: &RecipePrompt) -> Result<RawResponse, GenerationError> {
        self.inner().generate(prompt).await
    }
}
