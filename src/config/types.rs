// ABOUTME: Core configuration type definitions for provider selection
// ABOUTME: Contains the LlmProviderType enum and the environment variable names it reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// LLM provider selection for recipe generation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderType {
    /// Google Gemini with schema-constrained output (default)
    #[default]
    Gemini,
    /// `OpenAI` chat completions
    #[serde(rename = "openai")]
    OpenAi,
    /// Groq's `OpenAI`-compatible API
    Groq,
    /// Local `OpenAI`-compatible server (vLLM, `LocalAI`, Ollama's /v1)
    Local,
    /// Ollama's native generate API
    Ollama,
}

impl LlmProviderType {
    /// Environment variable name for LLM provider selection
    pub const ENV_VAR: &'static str = "RECIPE_LLM_PROVIDER";

    /// Environment variable for model selection
    pub const MODEL_ENV_VAR: &'static str = "RECIPE_LLM_MODEL";

    /// Environment variable for the sampling temperature
    pub const TEMPERATURE_ENV_VAR: &'static str = "RECIPE_LLM_TEMPERATURE";

    /// Environment variable overriding the provider base URL
    pub const BASE_URL_ENV_VAR: &'static str = "RECIPE_LLM_BASE_URL";

    /// Environment variable for an API key that applies to any provider
    pub const API_KEY_ENV_VAR: &'static str = "RECIPE_LLM_API_KEY";

    /// Every provider, in the order shown to users
    pub const ALL: [Self; 5] = [
        Self::Gemini,
        Self::OpenAi,
        Self::Groq,
        Self::Local,
        Self::Ollama,
    ];

    /// Identifier used in configuration and on the command line
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::Groq => "groq",
            Self::Local => "local",
            Self::Ollama => "ollama",
        }
    }

    /// Provider-specific API key variable, if the provider takes a key
    #[must_use]
    pub const fn api_key_env_var(&self) -> Option<&'static str> {
        match self {
            Self::Gemini => Some("GEMINI_API_KEY"),
            Self::OpenAi => Some("OPENAI_API_KEY"),
            Self::Groq => Some("GROQ_API_KEY"),
            Self::Local => Some("LOCAL_LLM_API_KEY"),
            Self::Ollama => None,
        }
    }

    /// Whether generation is impossible without an API key
    #[must_use]
    pub const fn requires_api_key(&self) -> bool {
        matches!(self, Self::Gemini | Self::OpenAi | Self::Groq)
    }
}

impl Display for LlmProviderType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for LlmProviderType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            "groq" => Ok(Self::Groq),
            "local" | "vllm" | "localai" => Ok(Self::Local),
            "ollama" => Ok(Self::Ollama),
            other => Err(AppError::config_invalid(format!(
                "Unknown LLM provider '{other}' in {}. Choose one of: gemini, openai, groq, local, ollama",
                Self::ENV_VAR
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Google".parse::<LlmProviderType>().unwrap(), LlmProviderType::Gemini);
        assert_eq!(" vllm ".parse::<LlmProviderType>().unwrap(), LlmProviderType::Local);
        assert!("anthropic".parse::<LlmProviderType>().is_err());
    }

    #[test]
    fn test_display_round_trips_all() {
        for provider in LlmProviderType::ALL {
            assert_eq!(provider.to_string().parse::<LlmProviderType>().unwrap(), provider);
        }
    }
}
