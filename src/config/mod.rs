// ABOUTME: Configuration management for provider selection, HTTP transport and local storage
// ABOUTME: Reads environment variables once at startup and rejects incomplete setups early
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

//! Configuration module for the recipe generator
//!
//! All settings come from environment variables read once at startup:
//!
//! - **LLM**: `RECIPE_LLM_PROVIDER`, `RECIPE_LLM_MODEL`,
//!   `RECIPE_LLM_TEMPERATURE`, `RECIPE_LLM_BASE_URL`, and an API key from
//!   `RECIPE_LLM_API_KEY` or the provider's own variable (`GEMINI_API_KEY`,
//!   `OPENAI_API_KEY`, `GROQ_API_KEY`, `LOCAL_LLM_API_KEY`)
//! - **HTTP**: `RECIPE_HTTP_TIMEOUT_SECS`, `RECIPE_HTTP_CONNECT_TIMEOUT_SECS`
//! - **Storage**: `RECIPE_DATA_DIR`
//!
//! Every loader has a `from_lookup` twin taking a variable lookup function,
//! which is how command-line flags are layered over the environment.
//! Missing keys and unparsable values fail here, never at request time.

use std::env;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::debug;

/// Provider selection types
pub mod types;

pub use types::LlmProviderType;

use crate::constants::generation::DEFAULT_TEMPERATURE;
use crate::constants::http::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::constants::service::DATA_DIR_NAME;
use crate::errors::{AppError, AppResult};

/// Environment variable for the favorites data directory
pub const DATA_DIR_ENV_VAR: &str = "RECIPE_DATA_DIR";

/// Environment variable for the whole-request timeout
pub const HTTP_TIMEOUT_ENV_VAR: &str = "RECIPE_HTTP_TIMEOUT_SECS";

/// Environment variable for the connect timeout
pub const HTTP_CONNECT_TIMEOUT_ENV_VAR: &str = "RECIPE_HTTP_CONNECT_TIMEOUT_SECS";

/// Highest temperature any supported provider accepts
const MAX_TEMPERATURE: f32 = 2.0;

fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Look up a variable, treating blank values as unset
fn lookup_non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_var<F, T>(lookup: &F, key: &str) -> AppResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup_non_empty(lookup, key)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| {
                AppError::config_invalid(format!("{key} has an invalid value '{raw}': {e}"))
            })
        })
        .transpose()
}

fn parse_timeout<F>(lookup: &F, key: &str, default_secs: u64) -> AppResult<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    match parse_var::<F, u64>(lookup, key)? {
        Some(0) => Err(AppError::config_invalid(format!(
            "{key} must be greater than zero"
        ))),
        Some(secs) => Ok(Duration::from_secs(secs)),
        None => Ok(Duration::from_secs(default_secs)),
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// Timeouts for the shared HTTP client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpConfig {
    /// Limit for a whole request, body included
    pub request_timeout: Duration,
    /// Limit for establishing the connection
    pub connect_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl HttpConfig {
    /// Load from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a timeout is not a positive integer.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(&env_lookup)
    }

    /// Load using a custom variable lookup
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a timeout is not a positive integer.
    pub fn from_lookup<F>(lookup: &F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            request_timeout: parse_timeout(
                lookup,
                HTTP_TIMEOUT_ENV_VAR,
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            connect_timeout: parse_timeout(
                lookup,
                HTTP_CONNECT_TIMEOUT_ENV_VAR,
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        })
    }
}

// ============================================================================
// LLM
// ============================================================================

/// Provider settings
#[derive(Clone, PartialEq)]
pub struct LlmConfig {
    /// Selected provider
    pub provider: LlmProviderType,
    /// Model override; `None` uses the provider default
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
    /// Base URL override; `None` uses the provider default
    pub base_url: Option<String>,
    /// API key, when the provider takes one
    pub api_key: Option<String>,
    /// HTTP client settings
    pub http: HttpConfig,
}

impl Debug for LlmConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("http", &self.http)
            .finish()
    }
}

impl LlmConfig {
    /// Defaults for `provider`, without an API key
    #[must_use]
    pub fn for_provider(provider: LlmProviderType) -> Self {
        Self {
            provider,
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            base_url: None,
            api_key: None,
            http: HttpConfig::default(),
        }
    }

    /// Set the API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Load from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the provider is unknown, a number
    /// does not parse, or a cloud provider has no API key.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(&env_lookup)
    }

    /// Load using a custom variable lookup
    ///
    /// # Errors
    ///
    /// Same as [`LlmConfig::from_env`].
    pub fn from_lookup<F>(lookup: &F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = lookup_non_empty(lookup, LlmProviderType::ENV_VAR)
            .map(|raw| raw.parse::<LlmProviderType>())
            .transpose()?
            .unwrap_or_default();

        let temperature = parse_var::<F, f32>(lookup, LlmProviderType::TEMPERATURE_ENV_VAR)?
            .unwrap_or(DEFAULT_TEMPERATURE);

        let api_key = lookup_non_empty(lookup, LlmProviderType::API_KEY_ENV_VAR).or_else(|| {
            provider
                .api_key_env_var()
                .and_then(|key| lookup_non_empty(lookup, key))
        });

        let config = Self {
            provider,
            model: lookup_non_empty(lookup, LlmProviderType::MODEL_ENV_VAR),
            temperature,
            base_url: lookup_non_empty(lookup, LlmProviderType::BASE_URL_ENV_VAR),
            api_key,
            http: HttpConfig::from_lookup(lookup)?,
        };
        config.validate()?;

        debug!(
            provider = %config.provider,
            model = config.model.as_deref().unwrap_or("default"),
            "Loaded LLM configuration"
        );
        Ok(config)
    }

    /// Check the settings a provider cannot work without
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when a cloud provider has no API key and
    /// `ConfigInvalid` when the temperature is out of range.
    pub fn validate(&self) -> AppResult<()> {
        if !self.temperature.is_finite() || !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(AppError::config_invalid(format!(
                "{} must be between 0 and {MAX_TEMPERATURE}, got {}",
                LlmProviderType::TEMPERATURE_ENV_VAR,
                self.temperature
            )));
        }

        if self.provider.requires_api_key() && self.api_key.is_none() {
            let provider_var = self.provider.api_key_env_var().unwrap_or_default();
            return Err(AppError::config_missing(format!(
                "No API key for the {} provider. Set {provider_var} or {}",
                self.provider,
                LlmProviderType::API_KEY_ENV_VAR
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Application
// ============================================================================

/// Complete application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeConfig {
    /// Provider settings
    pub llm: LlmConfig,
    /// Directory holding the favorites store
    pub data_dir: PathBuf,
}

impl RecipeConfig {
    /// Load from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any setting is missing or invalid.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(&env_lookup)
    }

    /// Load using a custom variable lookup
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any setting is missing or invalid.
    pub fn from_lookup<F>(lookup: &F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            llm: LlmConfig::from_lookup(lookup)?,
            data_dir: data_dir_from_lookup(lookup)?,
        })
    }
}

/// Resolve the favorites data directory
///
/// # Errors
///
/// Returns `ConfigMissing` when `RECIPE_DATA_DIR` is unset and the platform
/// has no data directory.
pub fn data_dir_from_lookup<F>(lookup: &F) -> AppResult<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    lookup_non_empty(lookup, DATA_DIR_ENV_VAR)
        .map(PathBuf::from)
        .or_else(|| dirs::data_dir().map(|dir| dir.join(DATA_DIR_NAME)))
        .ok_or_else(|| {
            AppError::config_missing(format!(
                "Could not determine a data directory. Set {DATA_DIR_ENV_VAR}"
            ))
        })
}
