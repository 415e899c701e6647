// ABOUTME: Classified failures of a single recipe generation cycle
// ABOUTME: Every provider call ends in a Recipe or exactly one GenerationError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

//! # Generation Error Types
//!
//! - `GenerationError` - the failure taxonomy surfaced to the UI layer
//! - `ProviderFailureKind` - finer classification of provider-reported failures
//!
//! None of these are retried internally. Each carries a message suitable
//! for direct display.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use super::ErrorCode;
use crate::constants::diagnostics::MAX_SNIPPET_CHARS;

/// What kind of non-success the provider reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderFailureKind {
    /// Too many requests in a short window
    RateLimited,
    /// Usage quota or billing limit exhausted
    QuotaExceeded,
    /// API key missing, invalid, or lacking permission
    Unauthorized,
    /// Provider rejected the request itself (bad model name, bad parameters)
    InvalidRequest,
    /// Content was blocked or refused by the provider
    Blocked,
    /// Provider is overloaded or temporarily down
    Unavailable,
    /// Anything the provider did not let us classify
    Other,
}

impl ProviderFailureKind {
    /// Short label used in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RateLimited => "rate_limited",
            Self::QuotaExceeded => "quota_exceeded",
            Self::Unauthorized => "unauthorized",
            Self::InvalidRequest => "invalid_request",
            Self::Blocked => "blocked",
            Self::Unavailable => "unavailable",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ProviderFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of one recipe generation request/response cycle
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Request rejected locally, the provider was never contacted
    #[error("{reason}")]
    InvalidRequest {
        /// Why the request was rejected
        reason: String,
    },
    /// No candidate text was found in the provider response
    #[error("The recipe provider returned an empty response")]
    EmptyInput,
    /// The provider envelope lacked the field carrying generated text
    #[error("Unexpected response from {provider}: {detail}")]
    MalformedEnvelope {
        /// Provider whose envelope rules were applied
        provider: String,
        /// What was missing or unexpected
        detail: String,
    },
    /// Candidate text could not be parsed as JSON
    #[error("The recipe provider returned invalid JSON ({source}): {snippet}")]
    InvalidJson {
        /// Offending text, truncated for diagnostics
        snippet: String,
        /// Underlying parser error
        #[source]
        source: serde_json::Error,
    },
    /// Parsed JSON did not have the recipe shape
    #[error("The generated recipe has an invalid '{field}' field: {reason}")]
    SchemaViolation {
        /// First missing or mistyped field, in the fixed check order
        field: String,
        /// What was wrong with it
        reason: String,
    },
    /// The provider explicitly reported a non-success status
    #[error("{message}{}", retry_suffix(.retry_after))]
    Provider {
        /// Provider that reported the failure
        provider: String,
        /// Classification of the failure
        kind: ProviderFailureKind,
        /// Provider message, preserved verbatim
        message: String,
        /// How long the provider asked us to wait, if it said
        retry_after: Option<Duration>,
    },
    /// Transport-level failure (connection refused, timeout, broken body)
    #[error("Could not reach the recipe provider: {message}")]
    Network {
        /// Transport error description
        message: String,
    },
}

impl GenerationError {
    /// Create an "invalid request" error
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Create a "malformed envelope" error
    #[must_use]
    pub fn malformed_envelope(provider: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MalformedEnvelope {
            provider: provider.into(),
            detail: detail.into(),
        }
    }

    /// Create an "invalid JSON" error, truncating the offending text
    #[must_use]
    pub fn invalid_json(text: &str, source: serde_json::Error) -> Self {
        Self::InvalidJson {
            snippet: truncate_snippet(text),
            source,
        }
    }

    /// Create a "schema violation" error
    #[must_use]
    pub fn schema_violation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaViolation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a provider-reported error
    #[must_use]
    pub fn provider(
        provider: impl Into<String>,
        kind: ProviderFailureKind,
        message: impl Into<String>,
        retry_after: Option<Duration>,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            kind,
            message: message.into(),
            retry_after,
        }
    }

    /// Create a transport error
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Retry delay requested by the provider, if any
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Provider { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Application error code for this failure
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidRequest { .. } => ErrorCode::InvalidInput,
            Self::EmptyInput => ErrorCode::EmptyResponse,
            Self::MalformedEnvelope { .. } => ErrorCode::MalformedEnvelope,
            Self::InvalidJson { .. } => ErrorCode::InvalidJson,
            Self::SchemaViolation { .. } => ErrorCode::SchemaViolation,
            Self::Provider { kind, .. } => match kind {
                ProviderFailureKind::RateLimited | ProviderFailureKind::QuotaExceeded => {
                    ErrorCode::ExternalRateLimited
                }
                ProviderFailureKind::Unauthorized => ErrorCode::ExternalAuthFailed,
                ProviderFailureKind::Unavailable => ErrorCode::ExternalServiceUnavailable,
                ProviderFailureKind::InvalidRequest
                | ProviderFailureKind::Blocked
                | ProviderFailureKind::Other => ErrorCode::ExternalServiceError,
            },
            Self::Network { .. } => ErrorCode::ExternalServiceUnavailable,
        }
    }
}

/// " (retry after N seconds)" with N rounded up, or nothing
#[allow(clippy::ref_option)]
fn retry_suffix(retry_after: &Option<Duration>) -> String {
    retry_after.map_or_else(String::new, |delay| {
        let seconds = delay.as_secs() + u64::from(delay.subsec_nanos() > 0);
        format!(" (retry after {seconds} seconds)")
    })
}

/// Truncate provider text for inclusion in diagnostics
#[must_use]
pub fn truncate_snippet(text: &str) -> String {
    let mut chars = text.chars();
    let snippet: String = chars.by_ref().take(MAX_SNIPPET_CHARS).collect();
    if chars.next().is_some() {
        format!("{snippet}...")
    } else {
        snippet
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_truncate_snippet_short_text_untouched() {
        assert_eq!(truncate_snippet("not json"), "not json");
    }

    #[test]
    fn test_truncate_snippet_long_text() {
        let long = "x".repeat(MAX_SNIPPET_CHARS + 50);
        let snippet = truncate_snippet(&long);
        assert_eq!(snippet.len(), MAX_SNIPPET_CHARS + 3);
        assert!(snippet.ends_with("..."));
    }

    #[test]
    fn test_provider_display_rounds_retry_up() {
        let error = GenerationError::provider(
            "gemini",
            ProviderFailureKind::RateLimited,
            "Quota exceeded",
            Some(Duration::from_millis(6400)),
        );
        assert_eq!(error.to_string(), "Quota exceeded (retry after 7 seconds)");
        assert_eq!(error.retry_after(), Some(Duration::from_millis(6400)));
    }

    #[test]
    fn test_provider_display_without_retry_is_message_only() {
        let whole = GenerationError::provider(
            "openai",
            ProviderFailureKind::Unauthorized,
            "Invalid API key",
            None,
        );
        assert_eq!(whole.to_string(), "Invalid API key");

        let exact = GenerationError::provider(
            "ollama",
            ProviderFailureKind::Unavailable,
            "Busy",
            Some(Duration::from_secs(5)),
        );
        assert_eq!(exact.to_string(), "Busy (retry after 5 seconds)");
    }

    #[test]
    fn test_invalid_json_exposes_source() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error = GenerationError::invalid_json("not json", source);
        assert!(error.source().is_some());
        assert_eq!(error.error_code(), ErrorCode::InvalidJson);
    }
}
