// ABOUTME: Unified error handling with standard error codes for the recipe generator
// ABOUTME: Defines AppError, ErrorCode, and re-exports the classified GenerationError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

//! # Unified Error Handling System
//!
//! `AppError` is what crosses module boundaries at the application level
//! (configuration, storage, CLI). A single generation cycle fails with the
//! more precise [`GenerationError`], which converts into `AppError` without
//! losing its human-readable message.

mod generation;

pub use generation::{truncate_snippet, GenerationError, ProviderFailureKind};

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Caller supplied invalid input
    InvalidInput = 3000,

    // Resource Management (4000-4999)
    /// Requested resource does not exist
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    /// Provider reported a failure
    ExternalServiceError = 5000,
    /// Provider could not be reached
    ExternalServiceUnavailable = 5001,
    /// Provider rejected our credentials
    ExternalAuthFailed = 5002,
    /// Provider throttled the request or the quota is exhausted
    ExternalRateLimited = 5003,

    // Provider responses (5100-5199)
    /// Provider answered with nothing to interpret
    EmptyResponse = 5100,
    /// Provider envelope lacked the expected field
    MalformedEnvelope = 5101,
    /// Provider text was not valid JSON
    InvalidJson = 5102,
    /// Provider JSON did not match the recipe shape
    SchemaViolation = 5103,

    // Configuration (6000-6999)
    /// Generic configuration failure
    ConfigError = 6000,
    /// Required configuration is absent
    ConfigMissing = 6001,
    /// Configuration value could not be parsed
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    InternalError = 9000,
    /// Reading or writing local storage failed
    StorageError = 9002,
    /// Serializing or deserializing local data failed
    SerializationError = 9003,
}

impl ErrorCode {
    /// Process exit status for this error (sysexits conventions)
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInput | Self::ResourceNotFound => 64,
            Self::EmptyResponse
            | Self::MalformedEnvelope
            | Self::InvalidJson
            | Self::SchemaViolation
            | Self::SerializationError => 65,
            Self::ExternalServiceError | Self::ExternalServiceUnavailable => 69,
            Self::StorageError => 74,
            Self::ExternalRateLimited => 75,
            Self::ExternalAuthFailed => 77,
            Self::ConfigError | Self::ConfigMissing | Self::ConfigInvalid => 78,
            Self::InternalError => 70,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ResourceNotFound => "The requested item was not found",
            Self::ExternalServiceError => "The recipe provider reported an error",
            Self::ExternalServiceUnavailable => "The recipe provider could not be reached",
            Self::ExternalAuthFailed => "The recipe provider rejected the credentials",
            Self::ExternalRateLimited => "The recipe provider rate limit was exceeded",
            Self::EmptyResponse => "The recipe provider returned an empty response",
            Self::MalformedEnvelope => "The recipe provider response had an unexpected shape",
            Self::InvalidJson => "The recipe provider returned invalid JSON",
            Self::SchemaViolation => "The recipe provider returned an incomplete recipe",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Exit status a command-line front end should terminate with
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.code.exit_code()
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Missing configuration value
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Unparsable configuration value
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Local storage failure
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Serialization failure
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<GenerationError> for AppError {
    fn from(error: GenerationError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        Self::new(code, message).with_source(error)
    }
}
