// ABOUTME: Unified error handling for the recipe generator
// ABOUTME: Re-exports the core error system and adds conversions for this crate's I/O stack
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

//! # Error Handling
//!
//! Types are defined in `recipe-core` so the data model can fail with them;
//! this module adds the helpers that need crates the core does not depend on.

use std::io;

pub use recipe_core::errors::{
    truncate_snippet, AppError, AppResult, ErrorCode, GenerationError, ProviderFailureKind,
};

/// Map a `reqwest` transport failure to a `Network` generation error
///
/// Only called for failures before a status line was received or while the
/// body was being read; HTTP error statuses are handled as response data.
#[must_use]
pub fn network_error(error: &reqwest::Error) -> GenerationError {
    let message = if error.is_timeout() {
        format!("request timed out ({error})")
    } else if error.is_connect() {
        format!("connection failed ({error})")
    } else {
        error.to_string()
    };
    GenerationError::network(message)
}

/// Map a filesystem failure to a storage error
#[must_use]
pub fn storage_error(context: &str, error: io::Error) -> AppError {
    AppError::storage(format!("{context}: {error}")).with_source(error)
}

/// Map a JSON (de)serialization failure of local data
#[must_use]
pub fn serialization_error(context: &str, error: serde_json::Error) -> AppError {
    AppError::serialization(format!("{context}: {error}")).with_source(error)
}
