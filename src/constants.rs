// ABOUTME: System-wide constants for the recipe generator
// ABOUTME: Re-exports core constants and adds provider endpoints, models, and HTTP defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

//! # Constants Module
//!
//! Storage keys and diagnostic limits live in the core crate and are
//! re-exported here; provider endpoints and transport defaults are only
//! needed by this crate.

pub use recipe_core::constants::{diagnostics, service, storage};

/// Provider endpoints and default models
pub mod providers {
    /// Gemini Generative Language API base URL
    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// Default Gemini model
    pub const GEMINI_DEFAULT_MODEL: &str = "gemini-2.5-flash";

    /// `OpenAI` API base URL
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
    /// Default `OpenAI` model
    pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

    /// Groq `OpenAI`-compatible API base URL
    pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
    /// Default Groq model
    pub const GROQ_DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

    /// Local `OpenAI`-compatible server (Ollama, vLLM, `LocalAI`)
    pub const LOCAL_BASE_URL: &str = "http://localhost:11434/v1";
    /// Default model for local `OpenAI`-compatible servers
    pub const LOCAL_DEFAULT_MODEL: &str = "qwen2.5:14b-instruct";

    /// Native Ollama API base URL
    pub const OLLAMA_BASE_URL: &str = "http://localhost:11434";
    /// Default Ollama model
    pub const OLLAMA_DEFAULT_MODEL: &str = "llama3.1";
}

/// Transport defaults
pub mod http {
    /// Whole-request timeout in seconds
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
    /// Connection establishment timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
    /// User-Agent sent to providers
    pub const USER_AGENT: &str = concat!("recipe-generator/", env!("CARGO_PKG_VERSION"));
}

/// Generation defaults
pub mod generation {
    /// Sampling temperature used when none is configured
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    /// Staples the provider may assume are available
    pub const STAPLE_INGREDIENTS: &[&str] = &["oil", "salt", "pepper", "water"];
}
