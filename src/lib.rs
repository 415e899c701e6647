// ABOUTME: Main library entry point for the LLM-backed recipe generator
// ABOUTME: Wires prompt building, provider transport, response interpretation, and favorites
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

#![deny(unsafe_code)]

//! # Recipe Generator
//!
//! Turns a list of ingredients on hand, a meal type and a set of dietary
//! restrictions into a recipe written by a large language model.
//!
//! ## Architecture
//!
//! One generation cycle flows through:
//! - **prompts**: `PromptBuilder` renders a `RecipeRequest` into instruction
//!   text plus an output schema
//! - **llm**: a `RecipeProvider` sends the prompt and returns the raw response
//! - **interpreter**: `ResponseInterpreter` extracts, unwraps, parses and
//!   validates the recipe JSON
//! - **generator**: `RecipeGenerator` ties the three together, one provider
//!   call per submission
//!
//! Around that core sit **favorites** (locally persisted recipes),
//! **formatters** (plain-text rendering), **config** and **logging**.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use recipe_generator::config::RecipeConfig;
//! use recipe_generator::errors::AppResult;
//! use recipe_generator::generator::RecipeGenerator;
//! use recipe_generator::llm::ConfiguredProvider;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = RecipeConfig::from_env()?;
//!     let provider = ConfiguredProvider::from_config(&config.llm)?;
//!     let generator = RecipeGenerator::new(Arc::new(provider));
//!
//!     let recipe = generator
//!         .generate_recipe("2 cup(s) rice, 1 unit(s) onion", "Dinner", &["Vegan"])
//!         .await?;
//!     println!("{}", recipe.recipe_name);
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Application constants shared with the core crate
pub mod constants;

/// Unified error handling
pub mod errors;

/// Favorites collection and its key-value persistence
pub mod favorites;

/// Plain-text rendering of recipes
pub mod formatters;

/// Single-call recipe generation service
pub mod generator;

/// Response extraction, unwrapping, parsing and validation
pub mod interpreter;

/// LLM provider seam and concrete provider integrations
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Recipe data model
pub mod models;

/// Prompt and output schema construction
pub mod prompts;
