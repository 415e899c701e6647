// ABOUTME: Core types and constants for the recipe generator
// ABOUTME: Foundation crate with error handling, the recipe data model, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

#![deny(unsafe_code)]

//! # Recipe Core
//!
//! Foundation crate providing shared types for the recipe generator. It
//! performs no I/O and changes infrequently, so the main crate can rebuild
//! incrementally on top of it.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and the classified `GenerationError`
//! - **models**: `Recipe`, `Nutrition`, `RecipeRequest` and the label catalogs
//! - **constants**: storage keys and diagnostic limits

/// Unified error handling with standard error codes and generation failures
pub mod errors;

/// Recipe data model and request validation
pub mod models;

/// Application constants organized by domain
pub mod constants;
