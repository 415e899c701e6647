// ABOUTME: Recipe generation service exposed to the user interface
// ABOUTME: Builds the prompt, makes exactly one provider call, and interprets the response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

//! # Recipe Generator
//!
//! One submission is one provider call. Failures are logged and returned as
//! a single [`GenerationError`]; nothing is retried.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument, warn};

use crate::errors::GenerationError;
use crate::interpreter::ResponseInterpreter;
use crate::llm::RecipeProvider;
use crate::models::{Recipe, RecipeRequest};
use crate::prompts::PromptBuilder;

/// Generates recipes with an injected provider
#[derive(Clone)]
pub struct RecipeGenerator {
    provider: Arc<dyn RecipeProvider>,
}

impl RecipeGenerator {
    /// Create a generator around a provider built at startup
    #[must_use]
    pub fn new(provider: Arc<dyn RecipeProvider>) -> Self {
        Self { provider }
    }

    /// The provider this generator calls
    #[must_use]
    pub fn provider(&self) -> &dyn RecipeProvider {
        self.provider.as_ref()
    }

    /// Generate a recipe from loose UI inputs
    ///
    /// `ingredients_text` is a comma-separated list; `meal_type` and
    /// `dietary_restrictions` are catalog labels.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` without contacting the provider when no
    /// ingredient is given or a label is unknown; otherwise any failure of
    /// [`RecipeGenerator::generate`].
    pub async fn generate_recipe<S: AsRef<str>>(
        &self,
        ingredients_text: &str,
        meal_type: &str,
        dietary_restrictions: &[S],
    ) -> Result<Recipe, GenerationError> {
        let request =
            RecipeRequest::from_ingredients_text(ingredients_text, meal_type, dietary_restrictions)
                .inspect_err(|e| warn!(error = %e, "Rejected recipe request"))?;
        self.generate(&request).await
    }

    /// Generate a recipe for a validated request
    ///
    /// # Errors
    ///
    /// Returns `Network` when the provider could not be reached, `Provider`
    /// when it reported a failure, and `EmptyInput`, `MalformedEnvelope`,
    /// `InvalidJson` or `SchemaViolation` when its output was unusable.
    #[instrument(
        skip(self, request),
        fields(
            provider = self.provider.name(),
            model = %self.provider.default_model(),
            meal_type = %request.meal_type(),
            ingredients = request.ingredients().len(),
        )
    )]
    pub async fn generate(&self, request: &RecipeRequest) -> Result<Recipe, GenerationError> {
        let prompt = PromptBuilder::build(request);
        let started = Instant::now();

        let outcome = match self.provider.generate(&prompt).await {
            Ok(raw) => ResponseInterpreter::parse(&raw, self.provider.as_ref()),
            Err(error) => Err(error),
        };
        let elapsed_ms = started.elapsed().as_millis();

        match &outcome {
            Ok(recipe) => info!(
                recipe = %recipe.recipe_name,
                elapsed_ms,
                "Generated recipe"
            ),
            Err(error) => warn!(
                error = %error,
                code = ?error.error_code(),
                retry_after_secs = error.retry_after().map(|d| d.as_secs()),
                elapsed_ms,
                "Recipe generation failed"
            ),
        }
        outcome
    }
}
