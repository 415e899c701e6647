// ABOUTME: Renders a validated RecipeRequest into provider-agnostic prompt text and schema
// ABOUTME: Pure and deterministic so identical requests always yield identical prompts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

//! # Prompt Builder
//!
//! A [`RecipePrompt`] carries three things:
//!
//! - `system_text`: the chef persona, sent as a system message by providers
//!   that support one and prepended to the instruction otherwise
//! - `instruction_text`: meal type, ingredients, restrictions, staples,
//!   nutrition request and the JSON-only directive with the exact field set
//! - `output_schema`: the [`SchemaDescriptor`] for providers with
//!   constrained generation
//!
//! ```rust
//! use recipe_generator::models::{IngredientEntry, MealType, RecipeRequest};
//! use recipe_generator::prompts::PromptBuilder;
//!
//! let request = RecipeRequest::new(
//!     [IngredientEntry::new("rice", Some("2".into()), Some("cup(s)".into()))],
//!     MealType::Dinner,
//!     [],
//! )
//! .unwrap();
//! let prompt = PromptBuilder::build(&request);
//! assert!(prompt.instruction_text.contains("2 cup(s) rice"));
//! ```

mod schema;

pub use schema::{FieldKind, SchemaDescriptor, SchemaField};

use std::fmt::Write;

use crate::constants::generation::STAPLE_INGREDIENTS;
use crate::models::RecipeRequest;

/// Chef persona shared by every provider integration
pub const CHEF_PERSONA: &str =
    "You are an expert chef who creates delicious, easy-to-follow recipes.";

/// Sentence used when the request carries no dietary restriction
pub const NO_RESTRICTIONS_SENTENCE: &str = "There are no dietary restrictions.";

/// Prompt for one generation cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipePrompt {
    /// Persona for the system message
    pub system_text: String,
    /// The request itself
    pub instruction_text: String,
    /// Required output shape
    pub output_schema: SchemaDescriptor,
}

impl RecipePrompt {
    /// System text and instruction as one message, for providers without
    /// a separate system role
    #[must_use]
    pub fn combined_text(&self) -> String {
        format!("{}\n\n{}", self.system_text, self.instruction_text)
    }
}

/// Builds recipe prompts
pub struct PromptBuilder;

impl PromptBuilder {
    /// Render a request into prompt text and output schema
    #[must_use]
    pub fn build(request: &RecipeRequest) -> RecipePrompt {
        let output_schema = SchemaDescriptor::recipe();
        RecipePrompt {
            system_text: CHEF_PERSONA.to_owned(),
            instruction_text: Self::instruction_text(request, &output_schema),
            output_schema,
        }
    }

    fn instruction_text(request: &RecipeRequest, schema: &SchemaDescriptor) -> String {
        let mut text = String::new();

        // Writing into a String never fails
        let _ = writeln!(
            text,
            "Generate a single complete recipe for a \"{}\" meal.",
            request.meal_type().label()
        );
        let _ = writeln!(
            text,
            "The main ingredients available are: {}.",
            request.ingredients_text()
        );
        let _ = writeln!(
            text,
            "You may add common staple ingredients ({}) if needed.",
            STAPLE_INGREDIENTS.join(", ")
        );
        let _ = writeln!(text, "{}", Self::dietary_sentence(request));
        text.push_str("The recipe should be creative and appealing.\n");
        text.push_str(
            "Also provide estimated nutrition information per serving, including calories, \
             protein, carbs and fat.\n",
        );
        text.push('\n');
        text.push_str(
            "Respond with a single JSON object only. Do not add any prose or explanation \
             and do not wrap the JSON in markdown code fences.\n",
        );
        text.push_str("The JSON object must contain exactly these fields:\n");
        for field in schema.fields() {
            let _ = writeln!(
                text,
                "- \"{}\" ({}): {}",
                field.name,
                field.type_label(),
                field.description
            );
        }

        text
    }

    fn dietary_sentence(request: &RecipeRequest) -> String {
        if request.is_unrestricted() {
            return NO_RESTRICTIONS_SENTENCE.to_owned();
        }
        let labels: Vec<&str> = request
            .dietary_restrictions()
            .map(|restriction| restriction.label())
            .collect();
        format!(
            "The recipe must follow these dietary restrictions: {}.",
            labels.join(", ")
        )
    }
}
