// ABOUTME: Response interpreter turning raw provider output into a validated Recipe
// ABOUTME: Extracts candidate text, strips fencing and prose, parses JSON, and checks the recipe shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

//! # Response Interpreter
//!
//! Runs the same steps for every provider, each short-circuiting on failure:
//!
//! 1. **Extract** the candidate text with the provider's [`EnvelopeExtractor`]
//! 2. **Unwrap** a markdown code fence and trim; when the text is not JSON,
//!    fall back to a fenced block found anywhere, then to the first `{`
//!    from which a complete object parses
//! 3. **Parse** the text as JSON (`InvalidJson` keeps a truncated snippet)
//! 4. **Validate** the recipe shape in a fixed field order
//!    (`SchemaViolation` names the first bad field)
//! 5. **Return** the strings exactly as parsed
//!
//! Validation is all or nothing: no partial `Recipe` is ever produced.

use serde_json::{Deserializer, Map, Value};
use tracing::debug;

use crate::errors::GenerationError;
use crate::llm::envelope::json_kind;
use crate::llm::{EnvelopeExtractor, RawResponse};
use crate::models::{Nutrition, Recipe};

const CODE_FENCE: &str = "```";

/// Field reported when the parsed JSON is not an object
pub const ROOT_FIELD: &str = "(root)";

/// Order in which top-level fields are checked
pub const FIELD_CHECK_ORDER: [&str; 8] = [
    "recipeName",
    "description",
    "servings",
    "prepTime",
    "cookTime",
    "ingredients",
    "instructions",
    "nutrition",
];

const NUTRITION_CHECK_ORDER: [&str; 4] = ["calories", "protein", "carbs", "fat"];

/// Converts provider responses into recipes
pub struct ResponseInterpreter;

impl ResponseInterpreter {
    /// Interpret a raw provider response
    ///
    /// # Errors
    ///
    /// Returns the first failure among envelope extraction (`Provider`,
    /// `EmptyInput`, `MalformedEnvelope`), JSON parsing (`InvalidJson`) and
    /// shape validation (`SchemaViolation`).
    pub fn parse<E>(raw: &RawResponse, extractor: &E) -> Result<Recipe, GenerationError>
    where
        E: EnvelopeExtractor + ?Sized,
    {
        let text = extractor.extract_candidate_text(raw)?;
        debug!(
            provider = extractor.provider_name(),
            text_len = text.len(),
            "Extracted candidate text"
        );
        Self::parse_text(&text)
    }

    /// Interpret candidate text that has already been extracted
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput`, `InvalidJson` or `SchemaViolation`.
    pub fn parse_text(text: &str) -> Result<Recipe, GenerationError> {
        let unwrapped = strip_code_fence(text);
        if unwrapped.is_empty() {
            return Err(GenerationError::EmptyInput);
        }

        let value = parse_json(unwrapped)?;
        validate_recipe(value)
    }
}

/// Remove a surrounding markdown code fence and trim
///
/// A leading fence may carry a language tag (` ```json `). Text without a
/// fence is only trimmed.
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let body = trimmed.strip_prefix(CODE_FENCE).map_or(trimmed, |rest| {
        match rest.split_once('\n') {
            Some((tag, body)) if !tag.contains('{') => body,
            _ => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
        }
    });

    let body = body.trim_end();
    body.strip_suffix(CODE_FENCE).unwrap_or(body).trim()
}

/// Contents of the first fenced block anywhere in `text`
fn fenced_block(text: &str) -> Option<&str> {
    let (_, after_open) = text.split_once(CODE_FENCE)?;
    let body = match after_open.split_once('\n') {
        Some((tag, rest)) if !tag.contains('{') => rest,
        _ => after_open,
    };
    let (inner, _) = body.split_once(CODE_FENCE)?;
    Some(inner.trim())
}

/// First JSON object that parses from some `{` onward, ignoring what follows it
fn first_object(text: &str) -> Option<Value> {
    text.match_indices('{').find_map(|(start, _)| {
        Deserializer::from_str(&text[start..])
            .into_iter::<Value>()
            .next()
            .and_then(Result::ok)
            .filter(Value::is_object)
    })
}

fn parse_json(text: &str) -> Result<Value, GenerationError> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Ok(value),
        Err(error) => {
            // Prose around the object: prefer a fenced block, then the first object that parses
            let fenced = fenced_block(text).and_then(|inner| serde_json::from_str::<Value>(inner).ok());
            if let Some(value) = fenced {
                debug!("Isolated fenced JSON block from surrounding text");
                return Ok(value);
            }
            if let Some(value) = first_object(text) {
                debug!("Isolated JSON object from surrounding text");
                return Ok(value);
            }
            Err(GenerationError::invalid_json(text, error))
        }
    }
}

// ============================================================================
// Shape validation
// ============================================================================

fn validate_recipe(value: Value) -> Result<Recipe, GenerationError> {
    let mut fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(GenerationError::schema_violation(
                ROOT_FIELD,
                format!("expected a JSON object, got {}", json_kind(&other)),
            ))
        }
    };

    let [recipe_name, description, servings, prep_time, cook_time, ingredients, instructions, nutrition] =
        FIELD_CHECK_ORDER;

    Ok(Recipe {
        recipe_name: take_string(&mut fields, recipe_name, recipe_name)?,
        description: take_string(&mut fields, description, description)?,
        servings: take_string(&mut fields, servings, servings)?,
        prep_time: take_string(&mut fields, prep_time, prep_time)?,
        cook_time: take_string(&mut fields, cook_time, cook_time)?,
        ingredients: take_string_array(&mut fields, ingredients)?,
        instructions: take_string_array(&mut fields, instructions)?,
        nutrition: take_nutrition(&mut fields, nutrition)?,
    })
}

fn take_string(
    fields: &mut Map<String, Value>,
    name: &str,
    reported_as: &str,
) -> Result<String, GenerationError> {
    match fields.remove(name) {
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(GenerationError::schema_violation(
            reported_as,
            format!("expected a string, got {}", json_kind(&other)),
        )),
        None => Err(GenerationError::schema_violation(
            reported_as,
            "required field is missing",
        )),
    }
}

fn take_string_array(
    fields: &mut Map<String, Value>,
    name: &str,
) -> Result<Vec<String>, GenerationError> {
    let items = match fields.remove(name) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(GenerationError::schema_violation(
                name,
                format!("expected an array of strings, got {}", json_kind(&other)),
            ))
        }
        None => {
            return Err(GenerationError::schema_violation(
                name,
                "required field is missing",
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(text) => Ok(text),
            other => Err(GenerationError::schema_violation(
                name,
                format!(
                    "element {index} must be a string, got {}",
                    json_kind(&other)
                ),
            )),
        })
        .collect()
}

fn take_nutrition(
    fields: &mut Map<String, Value>,
    name: &str,
) -> Result<Option<Nutrition>, GenerationError> {
    let mut nutrition = match fields.remove(name) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(nutrition)) => nutrition,
        Some(other) => {
            return Err(GenerationError::schema_violation(
                name,
                format!("expected an object, got {}", json_kind(&other)),
            ))
        }
    };

    let [calories, protein, carbs, fat] = NUTRITION_CHECK_ORDER;
    let mut take = |field: &str| take_string(&mut nutrition, field, &format!("{name}.{field}"));

    Ok(Some(Nutrition {
        calories: take(calories)?,
        protein: take(protein)?,
        carbs: take(carbs)?,
        fat: take(fat)?,
    }))
}
