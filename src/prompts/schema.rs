// ABOUTME: Machine-readable description of the recipe JSON the provider must return
// ABOUTME: Renders as standard JSON Schema or the Gemini responseSchema dialect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

use serde_json::{json, Map, Value};

/// Shape of a single schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-form string
    String,
    /// Array whose elements are strings
    StringArray,
    /// Object with the given string sub-fields
    Object(&'static [SchemaField]),
}

/// One field of the recipe output schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaField {
    /// JSON key
    pub name: &'static str,
    /// Value shape
    pub kind: FieldKind,
    /// Instruction for the provider
    pub description: &'static str,
    /// Whether the provider is told the field is mandatory
    pub required: bool,
}

impl SchemaField {
    const fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String,
            description,
            required: true,
        }
    }

    const fn string_array(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::StringArray,
            description,
            required: true,
        }
    }

    /// Short type label used in prompt text
    #[must_use]
    pub fn type_label(&self) -> String {
        match self.kind {
            FieldKind::String => "string".to_owned(),
            FieldKind::StringArray => "array of strings".to_owned(),
            FieldKind::Object(fields) => {
                let names: Vec<String> = fields.iter().map(|f| format!("\"{}\"", f.name)).collect();
                format!("object with string fields {}", names.join(", "))
            }
        }
    }
}

const NUTRITION_FIELDS: &[SchemaField] = &[
    SchemaField::string("calories", "Estimated calories, e.g. '350 kcal'."),
    SchemaField::string("protein", "Estimated protein, e.g. '15g'."),
    SchemaField::string("carbs", "Estimated carbohydrates, e.g. '40g'."),
    SchemaField::string("fat", "Estimated fat, e.g. '12g'."),
];

const RECIPE_FIELDS: &[SchemaField] = &[
    SchemaField::string("recipeName", "The name of the recipe."),
    SchemaField::string("description", "A short, appetizing description of the dish."),
    SchemaField::string("servings", "How many people this recipe serves."),
    SchemaField::string("prepTime", "The preparation time, e.g. '15 minutes'."),
    SchemaField::string("cookTime", "The cooking time, e.g. '30 minutes'."),
    SchemaField::string_array(
        "ingredients",
        "Every ingredient with its quantity, one per entry.",
    ),
    SchemaField::string_array("instructions", "Step-by-step cooking instructions, in order."),
    SchemaField {
        name: "nutrition",
        kind: FieldKind::Object(NUTRITION_FIELDS),
        description: "Estimated nutrition information per serving.",
        required: true,
    },
];

/// The recipe output schema as an ordered field list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaDescriptor {
    fields: &'static [SchemaField],
}

impl Default for SchemaDescriptor {
    fn default() -> Self {
        Self::recipe()
    }
}

impl SchemaDescriptor {
    /// Schema of the `Recipe` JSON shape
    #[must_use]
    pub const fn recipe() -> Self {
        Self {
            fields: RECIPE_FIELDS,
        }
    }

    /// Fields in check order
    #[must_use]
    pub const fn fields(&self) -> &'static [SchemaField] {
        self.fields
    }

    /// Top-level field names in check order
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|field| field.name)
    }

    /// Render as a standard JSON Schema object (lowercase type names)
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        object_schema(self.fields, Dialect::JsonSchema)
    }

    /// Render in the Gemini `responseSchema` dialect (uppercase type names,
    /// explicit `propertyOrdering`)
    #[must_use]
    pub fn to_gemini_schema(&self) -> Value {
        object_schema(self.fields, Dialect::Gemini)
    }
}

#[derive(Clone, Copy)]
enum Dialect {
    JsonSchema,
    Gemini,
}

#[derive(Clone, Copy)]
enum JsonType {
    Object,
    Array,
    String,
}

impl Dialect {
    const fn type_name(self, json_type: JsonType) -> &'static str {
        match (self, json_type) {
            (Self::JsonSchema, JsonType::Object) => "object",
            (Self::JsonSchema, JsonType::Array) => "array",
            (Self::JsonSchema, JsonType::String) => "string",
            (Self::Gemini, JsonType::Object) => "OBJECT",
            (Self::Gemini, JsonType::Array) => "ARRAY",
            (Self::Gemini, JsonType::String) => "STRING",
        }
    }
}

fn object_schema(fields: &[SchemaField], dialect: Dialect) -> Value {
    let mut properties = Map::new();
    for field in fields {
        properties.insert(field.name.to_owned(), field_schema(field, dialect));
    }

    let required: Vec<&str> = fields
        .iter()
        .filter(|field| field.required)
        .map(|field| field.name)
        .collect();

    let mut schema = json!({
        "type": dialect.type_name(JsonType::Object),
        "properties": properties,
        "required": required,
    });

    if matches!(dialect, Dialect::Gemini) {
        let ordering: Vec<&str> = fields.iter().map(|field| field.name).collect();
        schema["propertyOrdering"] = json!(ordering);
    }

    schema
}

fn field_schema(field: &SchemaField, dialect: Dialect) -> Value {
    match field.kind {
        FieldKind::String => json!({
            "type": dialect.type_name(JsonType::String),
            "description": field.description,
        }),
        FieldKind::StringArray => json!({
            "type": dialect.type_name(JsonType::Array),
            "description": field.description,
            "items": { "type": dialect.type_name(JsonType::String) },
        }),
        FieldKind::Object(sub_fields) => {
            let mut schema = object_schema(sub_fields, dialect);
            schema["description"] = json!(field.description);
            schema
        }
    }
}
