// ABOUTME: Validated recipe generation request and the fixed label catalogs
// ABOUTME: Defines MealType, DietaryRestriction, IngredientEntry, and RecipeRequest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

/// Units offered by the ingredient picker
pub const COMMON_UNITS: &[&str] = &[
    "unit(s)",
    "g",
    "kg",
    "ml",
    "L",
    "cup(s)",
    "tbsp",
    "tsp",
    "pinch(es)",
    "to taste",
];

/// Lowercase a label and drop everything that is not alphanumeric, so
/// "Gluten-Free", "gluten free" and "GLUTEN_FREE" compare equal
fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Kind of meal the recipe is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MealType {
    /// Morning meal
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening meal
    #[default]
    Dinner,
    /// Between meals
    Snack,
    /// Sweet course
    Dessert,
}

impl MealType {
    /// Every meal type, in picker order
    pub const ALL: [Self; 5] = [
        Self::Breakfast,
        Self::Lunch,
        Self::Dinner,
        Self::Snack,
        Self::Dessert,
    ];

    /// Display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snack => "Snack",
            Self::Dessert => "Dessert",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MealType {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Self::ALL
            .into_iter()
            .find(|meal| normalize_label(meal.label()) == wanted)
            .ok_or_else(|| {
                GenerationError::invalid_request(format!(
                    "Unknown meal type '{s}'. Choose one of: {}",
                    Self::ALL.map(|m| m.label()).join(", ")
                ))
            })
    }
}

/// Dietary restriction the recipe must respect
///
/// Declaration order is the catalog order; restriction sets iterate in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DietaryRestriction {
    /// No meat or fish
    Vegetarian,
    /// No animal products
    Vegan,
    /// No gluten
    GlutenFree,
    /// No dairy
    DairyFree,
    /// No tree nuts or peanuts
    NutFree,
    /// Low sugar, suitable for diabetics
    DiabeticFriendly,
    /// Strictly gluten-free for celiac disease
    Celiac,
    /// Vegetarian including eggs and dairy
    LactoOvoVegetarian,
    /// Low in fermentable carbohydrates
    LowFodmap,
    /// Very low carbohydrate
    Keto,
    /// Paleolithic diet
    Paleo,
}

impl DietaryRestriction {
    /// Every restriction, in catalog order
    pub const ALL: [Self; 11] = [
        Self::Vegetarian,
        Self::Vegan,
        Self::GlutenFree,
        Self::DairyFree,
        Self::NutFree,
        Self::DiabeticFriendly,
        Self::Celiac,
        Self::LactoOvoVegetarian,
        Self::LowFodmap,
        Self::Keto,
        Self::Paleo,
    ];

    /// Display label, also used verbatim in prompts
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::GlutenFree => "Gluten-Free",
            Self::DairyFree => "Dairy-Free",
            Self::NutFree => "Nut-Free",
            Self::DiabeticFriendly => "Diabetic-Friendly",
            Self::Celiac => "Celiac",
            Self::LactoOvoVegetarian => "Lacto-Ovo Vegetarian",
            Self::LowFodmap => "Low FODMAP",
            Self::Keto => "Keto",
            Self::Paleo => "Paleo",
        }
    }
}

impl fmt::Display for DietaryRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DietaryRestriction {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Self::ALL
            .into_iter()
            .find(|restriction| normalize_label(restriction.label()) == wanted)
            .ok_or_else(|| {
                GenerationError::invalid_request(format!(
                    "Unknown dietary restriction '{s}'. Choose from: {}",
                    Self::ALL.map(|r| r.label()).join(", ")
                ))
            })
    }
}

/// One ingredient the user has on hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientEntry {
    /// Ingredient name
    pub name: String,
    /// Amount, e.g. "2"
    pub quantity: Option<String>,
    /// Unit, e.g. "cup(s)"
    pub unit: Option<String>,
}

impl IngredientEntry {
    /// Create an entry; blank quantity or unit become `None`
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: Option<String>, unit: Option<String>) -> Self {
        let non_blank = |value: Option<String>| {
            value
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };
        Self {
            name: name.into().trim().to_owned(),
            quantity: non_blank(quantity),
            unit: non_blank(unit),
        }
    }

    /// Create an entry with only a name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, None, None)
    }

    /// Whether the name is empty after trimming
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }

    /// Natural phrase "quantity unit name", skipping absent parts
    #[must_use]
    pub fn phrase(&self) -> String {
        [self.quantity.as_deref(), self.unit.as_deref(), Some(self.name.as_str())]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A validated request to generate one recipe
///
/// Always holds at least one ingredient with a non-blank name, so a prompt
/// can be built from any value of this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRequest {
    ingredients: Vec<IngredientEntry>,
    meal_type: MealType,
    dietary_restrictions: BTreeSet<DietaryRestriction>,
}

impl RecipeRequest {
    /// Build a request, dropping blank-named ingredients
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidRequest` when no ingredient with a
    /// non-blank name remains.
    pub fn new(
        ingredients: impl IntoIterator<Item = IngredientEntry>,
        meal_type: MealType,
        dietary_restrictions: impl IntoIterator<Item = DietaryRestriction>,
    ) -> Result<Self, GenerationError> {
        let ingredients: Vec<IngredientEntry> = ingredients
            .into_iter()
            .filter(|entry| !entry.is_blank())
            .collect();

        if ingredients.is_empty() {
            return Err(GenerationError::invalid_request(
                "Please enter at least one ingredient.",
            ));
        }

        Ok(Self {
            ingredients,
            meal_type,
            dietary_restrictions: dietary_restrictions.into_iter().collect(),
        })
    }

    /// Build a request from free-text labels
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidRequest` for unknown labels or when
    /// no ingredient remains.
    pub fn from_labels<S: AsRef<str>>(
        ingredients: impl IntoIterator<Item = IngredientEntry>,
        meal_type: &str,
        dietary_restrictions: &[S],
    ) -> Result<Self, GenerationError> {
        let meal_type = meal_type.parse::<MealType>()?;
        let restrictions = dietary_restrictions
            .iter()
            .map(|label| label.as_ref().parse::<DietaryRestriction>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(ingredients, meal_type, restrictions)
    }

    /// Build a request from a comma-separated ingredient text
    ///
    /// Each comma-separated piece becomes a name-only entry, so the prompt
    /// repeats the text the caller composed.
    ///
    /// # Errors
    ///
    /// Same as [`RecipeRequest::from_labels`].
    pub fn from_ingredients_text<S: AsRef<str>>(
        ingredients_text: &str,
        meal_type: &str,
        dietary_restrictions: &[S],
    ) -> Result<Self, GenerationError> {
        let entries = ingredients_text.split(',').map(IngredientEntry::named);
        Self::from_labels(entries, meal_type, dietary_restrictions)
    }

    /// Ingredients with non-blank names, in input order
    #[must_use]
    pub fn ingredients(&self) -> &[IngredientEntry] {
        &self.ingredients
    }

    /// Requested meal type
    #[must_use]
    pub const fn meal_type(&self) -> MealType {
        self.meal_type
    }

    /// Restrictions in catalog order, without duplicates
    pub fn dietary_restrictions(&self) -> impl Iterator<Item = DietaryRestriction> + '_ {
        self.dietary_restrictions.iter().copied()
    }

    /// Whether the user selected no restriction at all
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.dietary_restrictions.is_empty()
    }

    /// Ingredient phrases joined with ", "
    #[must_use]
    pub fn ingredients_text(&self) -> String {
        self.ingredients
            .iter()
            .map(IngredientEntry::phrase)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
