//! # Ingredient Data Model
//!
//! Data structures shared across the parsing, normalization, and
//! aggregation stages. Each value is constructed fresh per call and never
//! mutated across calls, so callers may run any number of parses
//! concurrently on independent inputs.
//!
//! ## Core Concepts
//!
//! - **ParsedIngredient**: one ingredient line split into amount, unit,
//!   name, and preparation note
//! - **IngredientGroup**: a titled batch of raw ingredient lines, however
//!   produced (scraper, user input, AI recipe parse)
//! - **AggregatedItem**: one or more parsed ingredients merged under a
//!   normalized name and compatible unit
//! - **ShoppingListItem**: the serializable projection handed to
//!   persistence and UI layers

use crate::amount::format_amount;
use crate::units::Unit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A structured ingredient record produced from one raw ingredient line.
///
/// Invariants: `amount` is either absent or non-negative; `unit` is absent
/// whenever `unit_raw` is absent; `name` is empty only for empty input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// The quantity token as written (e.g. "1 1/2", "~2", "a pinch of")
    pub amount_raw: Option<String>,

    /// Decimal value of `amount_raw`, absent for non-numeric quantities
    pub amount: Option<f64>,

    /// The unit token as written (e.g. "cups", "Tbsp.")
    pub unit_raw: Option<String>,

    /// The resolved unit, canonical or compound
    pub unit: Option<Unit>,

    /// Residual ingredient name after amount/unit/preparation removal
    pub name: String,

    /// Trailing comma clause or parenthetical prep note
    pub preparation: Option<String>,
}

impl ParsedIngredient {
    /// Create a record carrying only a name.
    pub fn new(name: &str) -> Self {
        Self {
            amount_raw: None,
            amount: None,
            unit_raw: None,
            unit: None,
            name: name.to_string(),
            preparation: None,
        }
    }

    /// Attach a quantity token and its parsed value.
    pub fn with_amount(mut self, raw: &str, value: Option<f64>) -> Self {
        self.amount_raw = Some(raw.to_string());
        self.amount = value;
        self
    }

    /// Attach a unit token and its resolved unit.
    pub fn with_unit(mut self, raw: &str, unit: Unit) -> Self {
        self.unit_raw = Some(raw.to_string());
        self.unit = Some(unit);
        self
    }

    /// Attach a preparation note.
    pub fn with_preparation(mut self, preparation: &str) -> Self {
        self.preparation = Some(preparation.to_string());
        self
    }

    /// Pluralization-aware display form of the unit, if any.
    pub fn unit_display(&self) -> Option<String> {
        self.unit.as_ref().map(|u| u.display(self.amount))
    }
}

impl fmt::Display for ParsedIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        if let Some(amount) = self.amount.and_then(format_amount) {
            write!(f, "{}", amount)?;
            wrote = true;
        } else if let Some(raw) = &self.amount_raw {
            write!(f, "{}", raw)?;
            wrote = true;
        }
        if let Some(unit) = self.unit_display() {
            if wrote {
                write!(f, " ")?;
            }
            write!(f, "{}", unit)?;
            wrote = true;
        }
        if !self.name.is_empty() {
            if wrote {
                write!(f, " ")?;
            }
            write!(f, "{}", self.name)?;
        }
        if let Some(preparation) = &self.preparation {
            write!(f, ", {}", preparation)?;
        }
        Ok(())
    }
}

/// A titled batch of raw ingredient lines. The title doubles as the
/// source label (usually the recipe title) carried through aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientGroup {
    /// Group title, usually the recipe name
    pub name: String,

    /// Raw ingredient lines, one per ingredient
    pub ingredients: Vec<String>,
}

impl IngredientGroup {
    /// Create a group from a title and raw lines.
    pub fn new(name: &str, ingredients: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            ingredients,
        }
    }
}

/// The result of merging one or more parsed ingredients that share a
/// normalized name and compatible unit family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedItem {
    /// Normalized ingredient name (the aggregation key)
    pub name: String,

    /// Summed amount in `unit`, absent only when every contributing item
    /// lacked a numeric amount
    pub amount: Option<f64>,

    /// Unit of `amount`: the first-seen unit of the group
    pub unit: Option<Unit>,

    /// How many parsed ingredients were merged into this item
    pub source_count: usize,

    /// Distinct source labels (recipe titles), in first-seen order
    pub source_recipe_titles: Vec<String>,

    /// Grocery-store section
    pub category: String,
}

impl AggregatedItem {
    /// Display form of the quantity, e.g. "1 1/2 cups", or `None` when no
    /// contributing item carried a numeric amount.
    pub fn quantity_display(&self) -> Option<String> {
        let amount = format_amount(self.amount?)?;
        match &self.unit {
            Some(unit) => Some(format!("{} {}", amount, unit.display(self.amount))),
            None => Some(amount),
        }
    }
}

impl fmt::Display for AggregatedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quantity_display() {
            Some(quantity) => write!(f, "{} {}", quantity, self.name)?,
            None => write!(f, "{}", self.name)?,
        }
        if self.source_count > 1 {
            write!(f, " ({} recipes)", self.source_count)?;
        }
        Ok(())
    }
}

/// Flat, serializable projection of an [`AggregatedItem`] for persistence
/// and export. Identity, checked-state, and ordering beyond `order_index`
/// are the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    /// Normalized ingredient name
    pub item_name: String,
    /// Summed quantity, absent for unquantified items
    pub quantity_amount: Option<f64>,
    /// Canonical unit identifier ("cup", "14-oz can"), absent when unitless
    pub quantity_unit: Option<String>,
    /// Grocery-store section
    pub grocery_category: String,
    /// Contributing recipe titles, joined with ", "
    pub source_recipe_title: String,
    /// Position within the rendered list
    pub order_index: usize,
}
