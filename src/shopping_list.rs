//! # Shopping List Module
//!
//! The outermost surface of the crate: turns titled batches of raw
//! ingredient lines into a categorized, ordered shopping list and renders
//! it as a markdown checklist.
//!
//! Category lookup goes through the [`CategorySource`] trait so callers
//! can plug in an external categorizer (an AI service, a learned mapping)
//! while the bundled [`RuleBasedCategories`] keeps everything working
//! offline. Any lookup error or `None` falls back to the rule table, so
//! list building itself never fails.

use crate::aggregate::aggregate;
use crate::categorize::categorize;
use crate::line_parser::parse_line;
use crate::model::{IngredientGroup, ShoppingListItem};
use crate::units::Unit;
use anyhow::Result;
use log::{debug, info, warn};

/// Where grocery categories come from. Implementations may hit external
/// services; `Ok(None)` means "no opinion" and defers to the rule table.
pub trait CategorySource {
    fn category_for(&self, name: &str) -> Result<Option<String>>;
}

/// The bundled keyword-rule categorizer. Deterministic and infallible.
pub struct RuleBasedCategories;

impl CategorySource for RuleBasedCategories {
    fn category_for(&self, name: &str) -> Result<Option<String>> {
        Ok(Some(categorize(name).to_string()))
    }
}

/// Rendering order for category sections, roughly a walk through the
/// store. Unknown categories sort after these, before "Other".
const CATEGORY_ORDER: &[&str] = &[
    "Produce",
    "Meat & Seafood",
    "Dairy & Eggs",
    "Bakery",
    "Frozen",
    "Canned Goods",
    "Pasta & Grains",
    "Baking",
    "Spices & Herbs",
    "Condiments & Oils",
    "Beverages",
    "Snacks",
];

fn category_rank(category: &str) -> usize {
    if category == crate::categorize::CATEGORY_OTHER {
        return CATEGORY_ORDER.len() + 1;
    }
    CATEGORY_ORDER
        .iter()
        .position(|c| *c == category)
        .unwrap_or(CATEGORY_ORDER.len())
}

/// Build a shopping list from titled batches of raw ingredient lines.
///
/// Every line is parsed (parsing is total), merged across groups, labeled
/// with a category from `categories` (rule-table fallback on error or no
/// opinion), and projected into flat items ordered by category section and
/// then name.
pub fn build_shopping_list(
    groups: &[IngredientGroup],
    categories: &dyn CategorySource,
) -> Vec<ShoppingListItem> {
    let mut labeled = Vec::new();
    for group in groups {
        for line in &group.ingredients {
            if line.trim().is_empty() {
                continue;
            }
            labeled.push((parse_line(line), group.name.clone()));
        }
    }
    info!(
        "building shopping list from {} lines across {} groups",
        labeled.len(),
        groups.len()
    );

    let mut items = aggregate(&labeled);

    for item in &mut items {
        match categories.category_for(&item.name) {
            Ok(Some(category)) => item.category = category,
            Ok(None) => {
                debug!("no category opinion for '{}', keeping rule-based", item.name);
            }
            Err(e) => {
                warn!("category lookup failed for '{}': {}", item.name, e);
            }
        }
    }

    items.sort_by(|a, b| {
        category_rank(&a.category)
            .cmp(&category_rank(&b.category))
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.name.cmp(&b.name))
    });

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| ShoppingListItem {
            item_name: item.name,
            quantity_amount: item.amount,
            quantity_unit: item.unit.as_ref().map(|u| u.canonical_id()),
            grocery_category: item.category,
            source_recipe_title: item.source_recipe_titles.join(", "),
            order_index: index,
        })
        .collect()
}

/// Render a shopping list as a markdown checklist grouped by category.
pub fn render_markdown(items: &[ShoppingListItem]) -> String {
    let mut out = String::from("# Shopping List\n");
    let mut current_category: Option<&str> = None;

    for item in items {
        if current_category != Some(item.grocery_category.as_str()) {
            out.push_str(&format!("\n## {}\n", item.grocery_category));
            current_category = Some(item.grocery_category.as_str());
        }
        let quantity = match (item.quantity_amount, &item.quantity_unit) {
            (Some(amount), Some(unit)) => {
                // The persisted unit stays canonical; rendering pluralizes.
                let display = Unit::from_canonical_id(unit)
                    .map(|u| u.display(item.quantity_amount))
                    .unwrap_or_else(|| unit.clone());
                crate::amount::format_amount(amount)
                    .map(|a| format!("{} {} ", a, display))
                    .unwrap_or_default()
            }
            (Some(amount), None) => crate::amount::format_amount(amount)
                .map(|a| format!("{} ", a))
                .unwrap_or_default(),
            _ => String::new(),
        };
        out.push_str(&format!("- [ ] {}{}\n", quantity, item.item_name));
    }
    out
}
