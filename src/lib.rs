//! # Shoplist
//!
//! Ingredient-string parsing, name normalization, and quantity aggregation
//! for building consolidated shopping lists from free-form recipe text.
//!
//! ## Pipeline
//!
//! 1. [`line_parser::parse_line`] splits one raw ingredient line into
//!    amount, unit, name, and preparation note (total: never fails)
//! 2. [`normalize::normalize`] reduces a name to its canonical grocery
//!    form ("Fresh Basil Leaves, chopped" becomes "basil")
//! 3. [`aggregate::aggregate`] merges parsed ingredients across recipes,
//!    converting within unit families
//! 4. [`shopping_list::build_shopping_list`] runs the whole pipeline over
//!    titled ingredient batches and yields a categorized, ordered list
//!
//! ## Usage
//!
//! ```
//! use shoplist::model::IngredientGroup;
//! use shoplist::shopping_list::{build_shopping_list, RuleBasedCategories};
//!
//! let groups = vec![
//!     IngredientGroup::new("Soup", vec!["1 cup onion, diced".to_string()]),
//!     IngredientGroup::new("Salad", vec!["1/2 cup onions".to_string()]),
//! ];
//! let items = build_shopping_list(&groups, &RuleBasedCategories);
//! assert_eq!(items[0].item_name, "onion");
//! assert_eq!(items[0].quantity_amount, Some(1.5));
//! ```

pub mod aggregate;
pub mod amount;
pub mod categorize;
pub mod line_parser;
pub mod model;
pub mod normalize;
pub mod shopping_list;
pub mod units;

pub use aggregate::aggregate;
pub use amount::{format_amount, parse_amount};
pub use categorize::categorize;
pub use line_parser::parse_line;
pub use model::{AggregatedItem, IngredientGroup, ParsedIngredient, ShoppingListItem};
pub use normalize::{normalize, parse_display_name, DisplayName};
pub use shopping_list::{build_shopping_list, render_markdown, CategorySource, RuleBasedCategories};
pub use units::{CanonicalUnit, Unit, UnitFamily};
