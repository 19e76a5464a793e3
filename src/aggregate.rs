//! # Aggregator Module
//!
//! Merges parsed ingredients across one or more recipes into grouped,
//! summed, unit-converted totals per distinct ingredient.
//!
//! Grouping key is the normalized name plus a unit bucket: volume and
//! weight units merge within their family (converted into the first-seen
//! unit of the group), count and compound units merge only on exact
//! identity, and unit-less items form their own bucket. Incompatible
//! pairings are never forced into one number; they stay side by side as
//! separate items.
//!
//! The grouping map is local to one `aggregate` call, so concurrent calls
//! over different batches share no state.

use crate::categorize::categorize;
use crate::model::{AggregatedItem, ParsedIngredient};
use crate::normalize::normalize;
use crate::units::{convert, CanonicalUnit, Unit, UnitFamily};
use log::{debug, trace};
use std::collections::HashMap;

/// Bucket half of the grouping key. Volume and weight collapse to their
/// family; count units keep their identity because a clove is not a slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum UnitBucket {
    Family(UnitFamily),
    Exact(String),
    Unitless,
}

fn bucket_for(unit: &Option<Unit>) -> UnitBucket {
    match unit {
        None => UnitBucket::Unitless,
        Some(u) => match u.family() {
            UnitFamily::Volume | UnitFamily::Weight => UnitBucket::Family(u.family()),
            UnitFamily::Count => UnitBucket::Exact(u.canonical_id()),
        },
    }
}

struct Group {
    amount: Option<f64>,
    unit: Option<Unit>,
    source_count: usize,
    titles: Vec<String>,
}

/// Aggregate parsed ingredients, each labeled with its source (usually the
/// recipe title). Total and order-independent: any permutation of the same
/// multiset yields the same set of items, up to floating-point tolerance
/// from conversion order.
pub fn aggregate(items: &[(ParsedIngredient, String)]) -> Vec<AggregatedItem> {
    let mut groups: HashMap<(String, UnitBucket), Group> = HashMap::new();

    for (ingredient, source) in items {
        let name = normalize(&ingredient.name);
        if name.is_empty() {
            trace!("skipping ingredient with empty normalized name");
            continue;
        }

        let mut unit = ingredient.unit.clone();
        // Recipes routinely write "2 garlic" meaning cloves. This default
        // is deliberately narrow: garlic only, no other aromatics.
        if unit.is_none() && name == "garlic" {
            unit = Some(Unit::Canonical(CanonicalUnit::Clove));
        }

        let key = (name, bucket_for(&unit));
        let bucket = key.1.clone();
        let entry = groups.entry(key).or_insert_with(|| Group {
            amount: None,
            unit: unit.clone(),
            source_count: 0,
            titles: Vec::new(),
        });

        entry.source_count += 1;
        if !entry.titles.contains(source) {
            entry.titles.push(source.clone());
        }

        if let Some(incoming) = ingredient.amount {
            let converted = match (&entry.unit, &unit) {
                (Some(Unit::Canonical(group_unit)), Some(Unit::Canonical(item_unit))) => {
                    convert(incoming, *item_unit, *group_unit)
                }
                // Identical compound or unit-less bucket: no conversion.
                _ => Some(incoming),
            };
            match converted {
                Some(value) => entry.amount = Some(entry.amount.unwrap_or(0.0) + value),
                None => {
                    // Unreachable for well-formed buckets; keep the group
                    // rather than corrupt its total.
                    debug!("unconvertible amount within bucket {:?}", bucket);
                }
            }
        }
        // A null incoming amount merges by presence only: the group keeps
        // whatever amount it already has.
    }

    let mut result: Vec<AggregatedItem> = groups
        .into_iter()
        .map(|((name, _), group)| {
            let category = categorize(&name).to_string();
            AggregatedItem {
                name,
                amount: group.amount,
                unit: group.unit,
                source_count: group.source_count,
                source_recipe_titles: group.titles,
                category,
            }
        })
        .collect();

    // Deterministic output order regardless of map iteration.
    result.sort_by(|a, b| {
        a.name.cmp(&b.name).then_with(|| {
            let au = a.unit.as_ref().map(|u| u.canonical_id()).unwrap_or_default();
            let bu = b.unit.as_ref().map(|u| u.canonical_id()).unwrap_or_default();
            au.cmp(&bu)
        })
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_parser::parse_line;

    fn item(line: &str, source: &str) -> (ParsedIngredient, String) {
        (parse_line(line), source.to_string())
    }

    #[test]
    fn test_merge_singular_and_plural() {
        let items = vec![
            item("1 cup onion", "Soup"),
            item("1/2 cup onions", "Salad"),
        ];
        let result = aggregate(&items);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "onion");
        assert_eq!(result[0].amount, Some(1.5));
        assert_eq!(result[0].unit.as_ref().unwrap().canonical_id(), "cup");
        assert_eq!(result[0].source_count, 2);
        assert_eq!(result[0].source_recipe_titles, vec!["Soup", "Salad"]);
    }

    #[test]
    fn test_volume_conversion_into_first_seen_unit() {
        let items = vec![
            item("1 cup milk", "Pancakes"),
            item("8 tbsp milk", "Sauce"),
        ];
        let result = aggregate(&items);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].unit.as_ref().unwrap().canonical_id(), "cup");
        assert!((result[0].amount.unwrap() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_weight_conversion() {
        let items = vec![
            item("1 lb ground beef", "Chili"),
            item("8 oz ground beef", "Tacos"),
        ];
        let result = aggregate(&items);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].unit.as_ref().unwrap().canonical_id(), "lb");
        assert!((result[0].amount.unwrap() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_incompatible_families_stay_separate() {
        let items = vec![
            item("2 cups spinach", "Salad"),
            item("1 bag spinach", "Smoothie"),
        ];
        let result = aggregate(&items);
        assert_eq!(result.len(), 2);
        // Never a single merged amount across families.
        let amounts: Vec<Option<f64>> = result.iter().map(|i| i.amount).collect();
        assert!(amounts.contains(&Some(2.0)));
        assert!(amounts.contains(&Some(1.0)));
    }

    #[test]
    fn test_distinct_count_units_stay_separate() {
        let items = vec![
            item("2 slices bread", "Sandwich"),
            item("1 loaf bread", "Table"),
        ];
        let result = aggregate(&items);
        // "loaf" is not a unit, so the second parses as a name; either way
        // nothing merges into the slice total.
        let slices = result
            .iter()
            .find(|i| i.unit.as_ref().map(|u| u.canonical_id()) == Some("slice".into()))
            .unwrap();
        assert_eq!(slices.amount, Some(2.0));
    }

    #[test]
    fn test_garlic_defaults_to_cloves() {
        let items = vec![
            item("2 garlic cloves", "Pasta"),
            item("3 garlic", "Stir Fry"),
        ];
        let result = aggregate(&items);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "garlic");
        assert_eq!(result[0].unit.as_ref().unwrap().canonical_id(), "clove");
        assert_eq!(result[0].amount, Some(5.0));
    }

    #[test]
    fn test_no_implied_unit_for_other_aromatics() {
        let items = vec![item("1 ginger", "Curry")];
        let result = aggregate(&items);
        assert_eq!(result[0].unit, None);
    }

    #[test]
    fn test_null_amount_merges_by_presence() {
        let items = vec![
            item("salt to taste", "Soup"),
            item("salt to taste", "Stew"),
        ];
        let result = aggregate(&items);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].amount, None);
        assert_eq!(result[0].source_count, 2);
    }

    #[test]
    fn test_null_amount_keeps_non_null_side() {
        let parsed_with = parse_line("2 cups flour");
        let mut parsed_without = parse_line("1 cup flour");
        parsed_without.amount = None;
        parsed_without.amount_raw = None;
        let items = vec![
            (parsed_without, "A".to_string()),
            (parsed_with, "B".to_string()),
        ];
        let result = aggregate(&items);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].amount, Some(2.0));
    }

    #[test]
    fn test_compound_units_merge_on_identity_only() {
        let items = vec![
            item("2 14-ounce cans white beans", "Chili"),
            item("1 14 oz can white beans", "Soup"),
            item("1 28-ounce can white beans", "Stew"),
        ];
        let result = aggregate(&items);
        assert_eq!(result.len(), 2);
        let small = result
            .iter()
            .find(|i| i.unit.as_ref().unwrap().canonical_id() == "14-oz can")
            .unwrap();
        assert_eq!(small.amount, Some(3.0));
        assert_eq!(small.name, "white beans");
    }

    #[test]
    fn test_permutation_independence() {
        let lines = [
            ("1 cup onion", "A"),
            ("1/2 cup onions", "B"),
            ("2 cloves garlic", "C"),
        ];
        let forward: Vec<_> = lines.iter().map(|(l, s)| item(l, s)).collect();
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = aggregate(&forward);
        let b = aggregate(&reversed);
        assert_eq!(a.len(), b.len());
        for (left, right) in a.iter().zip(&b) {
            assert_eq!(left.name, right.name);
            assert_eq!(left.unit, right.unit);
            let (Some(la), Some(ra)) = (left.amount, right.amount) else {
                assert_eq!(left.amount, right.amount);
                continue;
            };
            assert!((la - ra).abs() < 1e-9);
        }
    }

    #[test]
    fn test_permutation_independence_across_units() {
        // Different first-seen units are allowed; totals must agree once
        // converted to a common base.
        let forward = vec![item("1 cup milk", "A"), item("3 tsp milk", "B")];
        let reversed = vec![item("3 tsp milk", "B"), item("1 cup milk", "A")];

        let a = &aggregate(&forward)[0];
        let b = &aggregate(&reversed)[0];
        let to_ml = |it: &AggregatedItem| {
            convert(
                it.amount.unwrap(),
                it.unit.as_ref().unwrap().as_canonical().unwrap(),
                CanonicalUnit::Milliliter,
            )
            .unwrap()
        };
        assert!((to_ml(a) - to_ml(b)).abs() < 1e-6);
    }

    #[test]
    fn test_sources_deduplicated() {
        let items = vec![
            item("1 cup flour", "Bread"),
            item("1 cup flour", "Bread"),
        ];
        let result = aggregate(&items);
        assert_eq!(result[0].source_count, 2);
        assert_eq!(result[0].source_recipe_titles, vec!["Bread"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[]).is_empty());
    }
}
