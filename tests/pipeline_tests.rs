//! End-to-end pipeline tests: raw recipe lines in, categorized shopping
//! list and markdown out.

use shoplist::model::IngredientGroup;
use shoplist::shopping_list::{build_shopping_list, render_markdown, RuleBasedCategories};
use shoplist::{parse_line, Unit};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn groups() -> Vec<IngredientGroup> {
    vec![
        IngredientGroup::new(
            "White Bean Chili",
            vec![
                "4 14-ounce cans white beans".to_string(),
                "1 cup onion, diced".to_string(),
                "2 cloves garlic, minced".to_string(),
                "1 tbsp olive oil".to_string(),
                "salt to taste".to_string(),
            ],
        ),
        IngredientGroup::new(
            "Bean Salad",
            vec![
                "1 14 oz can white beans".to_string(),
                "1/2 cup onions".to_string(),
                "3 garlic cloves".to_string(),
                "2 tbsp extra virgin olive oil".to_string(),
            ],
        ),
    ]
}

#[test]
fn test_compound_container_parse() {
    init_logging();
    let parsed = parse_line("4 14-ounce cans white beans");
    assert_eq!(parsed.amount, Some(4.0));
    assert_eq!(
        parsed.unit.as_ref().map(Unit::canonical_id),
        Some("14-oz can".to_string())
    );
    assert_eq!(parsed.name, "white beans");
}

#[test]
fn test_full_pipeline_merges_and_converts() {
    init_logging();
    let items = build_shopping_list(&groups(), &RuleBasedCategories);

    let beans = items.iter().find(|i| i.item_name == "white beans").unwrap();
    assert_eq!(beans.quantity_amount, Some(5.0));
    assert_eq!(beans.quantity_unit.as_deref(), Some("14-oz can"));
    assert_eq!(beans.grocery_category, "Canned Goods");
    assert_eq!(beans.source_recipe_title, "White Bean Chili, Bean Salad");

    let onion = items.iter().find(|i| i.item_name == "onion").unwrap();
    assert_eq!(onion.quantity_amount, Some(1.5));
    assert_eq!(onion.quantity_unit.as_deref(), Some("cup"));
    assert_eq!(onion.grocery_category, "Produce");

    // "2 cloves garlic" + "3 garlic cloves" both normalize to garlic in
    // cloves and sum.
    let garlic = items.iter().find(|i| i.item_name == "garlic").unwrap();
    assert_eq!(garlic.quantity_amount, Some(5.0));
    assert_eq!(garlic.quantity_unit.as_deref(), Some("clove"));

    // "extra virgin olive oil" collapses into "olive oil" and tablespoons
    // sum within the volume family.
    let oil = items.iter().find(|i| i.item_name == "olive oil").unwrap();
    assert_eq!(oil.quantity_amount, Some(3.0));
    assert_eq!(oil.quantity_unit.as_deref(), Some("tbsp"));

    // The unparseable line survives verbatim, unquantified.
    let salt = items.iter().find(|i| i.item_name == "salt to taste").unwrap();
    assert_eq!(salt.quantity_amount, None);
    assert_eq!(salt.quantity_unit, None);
}

#[test]
fn test_pipeline_is_order_independent() {
    init_logging();
    let forward = groups();
    let mut reversed = groups();
    reversed.reverse();
    for group in &mut reversed {
        group.ingredients.reverse();
    }

    let a = build_shopping_list(&forward, &RuleBasedCategories);
    let b = build_shopping_list(&reversed, &RuleBasedCategories);
    assert_eq!(a.len(), b.len());
    for item in &a {
        let twin = b.iter().find(|i| {
            i.item_name == item.item_name && i.quantity_unit == item.quantity_unit
        });
        let twin = twin.unwrap_or_else(|| panic!("missing twin for '{}'", item.item_name));
        match (item.quantity_amount, twin.quantity_amount) {
            (Some(x), Some(y)) => assert!((x - y).abs() < 1e-9),
            (x, y) => assert_eq!(x, y),
        }
        assert_eq!(item.grocery_category, twin.grocery_category);
    }
}

#[test]
fn test_parser_is_total_on_arbitrary_lines() {
    init_logging();
    let garbage = [
        "",
        "   ",
        "!!!",
        "1/0 cups chaos",
        "½",
        "🍅🍅🍅",
        "((((nested",
        "2 large eggs",
        "salt to taste",
        "a pinch of saffron",
        "juice of 1 lemon",
        "1 2 3 4 5",
    ];
    for line in garbage {
        // Must never panic; a record always comes back.
        let _ = parse_line(line);
    }

    let groups = vec![IngredientGroup::new(
        "Fuzz",
        garbage.iter().map(|s| s.to_string()).collect(),
    )];
    let _ = build_shopping_list(&groups, &RuleBasedCategories);
}

#[test]
fn test_markdown_rendering() {
    init_logging();
    let items = build_shopping_list(&groups(), &RuleBasedCategories);
    let markdown = render_markdown(&items);

    assert!(markdown.starts_with("# Shopping List\n"));
    assert!(markdown.contains("## Produce"));
    assert!(markdown.contains("## Canned Goods"));
    assert!(markdown.contains("- [ ] 5 14-oz cans white beans"));
    assert!(markdown.contains("- [ ] 1 1/2 cups onion"));
    assert!(markdown.contains("- [ ] 5 cloves garlic"));
    assert!(markdown.contains("- [ ] salt to taste"));

    // Produce section renders before Condiments & Oils.
    let produce = markdown.find("## Produce").unwrap();
    let condiments = markdown.find("## Condiments & Oils").unwrap();
    assert!(produce < condiments);
}
