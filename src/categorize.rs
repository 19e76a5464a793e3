//! # Categorizer Module
//!
//! Rule-based fallback that maps a normalized ingredient name to a
//! grocery-store section. This is the degraded-mode substitute used when
//! the external AI categorizer is unavailable; it must stay deterministic
//! and side-effect-free.
//!
//! Rules are an ordered list checked most-specific-first so compound
//! names land correctly: "garlic powder" is a spice, not produce, even
//! though it contains "garlic". Matching is whole-word phrase containment
//! ("can" never matches inside "pecan").

/// Terminal fallback category.
pub const CATEGORY_OTHER: &str = "Other";

/// Ordered keyword rules. First match wins, so specific compound phrases
/// must stay above the generic single words they contain.
const RULES: &[(&str, &str)] = &[
    // --- Compound disambiguators, checked before everything generic ---
    ("garlic powder", "Spices & Herbs"),
    ("onion powder", "Spices & Herbs"),
    ("chili powder", "Spices & Herbs"),
    ("curry powder", "Spices & Herbs"),
    ("mustard powder", "Spices & Herbs"),
    ("garlic salt", "Spices & Herbs"),
    ("onion salt", "Spices & Herbs"),
    ("celery salt", "Spices & Herbs"),
    ("seasoned salt", "Spices & Herbs"),
    ("dried basil", "Spices & Herbs"),
    ("dried oregano", "Spices & Herbs"),
    ("dried thyme", "Spices & Herbs"),
    ("dried rosemary", "Spices & Herbs"),
    ("dried dill", "Spices & Herbs"),
    ("dried parsley", "Spices & Herbs"),
    ("ground cumin", "Spices & Herbs"),
    ("ground ginger", "Spices & Herbs"),
    ("ground cinnamon", "Spices & Herbs"),
    ("ground coriander", "Spices & Herbs"),
    ("tomato paste", "Canned Goods"),
    ("tomato sauce", "Canned Goods"),
    ("tomato puree", "Canned Goods"),
    ("can tomato", "Canned Goods"),
    ("canned tomato", "Canned Goods"),
    ("crushed tomato", "Canned Goods"),
    ("diced tomato", "Canned Goods"),
    ("sun-dried tomato", "Canned Goods"),
    ("chicken broth", "Canned Goods"),
    ("chicken stock", "Canned Goods"),
    ("beef broth", "Canned Goods"),
    ("beef stock", "Canned Goods"),
    ("vegetable broth", "Canned Goods"),
    ("vegetable stock", "Canned Goods"),
    ("bone broth", "Canned Goods"),
    ("coconut milk", "Canned Goods"),
    ("condensed milk", "Canned Goods"),
    ("evaporated milk", "Canned Goods"),
    ("canned tuna", "Canned Goods"),
    ("can tuna", "Canned Goods"),
    ("almond milk", "Beverages"),
    ("oat milk", "Beverages"),
    ("soy milk", "Beverages"),
    ("rice milk", "Beverages"),
    ("peanut butter", "Condiments & Oils"),
    ("almond butter", "Condiments & Oils"),
    ("ice cream", "Frozen"),
    ("egg noodle", "Pasta & Grains"),
    ("egg noodles", "Pasta & Grains"),
    ("rolled oats", "Pasta & Grains"),
    ("bell pepper", "Produce"),
    ("chili pepper", "Produce"),
    ("jalapeno", "Produce"),
    ("jalapeño", "Produce"),
    ("poblano", "Produce"),
    ("serrano", "Produce"),
    ("habanero", "Produce"),
    ("fish sauce", "Condiments & Oils"),
    ("oyster sauce", "Condiments & Oils"),
    ("soy sauce", "Condiments & Oils"),
    ("hot sauce", "Condiments & Oils"),
    ("worcestershire", "Condiments & Oils"),
    ("breadcrumbs", "Baking"),
    ("bread crumbs", "Baking"),
    ("panko", "Baking"),
    ("chocolate chip", "Baking"),
    ("chocolate chips", "Baking"),
    ("potato chips", "Snacks"),
    ("tortilla chips", "Snacks"),
    ("cream cheese", "Dairy & Eggs"),
    ("sour cream", "Dairy & Eggs"),
    ("heavy cream", "Dairy & Eggs"),
    ("whipping cream", "Dairy & Eggs"),
    ("half-and-half", "Dairy & Eggs"),
    ("half and half", "Dairy & Eggs"),
    ("maple syrup", "Condiments & Oils"),
    // --- Frozen, before any raw ingredient words ---
    ("frozen", "Frozen"),
    // --- Oils, vinegars, condiments ---
    ("olive oil", "Condiments & Oils"),
    ("vegetable oil", "Condiments & Oils"),
    ("canola oil", "Condiments & Oils"),
    ("sesame oil", "Condiments & Oils"),
    ("coconut oil", "Condiments & Oils"),
    ("peanut oil", "Condiments & Oils"),
    ("avocado oil", "Condiments & Oils"),
    ("oil", "Condiments & Oils"),
    ("vinegar", "Condiments & Oils"),
    ("balsamic", "Condiments & Oils"),
    ("ketchup", "Condiments & Oils"),
    ("mustard", "Condiments & Oils"),
    ("mayonnaise", "Condiments & Oils"),
    ("salsa", "Condiments & Oils"),
    ("honey", "Condiments & Oils"),
    ("tahini", "Condiments & Oils"),
    // --- Baking ---
    ("baking powder", "Baking"),
    ("baking soda", "Baking"),
    ("vanilla extract", "Baking"),
    ("almond extract", "Baking"),
    ("vanilla", "Baking"),
    ("yeast", "Baking"),
    ("flour", "Baking"),
    ("cornstarch", "Baking"),
    ("corn starch", "Baking"),
    ("cocoa", "Baking"),
    ("confectioners sugar", "Baking"),
    ("powdered sugar", "Baking"),
    ("brown sugar", "Baking"),
    ("sugar", "Baking"),
    ("molasses", "Baking"),
    ("chocolate", "Baking"),
    // --- Spices & Herbs (generic) ---
    ("salt", "Spices & Herbs"),
    ("powder", "Spices & Herbs"),
    ("peppercorn", "Spices & Herbs"),
    ("pepper", "Spices & Herbs"),
    ("paprika", "Spices & Herbs"),
    ("cumin", "Spices & Herbs"),
    ("turmeric", "Spices & Herbs"),
    ("cinnamon", "Spices & Herbs"),
    ("nutmeg", "Spices & Herbs"),
    ("allspice", "Spices & Herbs"),
    ("cardamom", "Spices & Herbs"),
    ("cayenne", "Spices & Herbs"),
    ("saffron", "Spices & Herbs"),
    ("oregano", "Spices & Herbs"),
    ("bay leaf", "Spices & Herbs"),
    ("bay leaves", "Spices & Herbs"),
    ("red pepper flakes", "Spices & Herbs"),
    ("seasoning", "Spices & Herbs"),
    ("spice", "Spices & Herbs"),
    // --- Meat & Seafood ---
    ("chicken", "Meat & Seafood"),
    ("beef", "Meat & Seafood"),
    ("pork", "Meat & Seafood"),
    ("turkey", "Meat & Seafood"),
    ("lamb", "Meat & Seafood"),
    ("bacon", "Meat & Seafood"),
    ("sausage", "Meat & Seafood"),
    ("ham", "Meat & Seafood"),
    ("steak", "Meat & Seafood"),
    ("prosciutto", "Meat & Seafood"),
    ("chorizo", "Meat & Seafood"),
    ("salmon", "Meat & Seafood"),
    ("tuna", "Meat & Seafood"),
    ("shrimp", "Meat & Seafood"),
    ("crab", "Meat & Seafood"),
    ("scallop", "Meat & Seafood"),
    ("tilapia", "Meat & Seafood"),
    ("cod", "Meat & Seafood"),
    ("anchovy", "Meat & Seafood"),
    ("anchovies", "Meat & Seafood"),
    ("fish", "Meat & Seafood"),
    // --- Dairy & Eggs ---
    ("buttermilk", "Dairy & Eggs"),
    ("milk", "Dairy & Eggs"),
    ("butter", "Dairy & Eggs"),
    ("cheddar", "Dairy & Eggs"),
    ("mozzarella", "Dairy & Eggs"),
    ("parmesan", "Dairy & Eggs"),
    ("feta", "Dairy & Eggs"),
    ("ricotta", "Dairy & Eggs"),
    ("cheese", "Dairy & Eggs"),
    ("yogurt", "Dairy & Eggs"),
    ("egg", "Dairy & Eggs"),
    ("eggs", "Dairy & Eggs"),
    ("cream", "Dairy & Eggs"),
    // --- Pasta & Grains ---
    ("spaghetti", "Pasta & Grains"),
    ("penne", "Pasta & Grains"),
    ("macaroni", "Pasta & Grains"),
    ("linguine", "Pasta & Grains"),
    ("fettuccine", "Pasta & Grains"),
    ("lasagna", "Pasta & Grains"),
    ("orzo", "Pasta & Grains"),
    ("pasta", "Pasta & Grains"),
    ("noodles", "Pasta & Grains"),
    ("rice", "Pasta & Grains"),
    ("quinoa", "Pasta & Grains"),
    ("couscous", "Pasta & Grains"),
    ("barley", "Pasta & Grains"),
    ("oats", "Pasta & Grains"),
    ("oatmeal", "Pasta & Grains"),
    ("cereal", "Pasta & Grains"),
    // --- Canned / dry goods ---
    ("beans", "Canned Goods"),
    ("chickpeas", "Canned Goods"),
    ("lentils", "Canned Goods"),
    ("broth", "Canned Goods"),
    ("stock", "Canned Goods"),
    ("canned", "Canned Goods"),
    ("can", "Canned Goods"),
    // --- Bakery ---
    ("tortilla", "Bakery"),
    ("pita", "Bakery"),
    ("naan", "Bakery"),
    ("bagel", "Bakery"),
    ("baguette", "Bakery"),
    ("croissant", "Bakery"),
    ("bun", "Bakery"),
    ("bread", "Bakery"),
    // --- Produce ---
    ("scallion", "Produce"),
    ("shallot", "Produce"),
    ("onion", "Produce"),
    ("garlic", "Produce"),
    ("ginger", "Produce"),
    ("tomato", "Produce"),
    ("potato", "Produce"),
    ("carrot", "Produce"),
    ("celery", "Produce"),
    ("lettuce", "Produce"),
    ("spinach", "Produce"),
    ("kale", "Produce"),
    ("arugula", "Produce"),
    ("broccoli", "Produce"),
    ("cauliflower", "Produce"),
    ("cucumber", "Produce"),
    ("zucchini", "Produce"),
    ("squash", "Produce"),
    ("pumpkin", "Produce"),
    ("avocado", "Produce"),
    ("mushroom", "Produce"),
    ("corn", "Produce"),
    ("cabbage", "Produce"),
    ("asparagus", "Produce"),
    ("eggplant", "Produce"),
    ("leek", "Produce"),
    ("radish", "Produce"),
    ("beet", "Produce"),
    ("turnip", "Produce"),
    ("peas", "Produce"),
    ("green beans", "Produce"),
    ("lemon", "Produce"),
    ("lime", "Produce"),
    ("orange", "Produce"),
    ("apple", "Produce"),
    ("banana", "Produce"),
    ("pear", "Produce"),
    ("peach", "Produce"),
    ("mango", "Produce"),
    ("grape", "Produce"),
    ("grapes", "Produce"),
    ("strawberries", "Produce"),
    ("blueberries", "Produce"),
    ("raspberries", "Produce"),
    ("blackberries", "Produce"),
    ("cranberries", "Produce"),
    ("berries", "Produce"),
    ("berry", "Produce"),
    ("cherry", "Produce"),
    ("cherries", "Produce"),
    ("melon", "Produce"),
    ("watermelon", "Produce"),
    ("pineapple", "Produce"),
    ("basil", "Produce"),
    ("cilantro", "Produce"),
    ("parsley", "Produce"),
    ("mint", "Produce"),
    ("thyme", "Produce"),
    ("rosemary", "Produce"),
    ("sage", "Produce"),
    ("dill", "Produce"),
    ("chives", "Produce"),
    // --- Beverages ---
    ("juice", "Beverages"),
    ("coffee", "Beverages"),
    ("tea", "Beverages"),
    ("soda", "Beverages"),
    ("wine", "Beverages"),
    ("beer", "Beverages"),
    ("water", "Beverages"),
    // --- Snacks ---
    ("crackers", "Snacks"),
    ("pretzels", "Snacks"),
    ("popcorn", "Snacks"),
    ("chips", "Snacks"),
    ("nuts", "Snacks"),
];

/// Map a normalized ingredient name to a grocery-store section. Always
/// returns a category; unmatched names land in [`CATEGORY_OTHER`].
pub fn categorize(name: &str) -> &'static str {
    let lowered = name.trim().to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    if words.is_empty() {
        return CATEGORY_OTHER;
    }
    for (phrase, category) in RULES {
        if contains_phrase(&words, phrase) {
            return category;
        }
    }
    CATEGORY_OTHER
}

/// Whole-word contiguous phrase containment: "can" matches in "can tomato"
/// but never inside "pecan".
fn contains_phrase(words: &[&str], phrase: &str) -> bool {
    let phrase_words: Vec<&str> = phrase.split_whitespace().collect();
    if phrase_words.is_empty() || phrase_words.len() > words.len() {
        return false;
    }
    words
        .windows(phrase_words.len())
        .any(|window| window == phrase_words.as_slice())
}
