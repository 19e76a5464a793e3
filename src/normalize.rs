//! # Name Normalizer Module
//!
//! Canonicalizes ingredient names into aggregation keys: alias collapsing,
//! noise and adjective stripping with a meaningful-descriptor preservation
//! list, confusable spelling fixes, and head-word singularization with a
//! plural-exception table.
//!
//! Two raw strings normalize identically if and only if they denote the
//! same shelf item; that equivalence is the load-bearing invariant of the
//! whole aggregation pipeline.
//!
//! A second, conservative display variant ([`parse_display_name`]) detects
//! "(removed)" / "(substituted for X)" markers and "or"/slash alternatives
//! without touching the recipe's wording. The two variants must not be
//! conflated: one is the aggregation key, the other is UI text.

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

lazy_static! {
    static ref PAREN: Regex = Regex::new(r"\([^()]*\)").expect("valid regex");
    static ref NOISE_TOKEN: Regex = Regex::new(r"^\d").expect("valid regex");
    static ref REMOVED_MARKER: Regex =
        Regex::new(r"(?i)\(\s*removed\s*\)").expect("valid regex");
    static ref SUBSTITUTED_MARKER: Regex =
        Regex::new(r"(?i)\(\s*substituted?\s+for\s+([^()]+?)\s*\)").expect("valid regex");
    static ref OR_SPLIT: Regex = Regex::new(r"(?i)\s+or\s+").expect("valid regex");
}

/// Whole-phrase synonym collapsing, applied before any token surgery and
/// again after cleanup. Values are themselves fully normalized.
static ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    map.insert("green onion", "scallion");
    map.insert("green onions", "scallion");
    map.insert("spring onion", "scallion");
    map.insert("spring onions", "scallion");
    map.insert("scallions", "scallion");
    map.insert("scallion", "scallion");

    map.insert("garlic clove", "garlic");
    map.insert("garlic cloves", "garlic");
    map.insert("clove garlic", "garlic");
    map.insert("cloves garlic", "garlic");
    map.insert("clove of garlic", "garlic");
    map.insert("cloves of garlic", "garlic");

    map.insert("extra virgin olive oil", "olive oil");
    map.insert("extra-virgin olive oil", "olive oil");
    map.insert("evoo", "olive oil");

    map.insert("iodized salt", "table salt");

    map.insert("garbanzo beans", "chickpeas");
    map.insert("garbanzos", "chickpeas");

    map.insert("all purpose flour", "all-purpose flour");
    map.insert("ap flour", "all-purpose flour");

    map.insert("coriander leaves", "cilantro");
    map.insert("cilantro leaves", "cilantro");

    map.insert("powdered sugar", "confectioners sugar");
    map.insert("confectioner's sugar", "confectioners sugar");
    map.insert("icing sugar", "confectioners sugar");

    map
});

/// Descriptive adjectives irrelevant to shopping: size and prep state.
const REMOVABLE_ADJECTIVES: &[&str] = &[
    "large", "medium", "small", "big", "jumbo", "extra", "super", "organic", "fresh", "freshly",
    "ripe", "raw", "chopped", "diced", "minced", "sliced", "grated", "shredded", "peeled",
    "crushed", "cubed", "torn", "packed", "heaping", "beaten", "softened", "melted", "divided",
    "trimmed", "rinsed", "drained", "finely", "thinly", "roughly", "coarsely", "cooked",
    "uncooked",
];

/// (adjective, following word) pairs that survive adjective removal:
/// color/variety qualifiers that name a distinct shelf item. The second
/// element is matched against the singularized next token.
const PRESERVED_PAIRS: &[(&str, &str)] = &[
    ("fresh", "mozzarella"),
    ("fresh", "ginger"),
    ("large", "curd"),
    ("small", "curd"),
    ("extra", "sharp"),
    ("extra", "firm"),
];

/// Confusable spellings fixed per token.
const SPELLING_FIXES: &[(&str, &str)] = &[
    ("tomatoe", "tomato"),
    ("tomatos", "tomatoes"),
    ("potatoe", "potato"),
    ("potatos", "potatoes"),
    ("brocolli", "broccoli"),
    ("zuchini", "zucchini"),
    ("avacado", "avocado"),
    ("cillantro", "cilantro"),
];

/// Words that remain plural: legumes, grains, seeds and nuts as sold, and
/// items with no meaningful singular.
const PLURAL_EXCEPTIONS: &[&str] = &[
    "beans",
    "peas",
    "chickpeas",
    "lentils",
    "oats",
    "grits",
    "greens",
    "collards",
    "noodles",
    "breadcrumbs",
    "sprinkles",
    "flakes",
    "seeds",
    "nuts",
    "sprouts",
    "chives",
    "capers",
    "molasses",
    "leftovers",
];

/// Weight/volume words dropped from names as measurement residue.
/// Container nouns (can, jar) are deliberately NOT here; "can tomato" is a
/// different shelf item than "tomato".
const MEASUREMENT_NOISE: &[&str] = &[
    "oz", "ounce", "ounces", "g", "gram", "grams", "kg", "lb", "lbs", "pound", "pounds", "ml",
    "l", "liter", "liters", "litre", "litres", "fl", "of",
];

/// Normalize an ingredient name into its canonical aggregation key.
///
/// Pure function of the input and the static tables; never errors.
/// Unknown words pass through unchanged after whitespace/punctuation
/// cleanup, and `normalize` is idempotent.
pub fn normalize(name: &str) -> String {
    // (a) lowercase and trim
    let lowered = name.trim().to_lowercase();
    if lowered.is_empty() {
        return String::new();
    }

    // (b) strip parentheticals and leading punctuation/range markers
    let mut text = PAREN.replace_all(&lowered, " ").to_string();
    text = text
        .trim_start_matches(|c: char| c == '-' || c == '~' || c == '*' || c == '.')
        .trim()
        .to_string();
    for marker in ["about ", "approximately ", "approx. ", "approx "] {
        if let Some(stripped) = text.strip_prefix(marker) {
            text = stripped.trim_start().to_string();
            break;
        }
    }
    let cleaned = text
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| matches!(c, ',' | '.' | ';' | ':' | '!' | '?')))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if cleaned.is_empty() {
        return String::new();
    }

    // (c) whole-phrase aliases, checked before singularization
    if let Some(alias) = ALIASES.get(cleaned.as_str()) {
        trace!("alias '{}' -> '{}'", cleaned, alias);
        return (*alias).to_string();
    }

    // (d) drop measurement residue and shopping-irrelevant adjectives
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let mut kept: Vec<String> = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        if NOISE_TOKEN.is_match(token) || MEASUREMENT_NOISE.contains(token) {
            continue;
        }
        if REMOVABLE_ADJECTIVES.contains(token) {
            let next = tokens.get(i + 1).copied().unwrap_or("");
            let next_singular = singularize(next);
            let preserved = PRESERVED_PAIRS
                .iter()
                .any(|(adj, noun)| adj == token && (*noun == next || *noun == next_singular));
            if !preserved {
                continue;
            }
        }
        // (e) confusable spelling fixes
        let fixed = SPELLING_FIXES
            .iter()
            .find(|(wrong, _)| wrong == token)
            .map(|(_, right)| (*right).to_string())
            .unwrap_or_else(|| (*token).to_string());
        kept.push(fixed);
    }
    if kept.is_empty() {
        // Nothing but noise: pass the cleaned text through rather than
        // returning an empty key.
        return cleaned;
    }

    let joined = kept.join(" ");
    if let Some(alias) = ALIASES.get(joined.as_str()) {
        trace!("alias '{}' -> '{}'", joined, alias);
        return (*alias).to_string();
    }

    // (f) singularize the head word only
    let mut words = kept;
    if let Some(last) = words.last_mut() {
        *last = singularize(last);
    }
    words.join(" ")
}

/// Singularize one lowercase word, honoring the plural-exception table and
/// an implausibly-short guard.
fn singularize(word: &str) -> String {
    if word.len() < 4 || PLURAL_EXCEPTIONS.contains(&word) || word.ends_with("berries") {
        return word.to_string();
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() >= 2 {
            return format!("{}y", stem);
        }
    }
    if word.ends_with("oes")
        || word.ends_with("shes")
        || word.ends_with("ches")
        || word.ends_with("xes")
        || word.ends_with("zes")
        || word.ends_with("sses")
    {
        return word[..word.len() - 2].to_string();
    }
    if let Some(stem) = word.strip_suffix('s') {
        if stem.len() >= 3 {
            return stem.to_string();
        }
    }
    word.to_string()
}

/// Name parse result for UI display. Keeps the recipe's wording; only the
/// status markers are lifted out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName {
    /// The wording to show, markers stripped, whitespace collapsed
    pub text: String,
    /// Whether the ingredient carried a "(removed)" marker
    pub removed: bool,
    /// The replacement named by a "(substituted for X)" marker
    pub substituted_for: Option<String>,
    /// The options of an "or"/slash alternative, in written order; empty
    /// when the name is not an alternative
    pub alternatives: Vec<String>,
}

/// Parse a name for display. Unlike [`normalize`], this applies no alias
/// collapsing and no adjective stripping: the UI must show what the recipe
/// said.
pub fn parse_display_name(name: &str) -> DisplayName {
    let mut text = name.trim().to_string();
    let mut removed = false;
    let mut substituted_for = None;

    if REMOVED_MARKER.is_match(&text) {
        removed = true;
        text = REMOVED_MARKER.replace_all(&text, " ").to_string();
    }
    if let Some(caps) = SUBSTITUTED_MARKER.captures(&text) {
        substituted_for = Some(caps[1].trim().to_string());
        text = SUBSTITUTED_MARKER.replace(&text, " ").to_string();
    }
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut alternatives: Vec<String> = Vec::new();
    if text.contains('/') {
        let parts: Vec<&str> = text.split('/').map(str::trim).collect();
        if parts.len() > 1 && parts.iter().all(|p| !p.is_empty() && !p.starts_with(|c: char| c.is_ascii_digit())) {
            alternatives = parts.into_iter().map(str::to_string).collect();
        }
    } else if OR_SPLIT.is_match(&text) {
        let parts: Vec<String> = OR_SPLIT
            .split(&text)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() > 1 {
            alternatives = parts;
        }
    }

    DisplayName {
        text,
        removed,
        substituted_for,
        alternatives,
    }
}
