//! # Ingredient Line Parser
//!
//! Parses one raw ingredient line into a structured [`ParsedIngredient`]:
//! amount (raw token + parsed number), unit (raw + resolved), preparation
//! note, and residual name.
//!
//! ## Features
//!
//! - Preparation split on the first top-level comma or a parenthetical,
//!   unless the parenthetical is itself unit information ("(2 cloves)")
//!   or an "or"/slash alternative
//! - Special quantity phrases ("a pinch of", "a handful of") mapped to a
//!   null amount with the phrase kept as the placeholder marker
//! - Compound quantities ("1 14.5 oz can ...") where the leading integer
//!   is the count and size+container fold into one compound unit
//! - Longest-match-first unit scan with descriptive-adjective pushback
//!   ("2 large eggs" keeps "large" in the name)
//! - Total-failure fallback: the name is the verbatim trimmed input, so
//!   parsing never errors and downstream UI always has something to show

use crate::amount::parse_amount;
use crate::model::ParsedIngredient;
use crate::units::{CanonicalUnit, Unit};
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

lazy_static! {
    /// Leading quantity token: mixed number, fraction, glyph, decimal,
    /// integer, optionally prefixed with an approximation marker and
    /// optionally extended into a range (whose upper bound the amount
    /// parser discards).
    static ref AMOUNT_PREFIX: Regex = Regex::new(
        r"(?ix)^
        (?P<amt>
            (?:(?:about|approx(?:imately)?\.?|around|roughly)\s+)?
            ~?\s*
            (?:\d+\s+\d+\s*/\s*\d+
              |\d+\s*/\s*\d+
              |\d+\s*[\u{00BC}-\u{00BE}\u{2150}-\u{215E}]
              |[\u{00BC}-\u{00BE}\u{2150}-\u{215E}]
              |\d*\.\d+
              |\d+
            )
            (?:\s*(?:-|\u{2013}|\u{2014}|\bto\b|\bor\b)\s*
                (?:\d+\s+\d+\s*/\s*\d+|\d+\s*/\s*\d+|\d*\.\d+|\d+)
            )?
        )
        \s*"
    )
    .expect("valid regex");

    /// Compound container unit: "<size> <weight-or-volume> <container>",
    /// e.g. "14-ounce cans", "14.5 oz can", "400g jar".
    static ref COMPOUND_CONTAINER: Regex = Regex::new(
        r"(?ix)^
        (?P<size>\d+(?:\.\d+)?)\s*-?\s*
        (?P<szunit>ounces?|oz|grams?|g|pounds?|lbs?|lb|milliliters?|millilitres?|ml|liters?|litres?|l)
        \.?\s+
        (?P<container>cans?|jars?|bottles?|packages?|packets?|boxes?|bags?|containers?|cartons?)
        (?:\s+|$)"
    )
    .expect("valid regex");

    /// First parenthetical group (no nesting inside).
    static ref PARENTHETICAL: Regex = Regex::new(r"\(([^()]*)\)").expect("valid regex");
}

/// Quantity phrases that carry no numeric value. The phrase itself stays
/// as the raw amount token; pinch/dash/handful double as placeholder
/// units.
const SPECIAL_PHRASES: &[(&str, Option<CanonicalUnit>)] = &[
    ("a pinch of", Some(CanonicalUnit::Pinch)),
    ("a pinch", Some(CanonicalUnit::Pinch)),
    ("pinch of", Some(CanonicalUnit::Pinch)),
    ("a dash of", Some(CanonicalUnit::Dash)),
    ("a dash", Some(CanonicalUnit::Dash)),
    ("dash of", Some(CanonicalUnit::Dash)),
    ("a handful of", Some(CanonicalUnit::Handful)),
    ("a handful", Some(CanonicalUnit::Handful)),
    ("handful of", Some(CanonicalUnit::Handful)),
    ("a couple of", None),
    ("a couple", None),
    ("a few", None),
    ("a little", None),
    ("a bit of", None),
];

/// Words that look like they could follow an amount but are descriptors,
/// not units. A match here pushes the token back into the name.
const DESCRIPTIVE_ADJECTIVES: &[&str] = &[
    "large", "medium", "small", "big", "fresh", "whole", "ripe", "heaping", "scant", "level",
    "generous", "thin", "thick", "jumbo", "extra",
];

/// Parse one raw ingredient line. Total: never errors, never panics; at
/// worst the whole trimmed input becomes the name.
pub fn parse_line(line: &str) -> ParsedIngredient {
    let original = line.trim();
    if original.is_empty() {
        return ParsedIngredient::new("");
    }

    let mut record = ParsedIngredient::new("");
    let mut remainder = original.to_string();

    extract_preparation(&mut remainder, &mut record);
    extract_amount(&mut remainder, &mut record);
    extract_unit(&mut remainder, &mut record);

    let name = clean_name(&remainder);
    if record.amount_raw.is_none() && record.unit_raw.is_none() && record.preparation.is_none() {
        // Total-failure fallback: keep the input verbatim.
        record.name = original.to_string();
    } else if name.is_empty() {
        // Quantity-only line ("2 cups"): keep the verbatim input so an
        // empty name only ever means empty input.
        record.name = original.to_string();
    } else {
        record.name = name;
    }

    trace!("parsed line '{}' -> {:?}", original, record);
    record
}

/// Stage 1: split off the preparation note.
fn extract_preparation(remainder: &mut String, record: &mut ParsedIngredient) {
    if let Some(idx) = top_level_comma(remainder) {
        let after = remainder[idx + 1..].trim().to_string();
        let before = remainder[..idx].trim_end().to_string();
        if !after.is_empty() && !before.is_empty() {
            debug!("preparation from comma clause: '{}'", after);
            record.preparation = Some(after);
            *remainder = before;
        }
    }

    if let Some(caps) = PARENTHETICAL.captures(remainder.as_str()) {
        let content = caps[1].trim().to_string();
        let whole = caps.get(0).map(|m| (m.start(), m.end()));
        if !content.is_empty() && !is_unit_like(&content) && !is_alternative(&content) {
            if let Some((start, end)) = whole {
                let mut stripped = String::with_capacity(remainder.len());
                stripped.push_str(&remainder[..start]);
                stripped.push_str(&remainder[end..]);
                *remainder = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
                record.preparation = match record.preparation.take() {
                    Some(existing) => Some(format!("{}, {}", existing, content)),
                    None => Some(content),
                };
            }
        }
    }
}

/// Stage 2: extract the quantity token.
fn extract_amount(remainder: &mut String, record: &mut ParsedIngredient) {
    // Special phrases first: they carry no numeric value but mark both
    // the raw amount and, for pinch/dash/handful, a placeholder unit.
    for (phrase, unit) in SPECIAL_PHRASES {
        let len = phrase.len();
        if remainder.len() <= len
            || !remainder.is_char_boundary(len)
            || !remainder[..len].eq_ignore_ascii_case(phrase)
        {
            continue;
        }
        let boundary_ok = remainder[len..]
            .chars()
            .next()
            .map(|c| c.is_whitespace())
            .unwrap_or(false);
        if !boundary_ok {
            continue;
        }
        let raw = remainder[..len].to_string();
        *remainder = remainder[len..].trim_start().to_string();
        record.amount_raw = Some(raw);
        record.amount = None;
        if let Some(unit) = unit {
            // Last word of the phrase names the placeholder unit.
            let marker = phrase
                .split_whitespace()
                .find(|w| *w != "a" && *w != "of")
                .unwrap_or(phrase);
            record.unit_raw = Some(marker.to_string());
            record.unit = Some(Unit::Canonical(*unit));
        }
        debug!("special quantity phrase '{}'", phrase);
        return;
    }

    if let Some(caps) = AMOUNT_PREFIX.captures(remainder.as_str()) {
        let raw = caps.name("amt").map(|m| m.as_str().trim()).unwrap_or("");
        let consumed = caps.get(0).map(|m| m.end()).unwrap_or(0);
        if !raw.is_empty() {
            record.amount = parse_amount(raw);
            record.amount_raw = Some(raw.to_string());
            *remainder = remainder[consumed..].to_string();
        }
    }
}

/// Stages 3 and 4: resolve the unit, folding compound container units
/// ("14-oz can") into a single identifier.
fn extract_unit(remainder: &mut String, record: &mut ParsedIngredient) {
    if record.unit.is_some() {
        return; // placeholder unit already set by a special phrase
    }

    if let Some(caps) = COMPOUND_CONTAINER.captures(remainder.as_str()) {
        let size = &caps["size"];
        let size_unit = normalize_size_unit(&caps["szunit"]);
        let container = container_unit(&caps["container"]);
        let consumed = caps.get(0).map(|m| m.end()).unwrap_or(0);
        let raw = remainder[..consumed].trim().to_string();
        let unit = Unit::Compound {
            size: format!("{}-{}", size, size_unit),
            container,
        };
        debug!("compound container unit '{}'", unit.canonical_id());
        record.unit = Some(unit);
        record.unit_raw = Some(raw);
        *remainder = remainder[consumed..].to_string();
        return;
    }

    // Descriptive adjectives are not units; push them back into the name.
    if let Some(first_word) = remainder.split_whitespace().next() {
        let lowered = first_word.to_lowercase();
        if DESCRIPTIVE_ADJECTIVES.contains(&lowered.as_str()) {
            trace!("'{}' is a descriptor, not a unit", first_word);
            return;
        }
    }

    if let Some((unit, len)) = CanonicalUnit::match_prefix(remainder.as_str()) {
        let raw = remainder[..len].trim().to_string();
        record.unit = Some(Unit::Canonical(unit));
        record.unit_raw = Some(raw);
        let mut rest = remainder[len..].trim_start();
        // "2 cups of flour" -> drop the connective
        if rest.len() >= 3 && rest.is_char_boundary(3) && rest[..3].eq_ignore_ascii_case("of ") {
            rest = rest[3..].trim_start();
        }
        *remainder = rest.to_string();
    }
}

/// Byte index of the first comma not inside parentheses.
fn top_level_comma(text: &str) -> Option<usize> {
    let mut depth = 0u32;
    for (idx, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return Some(idx),
            _ => {}
        }
    }
    None
}

/// Whether parenthetical content is unit information ("2 cloves",
/// "about 14 oz") rather than a preparation note.
fn is_unit_like(content: &str) -> bool {
    let mut rest = content.trim();
    if let Some(caps) = AMOUNT_PREFIX.captures(rest) {
        let end = caps.get(0).map(|m| m.end()).unwrap_or(0);
        rest = rest[end..].trim_start();
        if rest.is_empty() {
            return true; // bare count, e.g. "(2)"
        }
    }
    if COMPOUND_CONTAINER.is_match(rest) {
        return true;
    }
    match CanonicalUnit::match_prefix(rest) {
        Some((_, len)) => rest[len..].trim().is_empty(),
        None => false,
    }
}

/// Whether parenthetical content is an "or"/slash alternative that should
/// stay with the name for the display-name parser.
fn is_alternative(content: &str) -> bool {
    let lower = content.trim().to_lowercase();
    lower.starts_with("or ") || lower.contains('/')
}

fn normalize_size_unit(spelling: &str) -> &'static str {
    match spelling.to_lowercase().as_str() {
        "ounce" | "ounces" | "oz" => "oz",
        "gram" | "grams" | "g" => "g",
        "pound" | "pounds" | "lb" | "lbs" => "lb",
        "milliliter" | "milliliters" | "millilitre" | "millilitres" | "ml" => "ml",
        _ => "l",
    }
}

fn container_unit(spelling: &str) -> CanonicalUnit {
    let singular = spelling.to_lowercase();
    let singular = singular.trim_end_matches('s');
    match singular {
        "can" => CanonicalUnit::Can,
        "jar" => CanonicalUnit::Jar,
        "bottle" => CanonicalUnit::Bottle,
        "bag" => CanonicalUnit::Bag,
        _ => CanonicalUnit::Package,
    }
}

fn clean_name(remainder: &str) -> String {
    let collapsed = remainder.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c: char| c == '-' || c == ':' || c == ';')
        .trim()
        .to_string()
}
