//! # Amount Parser Module
//!
//! Converts quantity tokens (integers, decimals, simple fractions, mixed
//! numbers, unicode fraction glyphs, ranges, approximation phrases) into
//! numeric values, and formats numeric values back into human fraction
//! strings for display.
//!
//! The formatter is intentionally lossy (fraction snapping), but the
//! round trip is bounded: `parse_amount(format_amount(x))` stays within
//! 0.02 of `x` for all `x` in `[0, 1000)`.

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

lazy_static! {
    /// Mixed number: "1 1/2", "2 3/4"
    static ref MIXED: Regex = Regex::new(r"^(\d+)\s+(\d+)\s*/\s*(\d+)$").expect("valid regex");
    /// Simple fraction: "3/4", "1 / 2"
    static ref FRACTION: Regex = Regex::new(r"^(\d+)\s*/\s*(\d+)$").expect("valid regex");
    /// Whole number with a trailing fraction glyph: "1½"
    static ref MIXED_GLYPH: Regex =
        Regex::new(r"^(\d+)\s*([\u{00BC}-\u{00BE}\u{2150}-\u{215E}])$").expect("valid regex");
    /// Plain decimal or integer: "2", "2.5", ".5"
    static ref DECIMAL: Regex = Regex::new(r"^\d*\.?\d+$").expect("valid regex");
    /// Range: "2-3", "2 – 3", "1 1/2 to 2", "2 or 3". The upper bound is
    /// discarded by design; the first token is re-parsed on its own.
    static ref RANGE: Regex = Regex::new(
        r"(?i)^(.+?)\s*(?:-|\u{2013}|\u{2014}|\bto\b|\bor\b)\s*\d[\d\s./\u{00BC}-\u{00BE}\u{2150}-\u{215E}]*$"
    )
    .expect("valid regex");
}

/// Unicode fraction glyphs and their values.
const FRACTION_GLYPHS: &[(char, f64)] = &[
    ('\u{00BD}', 0.5),          // ½
    ('\u{2153}', 1.0 / 3.0),    // ⅓
    ('\u{2154}', 2.0 / 3.0),    // ⅔
    ('\u{00BC}', 0.25),         // ¼
    ('\u{00BE}', 0.75),         // ¾
    ('\u{2155}', 0.2),          // ⅕
    ('\u{2156}', 0.4),          // ⅖
    ('\u{2157}', 0.6),          // ⅗
    ('\u{2158}', 0.8),          // ⅘
    ('\u{2159}', 1.0 / 6.0),    // ⅙
    ('\u{215A}', 5.0 / 6.0),    // ⅚
    ('\u{215B}', 0.125),        // ⅛
    ('\u{215C}', 0.375),        // ⅜
    ('\u{215D}', 0.625),        // ⅝
    ('\u{215E}', 0.875),        // ⅞
];

/// Approximation markers stripped before numeric parsing.
const APPROXIMATION_PREFIXES: &[&str] = &["about ", "approximately ", "approx. ", "approx ", "around ", "roughly ", "~"];

fn glyph_value(c: char) -> Option<f64> {
    FRACTION_GLYPHS.iter().find(|(g, _)| *g == c).map(|(_, v)| *v)
}

/// Parse a quantity token into a numeric value.
///
/// Accepts, in priority order: mixed numbers, simple fractions, unicode
/// fraction glyphs, decimals, integers, and the first number of a
/// hyphen/en-dash/"to" range (the upper bound is discarded by design).
/// Malformed fractions (zero denominator, non-numeric parts) and
/// non-numeric phrases yield `None`, never an error.
pub fn parse_amount(token: &str) -> Option<f64> {
    let mut token = token.trim();
    for prefix in APPROXIMATION_PREFIXES {
        if token.len() >= prefix.len()
            && token.is_char_boundary(prefix.len())
            && token[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            token = token[prefix.len()..].trim_start();
            break;
        }
    }
    if token.is_empty() {
        return None;
    }

    if let Some(caps) = MIXED.captures(token) {
        let whole: f64 = caps[1].parse().ok()?;
        let num: f64 = caps[2].parse().ok()?;
        let den: f64 = caps[3].parse().ok()?;
        if den == 0.0 {
            return None;
        }
        return Some(whole + num / den);
    }

    if let Some(caps) = MIXED_GLYPH.captures(token) {
        let whole: f64 = caps[1].parse().ok()?;
        let glyph = caps[2].chars().next()?;
        return Some(whole + glyph_value(glyph)?);
    }

    if let Some(caps) = FRACTION.captures(token) {
        let num: f64 = caps[1].parse().ok()?;
        let den: f64 = caps[2].parse().ok()?;
        if den == 0.0 {
            return None;
        }
        return Some(num / den);
    }

    // Standalone fraction glyph
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(v) = glyph_value(c) {
            return Some(v);
        }
    }

    if DECIMAL.is_match(token) {
        return token.parse::<f64>().ok();
    }

    // Range: keep the lower bound only.
    if let Some(caps) = RANGE.captures(token) {
        let first = caps[1].trim();
        if first != token {
            trace!("range quantity '{}', keeping lower bound '{}'", token, first);
            return parse_amount(first);
        }
    }

    None
}

/// Fixed small-denominator fractions tried first when formatting, in
/// ascending order.
const DISPLAY_FRACTIONS: &[(u32, u32)] = &[
    (1, 8),
    (1, 4),
    (1, 3),
    (3, 8),
    (1, 2),
    (5, 8),
    (2, 3),
    (3, 4),
    (7, 8),
];

/// Snapping tolerance for fraction display. Must stay below the 0.02
/// round-trip contract with room for the final 2-decimal fallback.
const SNAP_TOLERANCE: f64 = 0.0075;

/// Best rational approximation of `x` in [0, 1) with denominator at most
/// `max_den`, via continued-fraction convergents. Iteration count is
/// fixed, so this always terminates.
fn best_fraction(x: f64, max_den: u32) -> Option<(u32, u32)> {
    let (mut p0, mut q0, mut p1, mut q1) = (1u64, 0u64, x.floor() as u64, 1u64);
    let mut rem = x - x.floor();
    for _ in 0..24 {
        if rem < 1e-9 {
            break;
        }
        let inv = 1.0 / rem;
        let a = inv.floor() as u64;
        let p2 = a.checked_mul(p1)?.checked_add(p0)?;
        let q2 = a.checked_mul(q1)?.checked_add(q0)?;
        if q2 > u64::from(max_den) {
            break;
        }
        p0 = p1;
        q0 = q1;
        p1 = p2;
        q1 = q2;
        rem = inv - a as f64;
    }
    if q1 == 0 || p1 == 0 {
        return None;
    }
    Some((p1 as u32, q1 as u32))
}

/// Format a numeric amount as a human fraction string.
///
/// Decomposes into whole part plus the nearest fraction from a fixed
/// small-denominator table, falls back to a continued-fraction
/// approximation with denominator at most 16, and finally to a 2-decimal
/// string. Negative or non-finite input returns `None` rather than
/// panicking, so one bad value never interrupts a batch.
pub fn format_amount(value: f64) -> Option<String> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    let mut whole = value.floor() as u64;
    let mut frac = value - whole as f64;
    // Snap near-integers in both directions.
    if frac > 1.0 - SNAP_TOLERANCE {
        whole += 1;
        frac = 0.0;
    }
    if frac < SNAP_TOLERANCE {
        return Some(whole.to_string());
    }

    let joined = |whole: u64, num: u32, den: u32| {
        if whole == 0 {
            format!("{}/{}", num, den)
        } else {
            format!("{} {}/{}", whole, num, den)
        }
    };

    // Nearest fraction from the fixed display table.
    let mut best: Option<(f64, (u32, u32))> = None;
    for &(num, den) in DISPLAY_FRACTIONS {
        let diff = (frac - f64::from(num) / f64::from(den)).abs();
        if best.map(|(d, _)| diff < d).unwrap_or(true) {
            best = Some((diff, (num, den)));
        }
    }
    if let Some((diff, (num, den))) = best {
        if diff < SNAP_TOLERANCE {
            return Some(joined(whole, num, den));
        }
    }

    // Continued-fraction approximation, denominator bounded to 16.
    if let Some((num, den)) = best_fraction(frac, 16) {
        if den > 1 && (frac - f64::from(num) / f64::from(den)).abs() < SNAP_TOLERANCE {
            return Some(joined(whole, num, den));
        }
    }

    Some(format!("{:.2}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integers_and_decimals() {
        assert_eq!(parse_amount("2"), Some(2.0));
        assert_eq!(parse_amount("2.5"), Some(2.5));
        assert_eq!(parse_amount(".5"), Some(0.5));
        assert_eq!(parse_amount("0.25"), Some(0.25));
    }

    #[test]
    fn test_parse_fractions() {
        assert_eq!(parse_amount("1/2"), Some(0.5));
        assert_eq!(parse_amount("3/4"), Some(0.75));
        assert_eq!(parse_amount("3 / 4"), Some(0.75));
    }

    #[test]
    fn test_parse_mixed_numbers() {
        assert_eq!(parse_amount("1 1/2"), Some(1.5));
        assert_eq!(parse_amount("2 3/4"), Some(2.75));
    }

    #[test]
    fn test_parse_unicode_fractions() {
        assert_eq!(parse_amount("½"), Some(0.5));
        assert_eq!(parse_amount("¾"), Some(0.75));
        assert_eq!(parse_amount("⅓"), Some(1.0 / 3.0));
        assert_eq!(parse_amount("1½"), Some(1.5));
        assert_eq!(parse_amount("2 ¼"), Some(2.25));
    }

    #[test]
    fn test_parse_ranges_keep_lower_bound() {
        assert_eq!(parse_amount("2-3"), Some(2.0));
        assert_eq!(parse_amount("2 – 3"), Some(2.0));
        assert_eq!(parse_amount("2 to 3"), Some(2.0));
        assert_eq!(parse_amount("1 1/2 - 2"), Some(1.5));
        assert_eq!(parse_amount("2 or 3"), Some(2.0));
    }

    #[test]
    fn test_parse_approximations() {
        assert_eq!(parse_amount("~2"), Some(2.0));
        assert_eq!(parse_amount("about 2"), Some(2.0));
        assert_eq!(parse_amount("Approximately 1/2"), Some(0.5));
    }

    #[test]
    fn test_parse_malformed_yields_none() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("to taste"), None);
        assert_eq!(parse_amount("a pinch of"), None);
        assert_eq!(parse_amount("1/0"), None);
        assert_eq!(parse_amount("2 1/0"), None);
        assert_eq!(parse_amount("x/y"), None);
        assert_eq!(parse_amount("--"), None);
    }

    #[test]
    fn test_format_whole_numbers() {
        assert_eq!(format_amount(0.0), Some("0".to_string()));
        assert_eq!(format_amount(2.0), Some("2".to_string()));
        assert_eq!(format_amount(2.999), Some("3".to_string()));
    }

    #[test]
    fn test_format_table_fractions() {
        assert_eq!(format_amount(0.5), Some("1/2".to_string()));
        assert_eq!(format_amount(1.5), Some("1 1/2".to_string()));
        assert_eq!(format_amount(0.75), Some("3/4".to_string()));
        assert_eq!(format_amount(2.25), Some("2 1/4".to_string()));
        assert_eq!(format_amount(1.0 / 3.0), Some("1/3".to_string()));
        assert_eq!(format_amount(2.0 / 3.0), Some("2/3".to_string()));
    }

    #[test]
    fn test_format_continued_fraction_fallback() {
        // 1/16 is not on the display table but fits the denominator bound.
        assert_eq!(format_amount(0.0625), Some("1/16".to_string()));
        assert_eq!(format_amount(0.2), Some("1/5".to_string()));
    }

    #[test]
    fn test_format_decimal_fallback() {
        // 0.47 is not close to any fraction with denominator <= 16.
        assert_eq!(format_amount(0.472), Some("0.47".to_string()));
    }

    #[test]
    fn test_format_rejects_invalid() {
        assert_eq!(format_amount(-1.0), None);
        assert_eq!(format_amount(f64::NAN), None);
        assert_eq!(format_amount(f64::INFINITY), None);
    }

    #[test]
    fn test_round_trip_bound_on_table_values() {
        for x in [0.125, 0.25, 1.0 / 3.0, 0.5, 0.625, 2.0 / 3.0, 0.875, 4.7, 12.33] {
            let formatted = format_amount(x).unwrap();
            let parsed = parse_amount(&formatted).unwrap();
            assert!(
                (parsed - x).abs() < 0.02,
                "round trip of {} via '{}' drifted to {}",
                x,
                formatted,
                parsed
            );
        }
    }
}
