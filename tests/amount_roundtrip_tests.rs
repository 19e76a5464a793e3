//! Randomized round-trip bound for the amount parser and formatter.

use rand::Rng;
use shoplist::{format_amount, parse_amount};

/// 1000 random rationals in [0, 50) with denominator at most 16 must
/// survive format-then-parse within 0.02.
#[test]
fn test_round_trip_bound_on_random_rationals() {
    let mut rng = rand::thread_rng();
    for _ in 0..1000 {
        let whole = rng.gen_range(0u32..50);
        let den = rng.gen_range(1u32..=16);
        let num = rng.gen_range(0u32..den.max(1));
        let x = f64::from(whole) + f64::from(num) / f64::from(den);
        if x >= 50.0 {
            continue;
        }

        let formatted = format_amount(x)
            .unwrap_or_else(|| panic!("no format for {}", x));
        let parsed = parse_amount(&formatted)
            .unwrap_or_else(|| panic!("'{}' (from {}) did not parse back", formatted, x));
        assert!(
            (parsed - x).abs() < 0.02,
            "{} formatted as '{}' parsed back as {}",
            x,
            formatted,
            parsed
        );
    }
}

/// The same bound holds for arbitrary decimals, where the 2-decimal
/// fallback carries the contract.
#[test]
fn test_round_trip_bound_on_random_decimals() {
    let mut rng = rand::thread_rng();
    for _ in 0..1000 {
        let x: f64 = rng.gen_range(0.0..50.0);
        let formatted = format_amount(x)
            .unwrap_or_else(|| panic!("no format for {}", x));
        let parsed = parse_amount(&formatted)
            .unwrap_or_else(|| panic!("'{}' (from {}) did not parse back", formatted, x));
        assert!(
            (parsed - x).abs() < 0.02,
            "{} formatted as '{}' parsed back as {}",
            x,
            formatted,
            parsed
        );
    }
}
