//! # Unit Table Module
//!
//! Static bidirectional mapping between unit spellings and canonical units,
//! plus conversion factors between compatible units. Units are partitioned
//! into three incompatible families (volume, weight, count); conversion is
//! only ever permitted within a family.
//!
//! ## Features
//!
//! - Longest-match-first spelling lookup ("fluid ounces" wins over "ounces")
//! - Exact US customary conversion factors to avoid compounding rounding
//!   error across repeated merges
//! - Pluralization-aware display forms
//! - Compound container units ("14-oz can") preserved as single identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// The three incompatible measurement families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitFamily {
    /// Volume units (ml, tsp, cup, ...)
    Volume,
    /// Weight units (g, oz, lb, ...)
    Weight,
    /// Count units (each, clove, can, ...)
    Count,
}

/// Canonical cooking units after alias resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalUnit {
    // Volume units
    /// Milliliters
    Milliliter,
    /// Liters
    Liter,
    /// Teaspoons
    Teaspoon,
    /// Tablespoons
    Tablespoon,
    /// Fluid ounces
    FluidOunce,
    /// Cups
    Cup,
    /// Pints
    Pint,
    /// Quarts
    Quart,
    /// Gallons
    Gallon,

    // Weight units
    /// Grams
    Gram,
    /// Kilograms
    Kilogram,
    /// Ounces
    Ounce,
    /// Pounds
    Pound,

    // Count units
    /// Individual items
    Each,
    /// Cloves (garlic)
    Clove,
    /// Slices
    Slice,
    /// Cans
    Can,
    /// Jars
    Jar,
    /// Bottles
    Bottle,
    /// Sticks (butter)
    Stick,
    /// Packages
    Package,
    /// Bags
    Bag,
    /// Bunches
    Bunch,
    /// Heads (lettuce, garlic)
    Head,
    /// Pinches
    Pinch,
    /// Dashes
    Dash,
    /// Handfuls
    Handful,
}

/// Every accepted spelling, mapped to its canonical unit.
///
/// Lookup is longest-match-first, so multi-word spellings must simply be
/// present here; ordering in this table does not matter.
const UNIT_SPELLINGS: &[(&str, CanonicalUnit)] = &[
    // Volume
    ("milliliters", CanonicalUnit::Milliliter),
    ("milliliter", CanonicalUnit::Milliliter),
    ("millilitres", CanonicalUnit::Milliliter),
    ("millilitre", CanonicalUnit::Milliliter),
    ("ml", CanonicalUnit::Milliliter),
    ("liters", CanonicalUnit::Liter),
    ("liter", CanonicalUnit::Liter),
    ("litres", CanonicalUnit::Liter),
    ("litre", CanonicalUnit::Liter),
    ("l", CanonicalUnit::Liter),
    ("teaspoons", CanonicalUnit::Teaspoon),
    ("teaspoon", CanonicalUnit::Teaspoon),
    ("tsps", CanonicalUnit::Teaspoon),
    ("tsp", CanonicalUnit::Teaspoon),
    ("t", CanonicalUnit::Teaspoon),
    ("tablespoons", CanonicalUnit::Tablespoon),
    ("tablespoon", CanonicalUnit::Tablespoon),
    ("tbsps", CanonicalUnit::Tablespoon),
    ("tbsp", CanonicalUnit::Tablespoon),
    ("tbs", CanonicalUnit::Tablespoon),
    ("tbl", CanonicalUnit::Tablespoon),
    ("T", CanonicalUnit::Tablespoon),
    ("fluid ounces", CanonicalUnit::FluidOunce),
    ("fluid ounce", CanonicalUnit::FluidOunce),
    ("fluid oz", CanonicalUnit::FluidOunce),
    ("fl oz", CanonicalUnit::FluidOunce),
    ("fl-oz", CanonicalUnit::FluidOunce),
    ("fl. oz.", CanonicalUnit::FluidOunce),
    ("fl. oz", CanonicalUnit::FluidOunce),
    ("floz", CanonicalUnit::FluidOunce),
    ("cups", CanonicalUnit::Cup),
    ("cup", CanonicalUnit::Cup),
    ("c", CanonicalUnit::Cup),
    ("pints", CanonicalUnit::Pint),
    ("pint", CanonicalUnit::Pint),
    ("pts", CanonicalUnit::Pint),
    ("pt", CanonicalUnit::Pint),
    ("quarts", CanonicalUnit::Quart),
    ("quart", CanonicalUnit::Quart),
    ("qts", CanonicalUnit::Quart),
    ("qt", CanonicalUnit::Quart),
    ("gallons", CanonicalUnit::Gallon),
    ("gallon", CanonicalUnit::Gallon),
    ("gal", CanonicalUnit::Gallon),
    // Weight
    ("grams", CanonicalUnit::Gram),
    ("gram", CanonicalUnit::Gram),
    ("grammes", CanonicalUnit::Gram),
    ("gramme", CanonicalUnit::Gram),
    ("g", CanonicalUnit::Gram),
    ("kilograms", CanonicalUnit::Kilogram),
    ("kilogram", CanonicalUnit::Kilogram),
    ("kgs", CanonicalUnit::Kilogram),
    ("kg", CanonicalUnit::Kilogram),
    ("ounces", CanonicalUnit::Ounce),
    ("ounce", CanonicalUnit::Ounce),
    ("oz", CanonicalUnit::Ounce),
    ("pounds", CanonicalUnit::Pound),
    ("pound", CanonicalUnit::Pound),
    ("lbs", CanonicalUnit::Pound),
    ("lb", CanonicalUnit::Pound),
    // Count
    ("each", CanonicalUnit::Each),
    ("pieces", CanonicalUnit::Each),
    ("piece", CanonicalUnit::Each),
    ("items", CanonicalUnit::Each),
    ("item", CanonicalUnit::Each),
    ("cloves", CanonicalUnit::Clove),
    ("clove", CanonicalUnit::Clove),
    ("slices", CanonicalUnit::Slice),
    ("slice", CanonicalUnit::Slice),
    ("cans", CanonicalUnit::Can),
    ("can", CanonicalUnit::Can),
    ("jars", CanonicalUnit::Jar),
    ("jar", CanonicalUnit::Jar),
    ("bottles", CanonicalUnit::Bottle),
    ("bottle", CanonicalUnit::Bottle),
    ("sticks", CanonicalUnit::Stick),
    ("stick", CanonicalUnit::Stick),
    ("packages", CanonicalUnit::Package),
    ("package", CanonicalUnit::Package),
    ("packets", CanonicalUnit::Package),
    ("packet", CanonicalUnit::Package),
    ("pkgs", CanonicalUnit::Package),
    ("pkg", CanonicalUnit::Package),
    ("bags", CanonicalUnit::Bag),
    ("bag", CanonicalUnit::Bag),
    ("bunches", CanonicalUnit::Bunch),
    ("bunch", CanonicalUnit::Bunch),
    ("heads", CanonicalUnit::Head),
    ("head", CanonicalUnit::Head),
    ("pinches", CanonicalUnit::Pinch),
    ("pinch", CanonicalUnit::Pinch),
    ("dashes", CanonicalUnit::Dash),
    ("dash", CanonicalUnit::Dash),
    ("handfuls", CanonicalUnit::Handful),
    ("handful", CanonicalUnit::Handful),
];

/// Spellings sorted longest-first so prefix scans match "fluid ounces"
/// before "ounces".
static SPELLINGS_BY_LENGTH: LazyLock<Vec<(&'static str, CanonicalUnit)>> = LazyLock::new(|| {
    let mut spellings: Vec<_> = UNIT_SPELLINGS.to_vec();
    spellings.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));
    spellings
});

impl CanonicalUnit {
    /// Look up a unit by an exact spelling (case-insensitive, except the
    /// single-letter "T"/"t" distinction for tablespoon/teaspoon).
    pub fn from_spelling(spelling: &str) -> Option<Self> {
        let trimmed = spelling.trim().trim_end_matches('.');
        // "T" is tablespoon, "t" is teaspoon; every other spelling is
        // case-insensitive.
        if trimmed == "T" {
            return Some(CanonicalUnit::Tablespoon);
        }
        if trimmed == "t" {
            return Some(CanonicalUnit::Teaspoon);
        }
        let lower = trimmed.to_lowercase();
        UNIT_SPELLINGS
            .iter()
            .find(|(s, _)| !s.eq_ignore_ascii_case("T") && *s == lower.as_str())
            .map(|(_, u)| *u)
    }

    /// Match a unit spelling at the start of `text`, longest spelling
    /// first. Returns the unit and the byte length of the matched spelling.
    /// The match must end at a word boundary.
    pub fn match_prefix(text: &str) -> Option<(Self, usize)> {
        for (spelling, unit) in SPELLINGS_BY_LENGTH.iter() {
            let len = spelling.len();
            if text.len() < len || !text.is_char_boundary(len) {
                continue;
            }
            let head = &text[..len];
            let matches = if *spelling == "T" {
                head == "T"
            } else if *spelling == "t" {
                head == "t"
            } else {
                head.eq_ignore_ascii_case(spelling)
            };
            if !matches {
                continue;
            }
            // Word boundary: end of string or a non-alphanumeric follower
            // (allow a trailing period for abbreviations like "tbsp.").
            let rest = &text[len..];
            let boundary = match rest.chars().next() {
                None => true,
                Some(c) => !c.is_alphanumeric(),
            };
            if boundary {
                let consumed = if rest.starts_with('.') { len + 1 } else { len };
                return Some((*unit, consumed));
            }
        }
        None
    }

    /// The family this unit belongs to.
    pub fn family(&self) -> UnitFamily {
        use CanonicalUnit::*;
        match self {
            Milliliter | Liter | Teaspoon | Tablespoon | FluidOunce | Cup | Pint | Quart
            | Gallon => UnitFamily::Volume,
            Gram | Kilogram | Ounce | Pound => UnitFamily::Weight,
            Each | Clove | Slice | Can | Jar | Bottle | Stick | Package | Bag | Bunch | Head
            | Pinch | Dash | Handful => UnitFamily::Count,
        }
    }

    /// Conversion factor to the family base unit (ml for volume, g for
    /// weight). Count units have no shared base.
    fn base_factor(&self) -> Option<f64> {
        use CanonicalUnit::*;
        match self {
            Milliliter => Some(1.0),
            Liter => Some(1000.0),
            Teaspoon => Some(4.928_921_593_75),
            Tablespoon => Some(14.786_764_781_25),
            FluidOunce => Some(29.573_529_562_5),
            Cup => Some(236.588_236_5),
            Pint => Some(473.176_473),
            Quart => Some(946.352_946),
            Gallon => Some(3_785.411_784),
            Gram => Some(1.0),
            Kilogram => Some(1000.0),
            Ounce => Some(28.349_523_125),
            Pound => Some(453.592_37),
            _ => None,
        }
    }

    /// Stable canonical identifier, used as the serialized unit string.
    pub fn canonical_id(&self) -> &'static str {
        use CanonicalUnit::*;
        match self {
            Milliliter => "ml",
            Liter => "liter",
            Teaspoon => "tsp",
            Tablespoon => "tbsp",
            FluidOunce => "fl-oz",
            Cup => "cup",
            Pint => "pint",
            Quart => "quart",
            Gallon => "gallon",
            Gram => "g",
            Kilogram => "kg",
            Ounce => "oz",
            Pound => "lb",
            Each => "each",
            Clove => "clove",
            Slice => "slice",
            Can => "can",
            Jar => "jar",
            Bottle => "bottle",
            Stick => "stick",
            Package => "package",
            Bag => "bag",
            Bunch => "bunch",
            Head => "head",
            Pinch => "pinch",
            Dash => "dash",
            Handful => "handful",
        }
    }

    /// Display form aware of pluralization. Abbreviations are invariant.
    pub fn display_name(&self, plural: bool) -> &'static str {
        use CanonicalUnit::*;
        match (self, plural) {
            (Milliliter, _) => "ml",
            (Liter, false) => "liter",
            (Liter, true) => "liters",
            (Teaspoon, _) => "tsp",
            (Tablespoon, _) => "tbsp",
            (FluidOunce, _) => "fl oz",
            (Cup, false) => "cup",
            (Cup, true) => "cups",
            (Pint, false) => "pint",
            (Pint, true) => "pints",
            (Quart, false) => "quart",
            (Quart, true) => "quarts",
            (Gallon, false) => "gallon",
            (Gallon, true) => "gallons",
            (Gram, _) => "g",
            (Kilogram, _) => "kg",
            (Ounce, _) => "oz",
            (Pound, _) => "lb",
            (Each, _) => "each",
            (Clove, false) => "clove",
            (Clove, true) => "cloves",
            (Slice, false) => "slice",
            (Slice, true) => "slices",
            (Can, false) => "can",
            (Can, true) => "cans",
            (Jar, false) => "jar",
            (Jar, true) => "jars",
            (Bottle, false) => "bottle",
            (Bottle, true) => "bottles",
            (Stick, false) => "stick",
            (Stick, true) => "sticks",
            (Package, false) => "package",
            (Package, true) => "packages",
            (Bag, false) => "bag",
            (Bag, true) => "bags",
            (Bunch, false) => "bunch",
            (Bunch, true) => "bunches",
            (Head, false) => "head",
            (Head, true) => "heads",
            (Pinch, false) => "pinch",
            (Pinch, true) => "pinches",
            (Dash, false) => "dash",
            (Dash, true) => "dashes",
            (Handful, false) => "handful",
            (Handful, true) => "handfuls",
        }
    }
}

/// Convert an amount between two units of the same family.
///
/// Returns `None` when the units belong to different families, or when
/// they are distinct count units (a clove is not a slice). Count units
/// convert only to themselves.
pub fn convert(amount: f64, from: CanonicalUnit, to: CanonicalUnit) -> Option<f64> {
    if from == to {
        return Some(amount);
    }
    if from.family() != to.family() {
        return None;
    }
    let from_factor = from.base_factor()?;
    let to_factor = to.base_factor()?;
    Some(amount * from_factor / to_factor)
}

/// A unit attached to a parsed ingredient: either a plain canonical unit
/// or a compound container unit that bundles a size and container type
/// (e.g. "14-oz can"), preserved as a single token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// A unit from the fixed canonical set
    Canonical(CanonicalUnit),
    /// A container unit with an embedded size, e.g. "14-oz can"
    Compound {
        /// Normalized size prefix, e.g. "14-oz", "14.5-oz", "400-g"
        size: String,
        /// The container type (can, jar, bottle, ...)
        container: CanonicalUnit,
    },
}

impl Unit {
    /// The family used for aggregation bucketing. Compound units behave as
    /// count units (you buy N cans).
    pub fn family(&self) -> UnitFamily {
        match self {
            Unit::Canonical(u) => u.family(),
            Unit::Compound { .. } => UnitFamily::Count,
        }
    }

    /// Stable identifier for this unit ("cup", "14-oz can").
    pub fn canonical_id(&self) -> String {
        match self {
            Unit::Canonical(u) => u.canonical_id().to_string(),
            Unit::Compound { size, container } => {
                format!("{} {}", size, container.canonical_id())
            }
        }
    }

    /// Pluralization-aware display form for the given amount.
    pub fn display(&self, amount: Option<f64>) -> String {
        let plural = amount.map(|a| a > 1.0).unwrap_or(false);
        match self {
            Unit::Canonical(u) => u.display_name(plural).to_string(),
            Unit::Compound { size, container } => {
                format!("{} {}", size, container.display_name(plural))
            }
        }
    }

    /// Reconstruct a unit from its stable identifier ("cup", "14-oz can").
    /// Inverse of [`Unit::canonical_id`] for every identifier this crate
    /// produces.
    pub fn from_canonical_id(id: &str) -> Option<Unit> {
        if let Some(unit) = CanonicalUnit::from_spelling(id) {
            return Some(Unit::Canonical(unit));
        }
        let (size, container) = id.rsplit_once(' ')?;
        let container = CanonicalUnit::from_spelling(container)?;
        if size.is_empty() {
            return None;
        }
        Some(Unit::Compound {
            size: size.to_string(),
            container,
        })
    }

    /// The underlying canonical unit, if this is not a compound unit.
    pub fn as_canonical(&self) -> Option<CanonicalUnit> {
        match self {
            Unit::Canonical(u) => Some(*u),
            Unit::Compound { .. } => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_id())
    }
}
