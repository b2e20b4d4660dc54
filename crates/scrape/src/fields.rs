//! Regex cascades for mileage and price values.
//!
//! Each cascade is an ordered list of patterns, most specific first, run
//! across candidate text fragments; the first match anywhere wins.
//! Numeric normalization: thousands separators are stripped, a trailing
//! `k` on mileage multiplies by 1000, fractional values truncate.

use once_cell::sync::Lazy;
use regex::Regex;

/// Mileage patterns, most specific first.
static MILEAGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // "Driven 45,231 miles"
        Regex::new(r"(?i)\bdriven\s+(\d[\d,.]*[kK]?)\s*(?:miles\b|mi\b)").expect("invalid mileage pattern"),
        // "45,231 miles", "62k mi.", "120000 mileage"
        Regex::new(r"(?i)\b(\d[\d,.]*[kK]?)\s*(?:miles\b|mi\.?\b|mileage\b)").expect("invalid mileage pattern"),
    ]
});

/// Price pattern: a dollar sign followed by a separated integer.
static PRICE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\s*(\d[\d,]*)").expect("invalid price pattern"));

/// Extract a mileage value from a single text fragment.
pub fn mileage_in(text: &str) -> Option<u64> {
    for pattern in MILEAGE_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            if let Some(value) = parse_quantity(&captures[1]) {
                return Some(value);
            }
        }
    }
    None
}

/// Extract a mileage value from an ordered list of candidate fragments.
pub fn mileage_from<'a, I>(candidates: I) -> Option<u64>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates.into_iter().find_map(mileage_in)
}

/// Extract a price in whole dollars from a single text fragment.
///
/// Text without a `$` never yields a price.
pub fn price_in(text: &str) -> Option<u64> {
    let captures = PRICE_PATTERN.captures(text)?;
    captures[1].replace(',', "").parse().ok()
}

/// Extract a price from an ordered list of candidate fragments.
pub fn price_from<'a, I>(candidates: I) -> Option<u64>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates.into_iter().find_map(price_in)
}

/// Normalize a captured quantity: strip commas, apply `k` multiplier,
/// truncate fractions.
fn parse_quantity(raw: &str) -> Option<u64> {
    let cleaned = raw.replace(',', "");
    let (digits, multiplier) = match cleaned.strip_suffix(['k', 'K']) {
        Some(prefix) => (prefix, 1000.0),
        None => (cleaned.as_str(), 1.0),
    };
    let value: f64 = digits.parse().ok()?;
    if value < 0.0 {
        return None;
    }
    Some((value * multiplier) as u64)
}
