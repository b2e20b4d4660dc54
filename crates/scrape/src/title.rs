//! Title string parsing: year/make isolation and model/trim splitting.
//!
//! A single outer regex isolates the 4-digit year, the make token, and the
//! free-text remainder. The remainder is then split into model vs. trim by
//! a closed per-make rule registry: vehicle naming conventions are
//! make-specific and not expressible by one universal pattern, so each
//! known make picks the rule shaped like its catalog, and everything else
//! takes the default first-token rule. Wrong splits for unlisted makes are
//! expected degraded behavior, not errors.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::VehicleRecord;

/// Year, make, and the unsplit remainder of a title string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleFields {
    pub year: String,
    pub make: String,
    pub model: String,
    pub trim: String,
}

/// Outer shape: 4-digit year, a make token of word characters and
/// hyphens, then anything.
static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})\s+([A-Za-z][\w-]*)\s*(.*)$").expect("invalid title pattern"));

/// Model/trim splitting rule for a make's naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModelRule {
    /// Short numeric/alphanumeric model codes, optionally "N Series"
    /// (BMW-style: `330i`, `X1`, `3 Series`).
    SeriesNumber,
    /// Models spanning two tokens (`Model 3`, `C 300`).
    WordPair,
    /// Default: first token is the model, the rest is trim.
    FirstWord,
}

static SERIES_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d\s+series|[a-z]?\d+[a-z]*)\b\s*(.*)$").expect("invalid series pattern"));
static WORD_PAIR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\S+\s+\S+)\s*(.*)$").expect("invalid pair pattern"));
static FIRST_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\S+)\s*(.*)$").expect("invalid word pattern"));

/// Closed registry mapping a normalized make to its splitting rule.
fn rule_for(make: &str) -> ModelRule {
    match make.to_lowercase().as_str() {
        "bmw" | "mini" => ModelRule::SeriesNumber,
        "tesla" | "mercedes benz" => ModelRule::WordPair,
        _ => ModelRule::FirstWord,
    }
}

impl ModelRule {
    fn pattern(&self) -> &'static Regex {
        match self {
            ModelRule::SeriesNumber => &SERIES_NUMBER_RE,
            ModelRule::WordPair => &WORD_PAIR_RE,
            ModelRule::FirstWord => &FIRST_WORD_RE,
        }
    }
}

/// Parse a listing title into structured fields.
///
/// Returns `None` when no year+make can be isolated: absence of a
/// parseable year means no listing, and the pipeline short-circuits.
/// The make has hyphens replaced by spaces (`Mercedes-Benz` becomes
/// `Mercedes Benz`). If the make's rule fails to match the remainder,
/// the whole remainder becomes the model and trim is left empty.
pub fn parse_title(title: &str) -> Option<TitleFields> {
    let captures = TITLE_RE.captures(title.trim())?;

    let year = captures[1].to_string();
    let make = captures[2].replace('-', " ");
    let remainder = captures[3].trim();

    let (model, trim) = match rule_for(&make).pattern().captures(remainder) {
        Some(split) => (split[1].trim().to_string(), split[2].trim().to_string()),
        None => (remainder.to_string(), String::new()),
    };

    Some(TitleFields { year, make, model, trim })
}

/// Assemble a full record from a parsed title plus secondary fields.
pub fn to_record(fields: TitleFields, mileage: Option<u64>, price: Option<u64>) -> VehicleRecord {
    VehicleRecord { year: fields.year, make: fields.make, model: fields.model, trim: fields.trim, mileage, price }
}
