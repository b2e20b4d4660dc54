//! Illustrative market-value arithmetic.
//!
//! Rough depreciation math for the panel's market-analysis section:
//! 20% depreciation the first year, 10% each subsequent year (capped at
//! five), a per-mile adjustment, and a flat brand factor. Not a valuation
//! model; the numbers exist to frame the research links.

use serde::Serialize;

use crate::record::VehicleRecord;

const FIRST_YEAR_DEPRECIATION: f64 = 0.20;
const SUBSEQUENT_YEAR_DEPRECIATION: f64 = 0.10;
const SUBSEQUENT_YEARS_CAP: i64 = 5;
const PER_MILE_DEPRECIATION: f64 = 0.00002;

const COMMON_BRANDS: &[&str] = &["toyota", "honda", "ford", "chevrolet", "nissan"];
const LUXURY_BRANDS: &[&str] = &["bmw", "mercedes", "audi", "lexus"];

/// Confidence in the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
        }
    }
}

/// The computed estimate plus the line items explaining it.
#[derive(Debug, Clone, Serialize)]
pub struct MarketEstimate {
    /// Rounded dollar estimate; absent when no price is listed.
    pub estimate: Option<u64>,
    pub confidence: Confidence,
    /// Human-readable analysis lines for the panel.
    pub analysis: Vec<String>,
}

/// Compute the illustrative market estimate for a record.
///
/// `current_year` is passed in so callers (and tests) control the clock.
pub fn estimate_market(record: &VehicleRecord, current_year: i32) -> MarketEstimate {
    let age = vehicle_age(record, current_year);

    let Some(listed_price) = record.price else {
        return MarketEstimate {
            estimate: None,
            confidence: Confidence::Low,
            analysis: vec!["Unable to calculate estimate - no listing price found".into()],
        };
    };

    let mut estimated = listed_price as f64;
    let mut analysis = Vec::new();

    if age > 0 {
        let total_depreciation =
            FIRST_YEAR_DEPRECIATION + ((age - 1).min(SUBSEQUENT_YEARS_CAP) as f64) * SUBSEQUENT_YEAR_DEPRECIATION;
        estimated = listed_price as f64 / (1.0 - total_depreciation);
        analysis.push(format!(
            "{} years old: expected {}% depreciation",
            age,
            (total_depreciation * 100.0).round() as i64
        ));
    }

    if let Some(mileage) = record.mileage {
        if mileage > 0 {
            let impact = (1.0 - mileage as f64 * PER_MILE_DEPRECIATION).max(0.0);
            estimated *= impact;
            analysis.push(format!(
                "{} miles: adjusted value by {}%",
                format_thousands(mileage),
                ((1.0 - impact) * 100.0).round() as i64
            ));
        }
    }

    if let Some((factor, message)) = brand_factor(&record.make) {
        estimated *= factor;
        analysis.push(message.into());
    }

    MarketEstimate { estimate: Some(estimated.round().max(0.0) as u64), confidence: Confidence::Medium, analysis }
}

/// Age in years relative to the given calendar year; never negative.
pub fn vehicle_age(record: &VehicleRecord, current_year: i32) -> i64 {
    let model_year: i32 = record.year.parse().unwrap_or(current_year);
    i64::from(current_year - model_year).max(0)
}

fn brand_factor(make: &str) -> Option<(f64, &'static str)> {
    let make = make.to_lowercase();
    let first = make.split_whitespace().next().unwrap_or(make.as_str());

    if COMMON_BRANDS.contains(&first) {
        Some((1.05, "Popular brand with strong resale value"))
    } else if LUXURY_BRANDS.contains(&first) {
        Some((0.95, "Luxury vehicle - typically higher depreciation"))
    } else {
        None
    }
}

/// Comma-grouped rendering of a whole number, for analysis and panel text.
pub fn format_thousands(n: u64) -> String {
    let raw = n.to_string();
    let mut grouped = String::new();
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
