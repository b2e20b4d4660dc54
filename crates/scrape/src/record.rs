//! The structured vehicle record produced by extraction.

use serde::{Deserialize, Serialize};

/// A parsed vehicle listing.
///
/// Immutable once produced. `year` is always a 4-digit string; the
/// pipeline never builds a record without one. Every other field is
/// best-effort: an empty `model`/`trim` or absent `mileage`/`price` is a
/// degraded-but-valid record, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// 4-digit model year.
    pub year: String,
    /// Brand name, whitespace-normalized, hyphens converted to spaces.
    pub make: String,
    /// Model designator; empty when parsing cannot separate it from trim.
    pub model: String,
    /// Remainder after the model; may be empty.
    pub trim: String,
    /// Odometer reading in miles. Absent is unknown, not zero.
    pub mileage: Option<u64>,
    /// Listed price in whole dollars.
    pub price: Option<u64>,
}

impl VehicleRecord {
    /// One-line human summary, e.g. `2018 Honda Civic EX-L`.
    pub fn summary(&self) -> String {
        let mut parts = vec![self.year.as_str(), self.make.as_str()];
        if !self.model.is_empty() {
            parts.push(self.model.as_str());
        }
        if !self.trim.is_empty() {
            parts.push(self.trim.as_str());
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_full() {
        let record = VehicleRecord {
            year: "2018".into(),
            make: "Honda".into(),
            model: "Civic".into(),
            trim: "EX-L".into(),
            mileage: Some(30_000),
            price: Some(15_999),
        };
        assert_eq!(record.summary(), "2018 Honda Civic EX-L");
    }

    #[test]
    fn test_summary_skips_empty_fields() {
        let record = VehicleRecord {
            year: "2020".into(),
            make: "Toyota".into(),
            model: String::new(),
            trim: String::new(),
            mileage: None,
            price: None,
        };
        assert_eq!(record.summary(), "2020 Toyota");
    }
}
