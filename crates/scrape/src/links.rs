//! Research link synthesis.
//!
//! Maps a vehicle record to external valuation/history/review URLs using
//! per-site slug-formatting rules. Pure string building; no requests are
//! made here. Absent fields degrade gracefully: a missing price yields a
//! shopping link without range bounds, and an empty model falls back to
//! the make-level page instead of emitting a double slash.

use serde::Serialize;
use url::Url;

use crate::record::VehicleRecord;

/// An outbound research link.
#[derive(Debug, Clone, Serialize)]
pub struct ResearchLink {
    /// Display label, e.g. "Check KBB price".
    pub label: String,
    /// Fully formed URL.
    pub href: String,
}

/// Lowercase, hyphen-joined slug form of a name.
pub fn slug(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("-").to_lowercase()
}

/// Closed override table for ambiguous model slugs.
///
/// Some marketplace titles carry bare model codes that map to a different
/// product-line path segment on research sites (a bare BMW "3" is the
/// 3 Series page, not a "/3/" path).
fn model_slug(make_slug: &str, model: &str) -> String {
    let raw = slug(model);
    match (make_slug, raw.as_str()) {
        ("bmw", "3") => "3-series".into(),
        ("bmw", "5") => "5-series".into(),
        ("bmw", "7") => "7-series".into(),
        ("mercedes-benz", "c") => "c-class".into(),
        ("mercedes-benz", "e") => "e-class".into(),
        _ => raw,
    }
}

/// Build the research link set for a record.
///
/// The shopping link carries the fallback geographic code and, when a
/// price is listed, a ±20% price range.
pub fn build_research_links(record: &VehicleRecord, fallback_zip: &str) -> Vec<ResearchLink> {
    let make = slug(&record.make);
    let model = model_slug(&make, &record.model);

    let mut links = Vec::new();

    links.push(ResearchLink { label: "Check KBB price".into(), href: kbb_url(&make, &model, &record.year) });
    links.push(ResearchLink { label: "Edmunds appraisal".into(), href: edmunds_url(&make, &model, &record.year) });
    links.push(ResearchLink {
        label: "J.D. Power values".into(),
        href: jdpower_url(&make, &model, &record.year),
    });
    links.push(ResearchLink { label: "Vehicle history".into(), href: carfax_url(&make, &model) });

    if let Some(shopping) = shopping_url(&make, &model, record.price, fallback_zip) {
        links.push(ResearchLink { label: "Shop similar listings".into(), href: shopping });
    }

    links
}

fn kbb_url(make: &str, model: &str, year: &str) -> String {
    if model.is_empty() {
        format!("https://www.kbb.com/{make}/")
    } else {
        format!("https://www.kbb.com/{make}/{model}/{year}/")
    }
}

fn edmunds_url(make: &str, model: &str, year: &str) -> String {
    if model.is_empty() {
        format!("https://www.edmunds.com/{make}/")
    } else {
        format!("https://www.edmunds.com/{make}/{model}/{year}/")
    }
}

fn jdpower_url(make: &str, model: &str, year: &str) -> String {
    if model.is_empty() {
        format!("https://www.jdpower.com/cars/{year}/{make}")
    } else {
        format!("https://www.jdpower.com/cars/{year}/{make}/{model}")
    }
}

fn carfax_url(make: &str, model: &str) -> String {
    if model.is_empty() {
        format!("https://www.carfax.com/cars/{make}")
    } else {
        format!("https://www.carfax.com/cars/{make}/{model}")
    }
}

/// Comparison-shopping search with zip and optional ±20% price range.
fn shopping_url(make: &str, model: &str, price: Option<u64>, zip: &str) -> Option<String> {
    let base = if model.is_empty() {
        format!("https://www.autotrader.com/cars-for-sale/{make}")
    } else {
        format!("https://www.autotrader.com/cars-for-sale/{make}/{model}")
    };

    let mut url = Url::parse(&base).ok()?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("zip", zip);
        if let Some(listed) = price {
            let (min, max) = price_range(listed);
            query.append_pair("minPrice", &min.to_string());
            query.append_pair("maxPrice", &max.to_string());
        }
    }
    Some(url.to_string())
}

/// ±20% bounds around a listed price.
fn price_range(price: u64) -> (u64, u64) {
    (price * 80 / 100, price * 120 / 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(make: &str, model: &str, year: &str, price: Option<u64>) -> VehicleRecord {
        VehicleRecord {
            year: year.into(),
            make: make.into(),
            model: model.into(),
            trim: String::new(),
            mileage: None,
            price,
        }
    }

    #[test]
    fn test_slug_basic() {
        assert_eq!(slug("Mercedes Benz"), "mercedes-benz");
        assert_eq!(slug("  Land   Rover "), "land-rover");
        assert_eq!(slug("BMW"), "bmw");
    }

    #[test]
    fn test_bmw_bare_series_override() {
        let links = build_research_links(&record("BMW", "3", "2019", None), "10001");
        let kbb = links.iter().find(|l| l.label.contains("KBB")).unwrap();
        assert_eq!(kbb.href, "https://www.kbb.com/bmw/3-series/2019/");
        assert!(!kbb.href.contains("/3/"));
    }

    #[test]
    fn test_bmw_crossover_code_passes_through() {
        let links = build_research_links(&record("BMW", "X1", "2021", None), "10001");
        let kbb = links.iter().find(|l| l.label.contains("KBB")).unwrap();
        assert_eq!(kbb.href, "https://www.kbb.com/bmw/x1/2021/");
    }

    #[test]
    fn test_all_sites_use_record_make() {
        let links = build_research_links(&record("Honda", "Civic", "2018", None), "10001");
        for link in &links {
            assert!(link.href.contains("honda"), "{} missing make", link.href);
        }
    }

    #[test]
    fn test_shopping_link_price_range() {
        let links = build_research_links(&record("Honda", "Civic", "2018", Some(15_999)), "10001");
        let shopping = links.iter().find(|l| l.label.contains("Shop")).unwrap();
        assert!(shopping.href.contains("zip=10001"));
        assert!(shopping.href.contains("minPrice=12799"));
        assert!(shopping.href.contains("maxPrice=19198"));
    }

    #[test]
    fn test_shopping_link_without_price_omits_range() {
        let links = build_research_links(&record("Honda", "Civic", "2018", None), "94103");
        let shopping = links.iter().find(|l| l.label.contains("Shop")).unwrap();
        assert!(shopping.href.contains("zip=94103"));
        assert!(!shopping.href.contains("minPrice"));
        assert!(!shopping.href.contains("maxPrice"));
    }

    #[test]
    fn test_empty_model_falls_back_to_make_pages() {
        let links = build_research_links(&record("Toyota", "", "2020", None), "10001");
        let kbb = links.iter().find(|l| l.label.contains("KBB")).unwrap();
        assert_eq!(kbb.href, "https://www.kbb.com/toyota/");
        assert!(!links.iter().any(|l| l.href.contains("//2020")));
    }

    #[test]
    fn test_multiword_model_slug() {
        let links = build_research_links(&record("Tesla", "Model 3", "2022", None), "10001");
        let kbb = links.iter().find(|l| l.label.contains("KBB")).unwrap();
        assert_eq!(kbb.href, "https://www.kbb.com/tesla/model-3/2022/");
    }

    #[test]
    fn test_link_set_nonempty() {
        let links = build_research_links(&record("Honda", "Civic", "2018", Some(15_999)), "10001");
        assert_eq!(links.len(), 5);
    }
}
