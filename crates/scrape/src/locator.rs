//! Ranked-selector search over listing page markup.
//!
//! The title search tries an ordered list of named selector strategies,
//! most structured first, and accepts the first candidate whose text
//! passes the plausible-title shape test. Order encodes precedence:
//! test-id and heading selectors are trusted over generic span/div scans.
//! Mileage and price reuse the same philosophy but scan broadly, running
//! the `fields` cascades over every candidate fragment.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::fields;
use crate::record::VehicleRecord;
use crate::title;

/// Upper bound on plausible title length; rejects paragraph-length text.
const MAX_TITLE_LEN: usize = 100;

/// A named selector strategy; order in the strategy list is precedence.
struct SelectorStrategy {
    name: &'static str,
    selector: &'static str,
}

/// Title strategies, most structured first, page-wide scan last.
const TITLE_STRATEGIES: &[SelectorStrategy] = &[
    SelectorStrategy { name: "testid-title", selector: r#"[data-testid="listing-title"], [data-testid="marketplace-pdp-title"]"# },
    SelectorStrategy { name: "primary-heading", selector: "h1" },
    SelectorStrategy { name: "secondary-heading", selector: "h2" },
    SelectorStrategy { name: "broad-scan", selector: "h1, h2, h3, span, div" },
];

/// Price strategies: labeled price elements first, then a broad scan.
const PRICE_STRATEGIES: &[SelectorStrategy] = &[
    SelectorStrategy { name: "labeled-price", selector: r#"[aria-label="Price"], [data-testid="listing-price"]"# },
    SelectorStrategy { name: "broad-scan", selector: "h1, h2, h3, span, div" },
];

/// Broad scan used for mileage fragments.
const TEXT_SCAN_SELECTOR: &str = "h1, h2, h3, span, div";

/// Shape test: a 4-digit year token followed by a word token.
static TITLE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{4}\s+[A-Za-z]").expect("invalid title shape pattern"));

/// A parsed listing page snapshot.
pub struct ListingPage {
    document: Html,
}

impl ListingPage {
    /// Parse a page snapshot's HTML.
    pub fn parse(html: &str) -> Self {
        Self { document: Html::parse_document(html) }
    }

    /// Find the best-guess listing title text.
    ///
    /// First accepted match wins across the ordered strategies; returns
    /// `None` when nothing on the page looks like a vehicle title.
    pub fn find_title(&self) -> Option<String> {
        for strategy in TITLE_STRATEGIES {
            let selector = match Selector::parse(strategy.selector) {
                Ok(s) => s,
                Err(_) => continue,
            };
            for element in self.document.select(&selector) {
                let text = element_text(&element);
                if plausible_title(&text) {
                    tracing::debug!("title matched via {} strategy: {}", strategy.name, text);
                    return Some(text);
                }
            }
        }
        None
    }

    /// Find the best-guess mileage value anywhere on the page.
    pub fn find_mileage(&self) -> Option<u64> {
        let candidates = self.scan_texts(TEXT_SCAN_SELECTOR);
        fields::mileage_from(candidates.iter().map(String::as_str))
    }

    /// Find the best-guess price value.
    ///
    /// Labeled price elements take precedence over the broad scan; the
    /// document `<title>` is consulted as a last resort.
    pub fn find_price(&self) -> Option<u64> {
        for strategy in PRICE_STRATEGIES {
            let selector = match Selector::parse(strategy.selector) {
                Ok(s) => s,
                Err(_) => continue,
            };
            for element in self.document.select(&selector) {
                if let Some(price) = fields::price_in(&element_text(&element)) {
                    tracing::debug!("price matched via {} strategy: {}", strategy.name, price);
                    return Some(price);
                }
            }
        }

        self.scan_texts("title").iter().find_map(|text| fields::price_in(text))
    }

    /// Run the full extraction: title location, title parsing, and the
    /// mileage/price cascades.
    ///
    /// Returns `None` when no plausible title is found or the title fails
    /// the year+make shape; a record is never produced without a year.
    pub fn record(&self) -> Option<VehicleRecord> {
        let title_text = self.find_title()?;
        let fields = title::parse_title(&title_text)?;
        Some(title::to_record(fields, self.find_mileage(), self.find_price()))
    }

    fn scan_texts(&self, selector_str: &str) -> Vec<String> {
        let selector = match Selector::parse(selector_str) {
            Ok(s) => s,
            Err(_) => return Vec::new(),
        };
        self.document
            .select(&selector)
            .map(|element| element_text(&element))
            .filter(|text| !text.is_empty())
            .collect()
    }
}

fn element_text(element: &scraper::ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ").trim().to_string()
}

/// A candidate is plausible when it contains a year token followed by a
/// word and stays under the length bound.
fn plausible_title(text: &str) -> bool {
    !text.is_empty() && text.len() < MAX_TITLE_LEN && TITLE_SHAPE_RE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_HTML: &str = r#"
        <!DOCTYPE html>
        <html>
        <head><title>2018 Honda Civic EX-L - $15,999 | Marketplace</title></head>
        <body>
            <div role="main">
                <h1><span>2018 Honda Civic EX-L</span></h1>
                <div aria-label="Price"><span>$15,999</span></div>
                <div>
                    <span>Driven 30,000 miles</span>
                    <span>Automatic transmission</span>
                </div>
            </div>
        </body>
        </html>
    "#;

    #[test]
    fn test_find_title_from_heading() {
        let page = ListingPage::parse(LISTING_HTML);
        assert_eq!(page.find_title().as_deref(), Some("2018 Honda Civic EX-L"));
    }

    #[test]
    fn test_testid_selector_takes_precedence() {
        let html = r#"
            <html><body>
                <h1>2012 Decoy Wagon parked here</h1>
                <div data-testid="listing-title">2018 Honda Civic EX-L</div>
            </body></html>
        "#;
        let page = ListingPage::parse(html);
        assert_eq!(page.find_title().as_deref(), Some("2018 Honda Civic EX-L"));
    }

    #[test]
    fn test_find_title_rejects_long_text() {
        let filler = "word ".repeat(40);
        let html = format!("<html><body><h1>2018 Honda {filler}</h1></body></html>");
        let page = ListingPage::parse(&html);
        assert!(page.find_title().is_none());
    }

    #[test]
    fn test_find_title_broad_scan_fallback() {
        let html = r#"
            <html><body>
                <div><p>nothing useful</p></div>
                <span>2015 Toyota Corolla LE</span>
            </body></html>
        "#;
        let page = ListingPage::parse(html);
        assert_eq!(page.find_title().as_deref(), Some("2015 Toyota Corolla LE"));
    }

    #[test]
    fn test_find_title_absent() {
        let page = ListingPage::parse("<html><body><p>Couch for sale, lightly used</p></body></html>");
        assert!(page.find_title().is_none());
    }

    #[test]
    fn test_find_mileage() {
        let page = ListingPage::parse(LISTING_HTML);
        assert_eq!(page.find_mileage(), Some(30_000));
    }

    #[test]
    fn test_find_price_labeled_element() {
        let page = ListingPage::parse(LISTING_HTML);
        assert_eq!(page.find_price(), Some(15_999));
    }

    #[test]
    fn test_find_price_document_title_fallback() {
        let html = r#"
            <html>
            <head><title>2018 Honda Civic - $12,400</title></head>
            <body><h1>2018 Honda Civic</h1></body>
            </html>
        "#;
        let page = ListingPage::parse(html);
        assert_eq!(page.find_price(), Some(12_400));
    }

    #[test]
    fn test_record_full_extraction() {
        let page = ListingPage::parse(LISTING_HTML);
        let record = page.record().unwrap();
        assert_eq!(record.year, "2018");
        assert_eq!(record.make, "Honda");
        assert_eq!(record.model, "Civic");
        assert_eq!(record.trim, "EX-L");
        assert_eq!(record.mileage, Some(30_000));
        assert_eq!(record.price, Some(15_999));
    }

    #[test]
    fn test_record_absent_without_year() {
        let page = ListingPage::parse("<html><body><h1>Honda Civic EX-L</h1></body></html>");
        assert!(page.record().is_none());
    }

    #[test]
    fn test_record_partial_fields() {
        let html = "<html><body><h1>2020 Subaru Outback</h1></body></html>";
        let page = ListingPage::parse(html);
        let record = page.record().unwrap();
        assert_eq!(record.year, "2020");
        assert_eq!(record.mileage, None);
        assert_eq!(record.price, None);
    }
}
