//! Listing extraction heuristics for lotlens.
//!
//! This crate turns a marketplace page snapshot into a structured
//! [`VehicleRecord`] and synthesizes research artifacts from it:
//!
//! - `locator`: ranked-selector search over the page markup for the title
//!   element and the mileage/price text fragments
//! - `title`: free-text title parsing with a per-make model/trim registry
//! - `fields`: ordered regex cascades for mileage and price values
//! - `links`: external research URL synthesis with slug overrides
//! - `valuation`: illustrative depreciation arithmetic
//!
//! Everything here is pure with respect to the outside world: input is an
//! HTML string, output is values and strings. No network, no live DOM.

pub mod fields;
pub mod links;
pub mod locator;
pub mod record;
pub mod title;
pub mod valuation;

pub use links::{ResearchLink, build_research_links};
pub use locator::ListingPage;
pub use record::VehicleRecord;
pub use title::{TitleFields, parse_title};
pub use valuation::{Confidence, MarketEstimate, estimate_market};
