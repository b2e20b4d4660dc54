//! Panel and notification rendering.
//!
//! Builds the floating-panel HTML fragment and the transient error toast
//! as plain strings; the host owns mounting, styling, and the drag/close
//! behavior. All page-derived text is escaped before interpolation.

use std::time::Duration;

use chrono::Datelike;

use lotlens_core::ErrorCategory;
use lotlens_scrape::valuation::{format_thousands, vehicle_age};
use lotlens_scrape::{MarketEstimate, ResearchLink, VehicleRecord};

/// How long the error toast stays mounted before auto-dismissal.
pub const NOTIFICATION_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// A transient notification for the host to mount and auto-remove.
#[derive(Debug, Clone)]
pub struct Notification {
    pub html: String,
    pub dismiss_after: Duration,
}

/// Render the research panel for an extracted record.
pub fn render_panel(record: &VehicleRecord, estimate: &MarketEstimate, links: &[ResearchLink]) -> String {
    let age = vehicle_age(record, chrono::Utc::now().year());

    let mileage_line = match record.mileage {
        Some(miles) => format!("Mileage: {} miles", format_thousands(miles)),
        None => "Mileage: not available".into(),
    };
    let price_line = match record.price {
        Some(price) => format!("Listed Price: ${}", format_thousands(price)),
        None => "Price: not available".into(),
    };

    let mut analysis_items = vec![format!("<li>Vehicle Age: {} years</li>", age)];
    for line in &estimate.analysis {
        analysis_items.push(format!("<li>{}</li>", escape_html(line)));
    }
    if let Some(value) = estimate.estimate {
        analysis_items.push(format!(
            "<li>Estimated market value: ${} ({} confidence)</li>",
            format_thousands(value),
            estimate.confidence
        ));
    }

    let link_items: Vec<String> = links
        .iter()
        .map(|link| {
            format!(
                r#"<li><a href="{}" target="_blank" rel="noopener noreferrer">{}</a></li>"#,
                escape_html(&link.href),
                escape_html(&link.label)
            )
        })
        .collect();

    format!(
        r#"<div class="lotlens-panel">
  <div class="lotlens-vehicle">
    <strong>Vehicle Details</strong>
    <p>{summary}</p>
    <p>{mileage}</p>
    <p>{price}</p>
  </div>
  <div class="lotlens-analysis">
    <strong>Market Analysis</strong>
    <ul>
{analysis}
    </ul>
  </div>
  <div class="lotlens-resources">
    <strong>Research Tools</strong>
    <ul>
{links}
    </ul>
  </div>
  <div class="lotlens-disclaimer">Note: values are estimates. Always verify pricing with multiple sources.</div>
</div>"#,
        summary = escape_html(&record.summary()),
        mileage = escape_html(&mileage_line),
        price = escape_html(&price_line),
        analysis = indent(&analysis_items),
        links = indent(&link_items),
    )
}

/// Render the transient error toast for a failure category.
pub fn render_notification(category: ErrorCategory) -> Notification {
    let html = format!(
        r#"<div class="lotlens-toast" role="alert">{}</div>"#,
        escape_html(category.remediation_hint())
    );
    Notification { html, dismiss_after: NOTIFICATION_DISMISS_AFTER }
}

fn indent(items: &[String]) -> String {
    items.iter().map(|item| format!("      {item}")).collect::<Vec<_>>().join("\n")
}

/// Escape special HTML characters in a string.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
