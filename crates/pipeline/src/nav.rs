//! Navigation handling: URL canonicalization, listing detection, and
//! debounced change watching.
//!
//! The canonical URL is the cache key, so canonicalization must be stable
//! across cosmetic variations of the same page address.

use std::time::Duration;

use tokio::time::Instant;
use url::Url;

use lotlens_core::Error;

/// Canonicalize a navigation URL for consistent cache keys.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Lowercase the host
/// 4. Remove fragment (#...)
/// 5. Keep query string intact (do not reorder)
pub fn canonicalize(input: &str) -> Result<Url, Error> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(Error::InvalidUrl("empty URL".into()));
    }

    let url_str = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };

    let mut parsed = Url::parse(&url_str).map_err(|e| Error::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(Error::InvalidUrl(format!("unsupported scheme: {scheme}"))),
    }

    if let Some(host) = parsed.host_str() {
        let lowered = host.to_lowercase();
        parsed
            .set_host(Some(&lowered))
            .map_err(|e| Error::InvalidUrl(e.to_string()))?;
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

/// Whether a URL points at a marketplace listing view.
pub fn is_listing_url(url: &Url) -> bool {
    url.path().contains("/marketplace/item/")
}

/// Debounced URL-change watcher.
///
/// Reports a navigation only when the canonical URL differs from the
/// last-reported value and the debounce window has elapsed since the
/// previous report. A change arriving inside the window is deferred, not
/// dropped: the URL stays pending and is reported on a later observation
/// once the window elapses, so a rapid-fire burst collapses to the last
/// URL still on screen.
#[derive(Debug)]
pub struct NavigationWatcher {
    debounce: Duration,
    last_url: Option<String>,
    last_report: Option<Instant>,
}

impl NavigationWatcher {
    pub fn new(debounce: Duration) -> Self {
        Self { debounce, last_url: None, last_report: None }
    }

    /// Observe a raw location value, returning the canonical URL when it
    /// constitutes a fresh navigation.
    pub fn observe(&mut self, raw_url: &str) -> Result<Option<Url>, Error> {
        let url = canonicalize(raw_url)?;
        let key = url.to_string();

        if self.last_url.as_deref() == Some(key.as_str()) {
            return Ok(None);
        }

        // Defer inside the window: the URL is not committed, so a later
        // observation of the same location reports it.
        if let Some(last) = self.last_report {
            if last.elapsed() < self.debounce {
                tracing::debug!("navigation within debounce window, deferring: {}", url);
                return Ok(None);
            }
        }

        self.last_url = Some(key);
        self.last_report = Some(Instant::now());

        Ok(Some(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_basic() {
        let url = canonicalize("https://example.com/marketplace/item/123").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.path(), "/marketplace/item/123");
    }

    #[test]
    fn test_canonicalize_default_scheme() {
        let url = canonicalize("example.com/marketplace/item/123").unwrap();
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn test_canonicalize_lowercases_host_and_strips_fragment() {
        let url = canonicalize("https://EXAMPLE.com/marketplace/item/1#photos").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_canonicalize_preserves_query() {
        let url = canonicalize("https://example.com/marketplace/item/1?ref=feed&x=2").unwrap();
        assert_eq!(url.query(), Some("ref=feed&x=2"));
    }

    #[test]
    fn test_canonicalize_rejects_other_schemes() {
        assert!(matches!(canonicalize("file:///etc/passwd"), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_canonicalize_empty() {
        assert!(matches!(canonicalize("   "), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_is_listing_url() {
        let listing = canonicalize("https://example.com/marketplace/item/98765").unwrap();
        let feed = canonicalize("https://example.com/marketplace/").unwrap();
        assert!(is_listing_url(&listing));
        assert!(!is_listing_url(&feed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_reports_first_navigation() {
        let mut watcher = NavigationWatcher::new(Duration::from_millis(300));
        let reported = watcher.observe("https://example.com/marketplace/item/1").unwrap();
        assert!(reported.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_ignores_same_url() {
        let mut watcher = NavigationWatcher::new(Duration::from_millis(300));
        watcher.observe("https://example.com/marketplace/item/1").unwrap();

        tokio::time::advance(Duration::from_secs(5)).await;

        let reported = watcher.observe("https://example.com/marketplace/item/1").unwrap();
        assert!(reported.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_coalesces_rapid_changes() {
        let mut watcher = NavigationWatcher::new(Duration::from_millis(300));
        assert!(watcher.observe("https://example.com/marketplace/item/1").unwrap().is_some());

        tokio::time::advance(Duration::from_millis(100)).await;
        assert!(watcher.observe("https://example.com/marketplace/item/2").unwrap().is_none());

        tokio::time::advance(Duration::from_millis(400)).await;
        assert!(watcher.observe("https://example.com/marketplace/item/3").unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_reports_deferred_url_once_window_elapses() {
        let mut watcher = NavigationWatcher::new(Duration::from_millis(300));
        assert!(watcher.observe("https://example.com/marketplace/").unwrap().is_some());

        // Feed-to-listing click lands inside the window: deferred.
        tokio::time::advance(Duration::from_millis(100)).await;
        assert!(watcher.observe("https://example.com/marketplace/item/2").unwrap().is_none());

        // The listing is still on screen after the window; it must be
        // reported, not swallowed.
        tokio::time::advance(Duration::from_secs(60)).await;
        let reported = watcher.observe("https://example.com/marketplace/item/2").unwrap();
        assert_eq!(
            reported.map(|u| u.to_string()).as_deref(),
            Some("https://example.com/marketplace/item/2")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_treats_fragment_variants_as_same_page() {
        let mut watcher = NavigationWatcher::new(Duration::from_millis(300));
        watcher.observe("https://example.com/marketplace/item/1").unwrap();

        tokio::time::advance(Duration::from_secs(5)).await;

        let reported = watcher.observe("https://example.com/marketplace/item/1#photos").unwrap();
        assert!(reported.is_none());
    }
}
