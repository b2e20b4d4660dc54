//! Unified error types for lotlens.
//!
//! Every failure in the pipeline maps to one of these variants; the
//! category decides which remediation hint the notification layer shows.

/// Unified error type for the lotlens pipeline.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty HTML).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// No plausible vehicle listing found on the page.
    #[error("NO_LISTING: {0}")]
    NoListing(String),

    /// Minimum interval between runs has not elapsed.
    #[error("RATE_LIMITED: {0}")]
    RateLimited(String),

    /// Navigation URL could not be canonicalized.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Preferences store failed to load or save.
    #[error("PREFS_ERROR: {0}")]
    Prefs(String),

    /// Anything else thrown during the pipeline.
    #[error("UNKNOWN: {0}")]
    Unknown(String),
}

/// Coarse failure categories surfaced to the user.
///
/// Partial records (year+make but no price) are not failures and never
/// reach this type; they render with placeholders instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Extraction,
    RateLimit,
    Other,
}

impl Error {
    /// Category used to pick the remediation hint for notifications.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::NoListing(_) | Error::InvalidInput(_) => ErrorCategory::Extraction,
            Error::RateLimited(_) => ErrorCategory::RateLimit,
            Error::InvalidUrl(_) | Error::Prefs(_) | Error::Unknown(_) => ErrorCategory::Other,
        }
    }
}

impl ErrorCategory {
    /// Canned remediation suggestion shown alongside the error toast.
    pub fn remediation_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Extraction => {
                "Could not read the listing details. Scroll the page so the title is visible and try again."
            }
            ErrorCategory::RateLimit => "Checked very recently. Wait a moment before refreshing.",
            ErrorCategory::Other => "Something went wrong. Reload the page and try again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoListing("no title element".to_string());
        assert!(err.to_string().contains("NO_LISTING"));
        assert!(err.to_string().contains("no title element"));
    }

    #[test]
    fn test_category_mapping() {
        assert_eq!(Error::NoListing(String::new()).category(), ErrorCategory::Extraction);
        assert_eq!(Error::RateLimited(String::new()).category(), ErrorCategory::RateLimit);
        assert_eq!(Error::Unknown(String::new()).category(), ErrorCategory::Other);
    }

    #[test]
    fn test_remediation_hints_nonempty() {
        for category in [ErrorCategory::Extraction, ErrorCategory::RateLimit, ErrorCategory::Other] {
            assert!(!category.remediation_hint().is_empty());
        }
    }
}
