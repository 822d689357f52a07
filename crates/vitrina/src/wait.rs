//! URL patterns and wait bounds.
//!
//! Navigation-changing actions suspend until the page URL matches a
//! [`UrlPattern`] or the driver's default timeout elapses. A timeout is the
//! only cancellation primitive: the awaited call fails, partial effects stay
//! (a submitted form stays submitted).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default timeout for navigation waits (30 seconds)
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 30_000;

/// Default timeout for element waits (5 seconds)
pub const DEFAULT_ELEMENT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval for waits (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Default navigation timeout as a [`Duration`]
#[must_use]
pub const fn navigation_timeout() -> Duration {
    Duration::from_millis(DEFAULT_NAVIGATION_TIMEOUT_MS)
}

/// Default element timeout as a [`Duration`]
#[must_use]
pub const fn element_timeout() -> Duration {
    Duration::from_millis(DEFAULT_ELEMENT_TIMEOUT_MS)
}

/// Pattern for matching page URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrlPattern {
    /// Exact URL match
    Exact(String),
    /// Prefix match
    Prefix(String),
    /// Contains substring
    Contains(String),
    /// Glob pattern (e.g., "**/inventory.html")
    Glob(String),
    /// Match any URL
    Any,
}

impl UrlPattern {
    /// Glob pattern for the product-listing page
    #[must_use]
    pub fn inventory() -> Self {
        Self::Glob("**/inventory.html".to_string())
    }

    /// Glob pattern for the cart page
    #[must_use]
    pub fn cart() -> Self {
        Self::Glob("**/cart.html".to_string())
    }

    /// Glob pattern for the first checkout step
    #[must_use]
    pub fn checkout_step_one() -> Self {
        Self::Glob("**/checkout-step-one.html".to_string())
    }

    /// Check if a URL matches this pattern
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        match self {
            Self::Exact(pattern) => url == pattern,
            Self::Prefix(pattern) => url.starts_with(pattern),
            Self::Contains(pattern) => url.contains(pattern),
            Self::Glob(pattern) => Self::glob_matches(pattern, url),
            Self::Any => true,
        }
    }

    /// Simple glob matching for URLs.
    ///
    /// Intermediate literal segments bind to their first occurrence; the
    /// final segment of a pattern not ending in `*` is anchored to the end
    /// of the URL, so a segment that also appears earlier still matches.
    fn glob_matches(pattern: &str, url: &str) -> bool {
        let parts: Vec<&str> = pattern.split('*').collect();
        if parts.is_empty() {
            return url.is_empty();
        }

        let last = parts.len() - 1;
        let mut pos = 0;
        for (i, part) in parts.iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            if i == last && !pattern.ends_with('*') {
                if i == 0 {
                    return url == *part;
                }
                return url.len() - pos >= part.len() && url[pos..].ends_with(part);
            }
            if let Some(found) = url[pos..].find(part) {
                if i == 0 && found != 0 {
                    return false;
                }
                pos += found + part.len();
            } else {
                return false;
            }
        }

        true
    }
}

impl std::fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(p) | Self::Prefix(p) | Self::Contains(p) | Self::Glob(p) => {
                write!(f, "{p}")
            }
            Self::Any => write!(f, "*"),
        }
    }
}
