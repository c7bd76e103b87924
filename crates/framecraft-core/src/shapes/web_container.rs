//! Web container: a frame that embeds an external page.

use serde::{Deserialize, Serialize};
use url::Url;

/// Page shown by freshly created containers.
pub const DEFAULT_WEB_CONTAINER_URL: &str = "https://example.com";

/// Properties of a web container shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebContainerProps {
    pub w: f64,
    pub h: f64,
    /// Address of the embedded page (may be empty until the user edits it).
    #[serde(default)]
    pub url: String,
}

impl WebContainerProps {
    pub fn new(w: f64, h: f64) -> Self {
        Self::with_url(w, h, DEFAULT_WEB_CONTAINER_URL)
    }

    pub fn with_url(w: f64, h: f64, url: impl Into<String>) -> Self {
        Self { w, h, url: url.into() }
    }

    /// Whether the url parses as an absolute http(s) address.
    ///
    /// Only web pages are embeddable. Other absolute schemes such as
    /// `ftp:`, `file:`, `data:` or `javascript:` are refused even though
    /// they parse.
    pub fn has_valid_url(&self) -> bool {
        Url::parse(&self.url)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false)
    }
}

impl Default for WebContainerProps {
    fn default() -> Self {
        Self::new(400.0, 300.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_props() {
        let props = WebContainerProps::default();
        assert!((props.w - 400.0).abs() < f64::EPSILON);
        assert!((props.h - 300.0).abs() < f64::EPSILON);
        assert_eq!(props.url, DEFAULT_WEB_CONTAINER_URL);
        assert!(props.has_valid_url());
    }

    #[test]
    fn test_invalid_urls() {
        assert!(!WebContainerProps::with_url(1.0, 1.0, "").has_valid_url());
        assert!(!WebContainerProps::with_url(1.0, 1.0, "example.com").has_valid_url());
        assert!(!WebContainerProps::with_url(1.0, 1.0, "javascript:alert(1)").has_valid_url());
    }

    #[test]
    fn test_only_web_schemes_embed() {
        assert!(WebContainerProps::with_url(1.0, 1.0, "http://example.com/a").has_valid_url());
        assert!(!WebContainerProps::with_url(1.0, 1.0, "ftp://example.com/a").has_valid_url());
        assert!(!WebContainerProps::with_url(1.0, 1.0, "file:///etc/hosts").has_valid_url());
        assert!(!WebContainerProps::with_url(1.0, 1.0, "data:text/html,hi").has_valid_url());
    }
}
