//! Request URL construction.
//!
//! Route files are named `+layout.html` / `+page.html`. Static hosts differ
//! in how they treat a literal `+` in a path, so the `+` is sent as `%2B`,
//! except against a local development host where it is left literal. The
//! set of local hosts is configurable.

use url::Url;

use crate::fetch::error::FetchError;

const PLUS_LITERAL: &str = "+";
const PLUS_ENCODED: &str = "%2B";

/// Maps route paths to absolute request URLs.
#[derive(Debug, Clone)]
pub struct AssetLocator {
    origin: Url,
    plus: &'static str,
}

impl AssetLocator {
    /// `origin` may carry a path prefix (`https://cdn.example.com/app/`).
    pub fn new(origin: Url, local_hosts: &[String]) -> Self {
        let is_local = origin
            .host_str()
            .is_some_and(|host| local_hosts.iter().any(|h| h.eq_ignore_ascii_case(host)));
        Self {
            origin,
            plus: if is_local { PLUS_LITERAL } else { PLUS_ENCODED },
        }
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// True if `+` is sent literally.
    pub fn is_local(&self) -> bool {
        self.plus == PLUS_LITERAL
    }

    /// Apply the `+` encoding rule to a route path.
    pub fn encode_path(&self, path: &str) -> String {
        path.replace('+', self.plus)
    }

    /// Absolute URL for a route path.
    pub fn url_for(&self, path: &str) -> Result<Url, FetchError> {
        if !path.starts_with('/') {
            return Err(FetchError::InvalidUrl {
                path: path.to_string(),
                reason: "path must be absolute".to_string(),
            });
        }
        let prefix = self.origin.path().trim_end_matches('/');
        let mut url = self.origin.clone();
        url.set_path(&format!("{}{}", prefix, self.encode_path(path)));
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locator(origin: &str) -> AssetLocator {
        AssetLocator::new(Url::parse(origin).unwrap(), &["localhost".to_string()])
    }

    #[test]
    fn test_remote_host_encodes_plus() {
        let loc = locator("https://app.example.com");
        assert!(!loc.is_local());
        let url = loc.url_for("/routes/users/[id]/+page.html").unwrap();
        assert_eq!(url.as_str(), "https://app.example.com/routes/users/[id]/%2Bpage.html");
    }

    #[test]
    fn test_localhost_keeps_plus() {
        let loc = locator("http://localhost:8080");
        assert!(loc.is_local());
        let url = loc.url_for("/routes/+layout.html").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/routes/+layout.html");
    }

    #[test]
    fn test_loopback_ip_is_not_local_by_default() {
        let loc = locator("http://127.0.0.1:8080");
        assert_eq!(loc.encode_path("/routes/+page.js"), "/routes/%2Bpage.js");
    }

    #[test]
    fn test_origin_prefix_kept() {
        let loc = locator("https://cdn.example.com/app/?v=1");
        let url = loc.url_for("/routes/+page.html").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/app/routes/%2Bpage.html");
    }

    #[test]
    fn test_relative_path_rejected() {
        let loc = locator("https://app.example.com");
        assert!(matches!(
            loc.url_for("routes/+page.html"),
            Err(FetchError::InvalidUrl { .. })
        ));
    }
}
