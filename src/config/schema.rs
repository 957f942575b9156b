//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::DEFAULT_BASE_PATH;

/// Root configuration for a router session.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Where route files are served from.
    pub site: SiteConfig,

    /// Route file layout.
    pub routing: RoutingConfig,

    /// Document markers.
    pub document: DocumentConfig,

    /// HTTP client settings.
    pub http: HttpConfig,

    /// Navigation behavior.
    pub navigation: NavigationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Site origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Origin URL route files are fetched from (e.g., "http://localhost:8080").
    pub origin: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Directory all route files live under. No trailing slash.
    pub base_path: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }
}

/// Names used to mark composed content in the document.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Attribute carrying the fragment path on composed roots.
    pub path_attribute: String,

    /// Tag name of the placeholder a layout leaves for its child.
    pub placeholder_tag: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path_attribute: "data-path".to_string(),
            placeholder_tag: "child".to_string(),
        }
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Hosts that receive a literal `+` in request paths.
    pub local_hosts: Vec<String>,

    /// Request timeout in seconds. Unset means no timeout.
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            local_hosts: vec!["localhost".to_string()],
            timeout_secs: None,
            user_agent: format!("fragment-router/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NavigationConfig {
    /// Abandon a navigation as soon as a newer one starts.
    pub single_flight: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
