//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Origin must be an absolute http(s) URL with a host
//! - Base path must be absolute without a trailing slash
//! - Attribute and tag names must be plain markup names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::RouterConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.site.origin) {
        Ok(url) => {
            if !matches!(url.scheme(), "http" | "https") {
                errors.push(ValidationError::new(
                    "site.origin",
                    format!("unsupported scheme '{}'", url.scheme()),
                ));
            }
            if url.host_str().map_or(true, str::is_empty) {
                errors.push(ValidationError::new("site.origin", "missing host"));
            }
        }
        Err(e) => errors.push(ValidationError::new("site.origin", e.to_string())),
    }

    let base = &config.routing.base_path;
    if !base.starts_with('/') {
        errors.push(ValidationError::new("routing.base_path", "must start with '/'"));
    } else if base.len() > 1 && base.ends_with('/') {
        errors.push(ValidationError::new("routing.base_path", "must not end with '/'"));
    } else if base == "/" {
        errors.push(ValidationError::new("routing.base_path", "must name a directory"));
    }

    check_name(&mut errors, "document.path_attribute", &config.document.path_attribute);
    check_name(&mut errors, "document.placeholder_tag", &config.document.placeholder_tag);
    if config.document.placeholder_tag.eq_ignore_ascii_case("body") {
        errors.push(ValidationError::new(
            "document.placeholder_tag",
            "cannot be the document body",
        ));
    }

    if config.http.timeout_secs == Some(0) {
        errors.push(ValidationError::new("http.timeout_secs", "must be greater than zero"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_name(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.push(ValidationError::new(field, "must not be empty"));
    } else if !value.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        errors.push(ValidationError::new(
            field,
            format!("'{}' contains characters other than letters, digits and '-'", value),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(config: &RouterConfig) -> Vec<&'static str> {
        validate_config(config)
            .err()
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.field)
            .collect()
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&RouterConfig::default()).is_ok());
    }

    #[test]
    fn test_origin_checks() {
        let mut config = RouterConfig::default();
        config.site.origin = "ftp://example.com".into();
        assert_eq!(fields(&config), ["site.origin"]);

        config.site.origin = "not a url".into();
        assert_eq!(fields(&config), ["site.origin"]);
    }

    #[test]
    fn test_base_path_checks() {
        let mut config = RouterConfig::default();
        for bad in ["routes", "/routes/", "/"] {
            config.routing.base_path = bad.into();
            assert_eq!(fields(&config), ["routing.base_path"], "{}", bad);
        }
        config.routing.base_path = "/app/routes".into();
        assert!(fields(&config).is_empty());
    }

    #[test]
    fn test_name_checks() {
        let mut config = RouterConfig::default();
        config.document.path_attribute = "data path".into();
        config.document.placeholder_tag = String::new();
        assert_eq!(
            fields(&config),
            ["document.path_attribute", "document.placeholder_tag"]
        );
    }

    #[test]
    fn test_placeholder_cannot_be_body() {
        let mut config = RouterConfig::default();
        config.document.placeholder_tag = "BODY".into();
        assert_eq!(fields(&config), ["document.placeholder_tag"]);
    }
}
