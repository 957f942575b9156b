//! Applies fragments to the document.

use thiserror::Error;

use crate::compose::outline::{locate, InsertionPoint, Outline};
use crate::config::DocumentConfig;
use crate::dom::{Document, DomError, ElementData, Fragment};
use crate::observability::metrics;

/// Errors that can occur while composing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ComposeError {
    /// The document is populated but has no place for this fragment.
    #[error("no insertion point for {path} in a populated document")]
    NoInsertionPoint { path: String },

    /// A structural document operation failed.
    #[error("document error: {0}")]
    Dom(#[from] DomError),
}

/// Splices fragments into a document, tagging them with their path.
#[derive(Debug, Clone)]
pub struct Composer {
    path_attribute: String,
    placeholder_tag: String,
}

impl Default for Composer {
    fn default() -> Self {
        Self::from_config(&DocumentConfig::default())
    }
}

impl Composer {
    pub fn new(path_attribute: impl Into<String>, placeholder_tag: impl Into<String>) -> Self {
        Self {
            path_attribute: path_attribute.into(),
            placeholder_tag: placeholder_tag.into().to_ascii_lowercase(),
        }
    }

    pub fn from_config(config: &DocumentConfig) -> Self {
        Self::new(config.path_attribute.clone(), config.placeholder_tag.clone())
    }

    pub fn path_attribute(&self) -> &str {
        &self.path_attribute
    }

    pub fn placeholder_tag(&self) -> &str {
        &self.placeholder_tag
    }

    /// True if an element in `doc` claims `path`.
    pub fn is_composed(&self, doc: &Document, path: &str) -> bool {
        doc.find_by_attribute(&self.path_attribute, path).is_some()
    }

    pub fn outline(&self, doc: &Document) -> Outline {
        Outline::from_document(doc, &self.path_attribute, &self.placeholder_tag)
    }

    /// Where `path` would be inserted.
    pub fn plan(&self, doc: &Document, path: &str) -> Result<InsertionPoint, ComposeError> {
        locate(&self.outline(doc), path).ok_or_else(|| ComposeError::NoInsertionPoint {
            path: path.to_string(),
        })
    }

    /// Compose `fragment` for `path` into `doc`.
    ///
    /// Returns `Ok(false)` without touching the document when `path` is
    /// already composed and `force` is false.
    pub fn compose(
        &self,
        doc: &mut Document,
        path: &str,
        mut fragment: Fragment,
        force: bool,
    ) -> Result<bool, ComposeError> {
        if !force && self.is_composed(doc, path) {
            tracing::trace!(path, "Already composed, skipping");
            return Ok(false);
        }

        let point = self.plan(doc, path)?;
        let target = match point.node() {
            Some(id) => id,
            None => {
                let placeholder = ElementData::new(self.placeholder_tag.as_str());
                doc.append_element(doc.body(), placeholder)?
            }
        };

        fragment.tag_root(&self.path_attribute, path);
        doc.replace_with(target, fragment)?;

        metrics::record_composition(fragment_kind(path));

        tracing::debug!(path, insertion = ?point, force, "Composed fragment");
        Ok(true)
    }
}

fn fragment_kind(path: &str) -> &'static str {
    if path.ends_with("+layout.html") {
        "layout"
    } else {
        "page"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compose(
        composer: &Composer,
        doc: &mut Document,
        path: &str,
        html: &str,
        force: bool,
    ) -> bool {
        composer
            .compose(doc, path, Fragment::parse(html), force)
            .unwrap()
    }

    #[test]
    fn test_bootstrap_into_empty_body() {
        let composer = Composer::default();
        let mut doc = Document::new();
        assert!(compose(&composer, &mut doc, "/routes/+layout.html", "<div><child></child></div>", false));
        assert_eq!(
            doc.to_html(),
            "<div data-path=\"/routes/+layout.html\"><child></child></div>"
        );
    }

    #[test]
    fn test_idempotent_without_force() {
        let composer = Composer::default();
        let mut doc = Document::new();
        assert!(compose(&composer, &mut doc, "/routes/+layout.html", "<div><child></child></div>", false));
        let before = doc.to_html();
        assert!(!compose(&composer, &mut doc, "/routes/+layout.html", "<div>changed</div>", false));
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn test_force_rerenders_same_path() {
        let composer = Composer::default();
        let mut doc = Document::new();
        compose(&composer, &mut doc, "/routes/+page.html", "<p>one</p>", true);
        compose(&composer, &mut doc, "/routes/+page.html", "<p>two</p>", true);
        assert_eq!(doc.to_html(), "<p data-path=\"/routes/+page.html\">two</p>");
    }

    #[test]
    fn test_nested_chain() {
        let composer = Composer::default();
        let mut doc = Document::new();
        compose(&composer, &mut doc, "/routes/+layout.html", "<div id=app><child></child></div>", false);
        compose(&composer, &mut doc, "/routes/users/+layout.html", "<section><child></child></section>", false);
        compose(&composer, &mut doc, "/routes/users/[id]/+page.html", "<p>42</p>", true);
        assert_eq!(
            doc.to_html(),
            "<div id=\"app\" data-path=\"/routes/+layout.html\">\
             <section data-path=\"/routes/users/+layout.html\">\
             <p data-path=\"/routes/users/[id]/+page.html\">42</p>\
             </section></div>"
        );
        assert!(composer.outline(&doc).placeholder.is_none());
    }

    #[test]
    fn test_unrelated_static_content_is_error() {
        let composer = Composer::default();
        let mut doc = Document::from_body_html("<h1>static</h1>");
        let err = composer
            .compose(&mut doc, "/routes/+page.html", Fragment::parse("<p></p>"), true)
            .unwrap_err();
        assert_eq!(
            err,
            ComposeError::NoInsertionPoint {
                path: "/routes/+page.html".into()
            }
        );
        assert_eq!(doc.to_html(), "<h1>static</h1>");
    }

    #[test]
    fn test_custom_attribute_and_tag() {
        let composer = Composer::new("data-route", "slot-here");
        let mut doc = Document::new();
        compose(&composer, &mut doc, "/r/+layout.html", "<main><slot-here></slot-here></main>", false);
        compose(&composer, &mut doc, "/r/+page.html", "hello", true);
        assert_eq!(
            doc.to_html(),
            "<main data-route=\"/r/+layout.html\"><div data-route=\"/r/+page.html\">hello</div></main>"
        );
    }
}
