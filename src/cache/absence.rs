//! Existence cache: paths confirmed absent during this session.
//!
//! Fragment and script paths share one namespace keyed by the exact request
//! path. Membership only grows until the session is reloaded; content
//! deployed after a path was recorded is not observed before then.

use std::sync::Arc;

use dashmap::DashSet;

use crate::observability::metrics;

/// A thread-safe, append-only set of absent paths.
#[derive(Debug, Clone, Default)]
pub struct AbsenceCache {
    inner: Arc<DashSet<String>>,
}

impl AbsenceCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `path` has been confirmed absent.
    pub fn is_absent(&self, path: &str) -> bool {
        self.inner.contains(path)
    }

    /// Record `path` as absent for the rest of the session.
    pub fn mark_absent(&self, path: &str) {
        if self.inner.insert(path.to_string()) {
            tracing::debug!(path, "Recorded absent path");
            metrics::record_absent_paths(self.inner.len());
        }
    }

    /// Forget every recorded path. Only a session reload does this.
    pub fn clear(&self) {
        self.inner.clear();
        metrics::record_absent_paths(0);
    }

    /// Number of recorded paths.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
