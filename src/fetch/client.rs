//! Absence-aware asset access shared by fragments and scripts.

use std::sync::Arc;

use crate::cache::AbsenceCache;
use crate::fetch::error::FetchError;
use crate::fetch::locator::AssetLocator;
use crate::fetch::transport::{is_success, Transport};
use crate::observability::metrics;

const FRAGMENT: &str = "fragment";
const SCRIPT: &str = "script";

/// Transport + locator + absence cache.
///
/// Cloning shares the transport and the cache.
#[derive(Debug, Clone)]
pub struct AssetClient {
    transport: Arc<dyn Transport>,
    locator: AssetLocator,
    absence: AbsenceCache,
}

impl AssetClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        locator: AssetLocator,
        absence: AbsenceCache,
    ) -> Self {
        Self {
            transport,
            locator,
            absence,
        }
    }

    pub fn absence(&self) -> &AbsenceCache {
        &self.absence
    }

    pub fn locator(&self) -> &AssetLocator {
        &self.locator
    }

    /// GET the body at `path`.
    ///
    /// `Ok(None)` means confirmed absent: either already cached, or the
    /// server answered with a non-success status (which is then cached).
    pub async fn get_text(&self, path: &str) -> Result<Option<String>, FetchError> {
        if self.absence.is_absent(path) {
            metrics::record_absence_hit(FRAGMENT);
            tracing::trace!(path, "Skipping known-absent fragment");
            return Ok(None);
        }

        let url = self.locator.url_for(path)?;
        let res = self.transport.get(&url).await.inspect_err(|_| {
            metrics::record_fetch(FRAGMENT, "error");
        })?;

        if !res.is_success() {
            tracing::debug!(path, status = res.status, "Fragment not found");
            self.absence.mark_absent(path);
            metrics::record_fetch(FRAGMENT, "absent");
            return Ok(None);
        }

        metrics::record_fetch(FRAGMENT, "ok");
        Ok(Some(res.body))
    }

    /// HEAD `path` to learn whether it exists, with the same absence policy.
    pub async fn probe(&self, path: &str) -> Result<bool, FetchError> {
        if self.absence.is_absent(path) {
            metrics::record_absence_hit(SCRIPT);
            tracing::trace!(path, "Skipping known-absent script");
            return Ok(false);
        }

        let url = self.locator.url_for(path)?;
        let status = self.transport.head(&url).await.inspect_err(|_| {
            metrics::record_fetch(SCRIPT, "error");
        })?;

        if !is_success(status) {
            tracing::debug!(path, status, "Script not found");
            self.absence.mark_absent(path);
            metrics::record_fetch(SCRIPT, "absent");
            return Ok(false);
        }

        metrics::record_fetch(SCRIPT, "ok");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::memory::MemoryTransport;
    use url::Url;

    fn client(transport: &MemoryTransport) -> AssetClient {
        let locator = AssetLocator::new(Url::parse("https://app.test").unwrap(), &[]);
        AssetClient::new(Arc::new(transport.clone()), locator, AbsenceCache::new())
    }

    #[tokio::test]
    async fn test_absent_fetched_once() {
        let transport = MemoryTransport::new();
        let client = client(&transport);

        assert_eq!(client.get_text("/routes/+layout.html").await.unwrap(), None);
        assert_eq!(client.get_text("/routes/+layout.html").await.unwrap(), None);
        assert_eq!(transport.request_count("/routes/+layout.html"), 1);
        assert!(client.absence().is_absent("/routes/+layout.html"));
    }

    #[tokio::test]
    async fn test_absence_survives_redeploy() {
        let transport = MemoryTransport::new();
        let client = client(&transport);
        assert!(!client.probe("/routes/+page.js").await.unwrap());

        transport.insert("/routes/+page.js", "export default () => {}");
        assert!(!client.probe("/routes/+page.js").await.unwrap());
        assert_eq!(transport.request_count("/routes/+page.js"), 1);

        // A new session sees the new file
        client.absence().clear();
        assert!(client.probe("/routes/+page.js").await.unwrap());
    }

    #[tokio::test]
    async fn test_transport_error_not_cached() {
        let transport = MemoryTransport::new().with_failure("/routes/+page.html", "reset");
        let client = client(&transport);

        assert!(client.get_text("/routes/+page.html").await.is_err());
        assert!(!client.absence().is_absent("/routes/+page.html"));

        transport.insert("/routes/+page.html", "<p>ok</p>");
        assert_eq!(
            client.get_text("/routes/+page.html").await.unwrap().as_deref(),
            Some("<p>ok</p>")
        );
    }

    #[tokio::test]
    async fn test_server_error_is_absence() {
        let transport = MemoryTransport::new().with_status("/routes/+page.html", 503);
        let client = client(&transport);
        assert_eq!(client.get_text("/routes/+page.html").await.unwrap(), None);
        assert!(client.absence().is_absent("/routes/+page.html"));
    }
}
