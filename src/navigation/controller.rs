//! Navigation controller.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::Instrument;
use url::Url;
use uuid::Uuid;

use crate::behavior::{BehaviorError, BehaviorLoader, BehaviorResolver};
use crate::cache::AbsenceCache;
use crate::compose::{ComposeError, Composer};
use crate::config::RouterConfig;
use crate::dom::{Document, Fragment};
use crate::fetch::{
    AssetClient, AssetLocator, FetchError, FragmentFetcher, HttpTransport, Transport,
};
use crate::navigation::gate::{AccessGate, AllowAll};
use crate::navigation::state::{
    InFlightGuard, NavState, NavigationOutcome, NavigationReport, Trigger,
};
use crate::observability::metrics;
use crate::routing::{layout_fragment_path, resolve_with_base, script_path, Route};

/// A hard failure that aborted a navigation.
#[derive(Debug, Clone, Error)]
pub enum NavigationError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error(transparent)]
    Compose(#[from] ComposeError),
}

/// Drives navigations against one document.
///
/// A navigator is one session: its document and absence cache live until
/// [`Navigator::reload`]. Clones share both.
#[derive(Debug, Clone)]
pub struct Navigator {
    document: Arc<Mutex<Document>>,
    absence: AbsenceCache,
    fetcher: FragmentFetcher,
    loader: BehaviorLoader,
    composer: Composer,
    base_path: String,
    gate: Arc<dyn AccessGate>,
    single_flight: bool,
    generation: Arc<AtomicU64>,
    in_flight: Arc<AtomicUsize>,
}

impl Navigator {
    /// Build a session over `transport`, resolving scripts with `resolver`.
    pub fn new(
        config: &RouterConfig,
        transport: Arc<dyn Transport>,
        resolver: Arc<dyn BehaviorResolver>,
    ) -> Result<Self, FetchError> {
        let origin = Url::parse(&config.site.origin).map_err(|e| FetchError::InvalidUrl {
            path: config.site.origin.clone(),
            reason: e.to_string(),
        })?;
        let locator = AssetLocator::new(origin, &config.http.local_hosts);
        let absence = AbsenceCache::new();
        let client = AssetClient::new(transport, locator, absence.clone());

        Ok(Self {
            document: Arc::new(Mutex::new(Document::new())),
            absence,
            fetcher: FragmentFetcher::new(client.clone()),
            loader: BehaviorLoader::new(client, resolver),
            composer: Composer::from_config(&config.document),
            base_path: config.routing.base_path.clone(),
            gate: Arc::new(AllowAll),
            single_flight: config.navigation.single_flight,
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Build a session fetching over HTTP.
    pub fn over_http(
        config: &RouterConfig,
        resolver: Arc<dyn BehaviorResolver>,
    ) -> Result<Self, FetchError> {
        let transport = HttpTransport::new(&config.http)?;
        Self::new(config, Arc::new(transport), resolver)
    }

    pub fn with_gate(mut self, gate: Arc<dyn AccessGate>) -> Self {
        self.gate = gate;
        self
    }

    /// Start from an existing document instead of an empty body.
    pub fn with_document(self, document: Document) -> Self {
        *self.document.lock() = document;
        self
    }

    pub fn absence(&self) -> &AbsenceCache {
        &self.absence
    }

    pub fn state(&self) -> NavState {
        if self.in_flight.load(Ordering::SeqCst) > 0 {
            NavState::Navigating
        } else {
            NavState::Idle
        }
    }

    /// Snapshot of the current document.
    pub fn document(&self) -> Document {
        self.document.lock().clone()
    }

    /// Inner HTML of the document body.
    pub fn render_html(&self) -> String {
        self.document.lock().to_html()
    }

    /// Start a new session: empty document, empty absence cache.
    pub fn reload(&self) {
        *self.document.lock() = Document::new();
        self.absence.clear();
        tracing::info!("Session reloaded");
    }

    /// Initial navigation once the host document is ready.
    pub async fn on_ready(&self, hash: &str) -> Result<NavigationOutcome, NavigationError> {
        self.navigate(hash, Trigger::Ready).await
    }

    pub async fn on_hash_change(&self, hash: &str) -> Result<NavigationOutcome, NavigationError> {
        self.navigate(hash, Trigger::HashChange).await
    }

    /// Walk the route chain for `hash`, root layout to page.
    pub async fn navigate(
        &self,
        hash: &str,
        trigger: Trigger,
    ) -> Result<NavigationOutcome, NavigationError> {
        let id = Uuid::new_v4();
        let span = tracing::info_span!("navigation", %id, %trigger, hash);
        let started = Instant::now();

        let result = async {
            let result = self.run(id, hash, trigger).await;
            match &result {
                Ok(outcome) => tracing::debug!(
                    outcome = outcome.label(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Navigation finished"
                ),
                Err(e) => tracing::error!(error = %e, "Navigation failed"),
            }
            result
        }
        .instrument(span)
        .await;

        let label = match &result {
            Ok(outcome) => outcome.label(),
            Err(_) => "error",
        };
        metrics::record_navigation(label, started.elapsed());
        result
    }

    async fn run(
        &self,
        id: Uuid,
        hash: &str,
        trigger: Trigger,
    ) -> Result<NavigationOutcome, NavigationError> {
        let _guard = InFlightGuard::new(self.in_flight.clone());
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let route = resolve_with_base(hash, &self.base_path);
        if !self.gate.allow(&route).await {
            tracing::info!(page = route.chain.page(), "Navigation denied");
            return Ok(NavigationOutcome::Denied);
        }
        tracing::debug!(page = route.chain.page(), params = ?route.params, "Resolved route");

        let mut report = NavigationReport::new(id, trigger, route.clone());

        for dir in route.chain.layouts() {
            let path = layout_fragment_path(dir);
            if self.is_composed(&path) {
                tracing::trace!(path = %path, "Layout already composed");
                report.layouts_skipped.push(path);
                continue;
            }
            if self.superseded(generation) {
                return Ok(NavigationOutcome::Superseded);
            }

            let Some(fragment) = self.fetcher.fetch_fragment(&path).await? else {
                tracing::debug!(path = %path, "Layout not found");
                report.layouts_absent.push(path);
                continue;
            };
            if self.superseded(generation) {
                return Ok(NavigationOutcome::Superseded);
            }

            if self.compose(&path, fragment, false)? {
                self.loader.load_script(&script_path(&path), &route.params).await?;
                report.layouts_composed.push(path);
            }
        }

        report.page_composed = match self.load_page(&route, generation).await? {
            Some(composed) => composed,
            None => return Ok(NavigationOutcome::Superseded),
        };

        Ok(NavigationOutcome::Completed(report))
    }

    /// Fetch, compose and script the terminal page.
    ///
    /// `None` when superseded. The page script is loaded even if the page
    /// fragment is absent.
    async fn load_page(
        &self,
        route: &Route,
        generation: u64,
    ) -> Result<Option<bool>, NavigationError> {
        let path = route.page_fragment_path();
        if self.superseded(generation) {
            return Ok(None);
        }

        let composed = match self.fetcher.fetch_page(&path, &route.params).await? {
            Some(fragment) => {
                if self.superseded(generation) {
                    return Ok(None);
                }
                self.compose(&path, fragment, true)?
            }
            None => {
                tracing::warn!(path = %path, "Page not found");
                false
            }
        };

        self.loader.load_script(&route.page_script_path(), &route.params).await?;
        Ok(Some(composed))
    }

    fn is_composed(&self, path: &str) -> bool {
        let doc = self.document.lock();
        self.composer.is_composed(&doc, path)
    }

    fn compose(&self, path: &str, fragment: Fragment, force: bool) -> Result<bool, ComposeError> {
        let mut doc = self.document.lock();
        self.composer.compose(&mut doc, path, fragment, force)
    }

    fn superseded(&self, generation: u64) -> bool {
        let superseded = self.single_flight && self.generation.load(Ordering::SeqCst) != generation;
        if superseded {
            tracing::debug!(generation, "Navigation superseded");
        }
        superseded
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use tracing_test::traced_test;

    use super::*;
    use crate::behavior::BehaviorRegistry;
    use crate::fetch::MemoryTransport;

    #[derive(Debug)]
    struct DenyPrefix(&'static str);

    #[async_trait]
    impl AccessGate for DenyPrefix {
        async fn allow(&self, route: &Route) -> bool {
            route.segments.first().map(String::as_str) != Some(self.0)
        }
    }

    fn navigator(transport: &MemoryTransport, config: &RouterConfig) -> Navigator {
        Navigator::new(
            config,
            Arc::new(transport.clone()),
            Arc::new(BehaviorRegistry::new()),
        )
        .unwrap()
    }

    fn site() -> MemoryTransport {
        MemoryTransport::new()
            .with_file("/routes/+layout.html", "<main><child></child></main>")
            .with_file("/routes/+page.html", "<p>home</p>")
            .with_file("/routes/admin/+page.html", "<p>admin</p>")
    }

    #[tokio::test]
    async fn test_denied_navigation_does_nothing() {
        let transport = site();
        let nav = navigator(&transport, &RouterConfig::default()).with_gate(Arc::new(DenyPrefix("admin")));

        let outcome = nav.on_ready("#/admin").await.unwrap();
        assert!(matches!(outcome, NavigationOutcome::Denied));
        assert!(transport.requests().is_empty());
        assert_eq!(nav.render_html(), "");

        let outcome = nav.on_hash_change("#/").await.unwrap();
        assert!(outcome.report().unwrap().page_composed);
    }

    #[tokio::test]
    async fn test_state_returns_to_idle() {
        let transport = site();
        let nav = navigator(&transport, &RouterConfig::default());
        assert_eq!(nav.state(), NavState::Idle);
        nav.on_ready("#/").await.unwrap();
        assert_eq!(nav.state(), NavState::Idle);
    }

    #[tokio::test]
    async fn test_state_is_navigating_while_in_flight() {
        let transport = site().with_delay("/routes/+page.html", Duration::from_millis(100));
        let nav = navigator(&transport, &RouterConfig::default());
        let background = nav.clone();
        let handle = tokio::spawn(async move { background.on_ready("#/").await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(nav.state(), NavState::Navigating);
        handle.await.unwrap().unwrap();
        assert_eq!(nav.state(), NavState::Idle);
    }

    #[tokio::test]
    async fn test_single_flight_supersedes_older() {
        let transport = site().with_delay("/routes/admin/+page.html", Duration::from_millis(50));
        let mut config = RouterConfig::default();
        config.navigation.single_flight = true;
        let nav = navigator(&transport, &config);

        let (first, second) = tokio::join!(nav.on_ready("#/admin"), nav.on_hash_change("#/"));
        assert!(matches!(first.unwrap(), NavigationOutcome::Superseded));
        assert!(matches!(second.unwrap(), NavigationOutcome::Completed(_)));
        assert_eq!(
            nav.render_html(),
            "<main data-path=\"/routes/+layout.html\"><p data-path=\"/routes/+page.html\">home</p></main>"
        );
    }

    #[tokio::test]
    async fn test_reload_starts_new_session() {
        let transport = site();
        let nav = navigator(&transport, &RouterConfig::default());
        nav.on_ready("#/missing").await.unwrap();
        assert!(nav.absence().is_absent("/routes/missing/+page.html"));

        transport.insert("/routes/missing/+page.html", "<p>deployed</p>");
        nav.reload();
        assert_eq!(nav.render_html(), "");
        assert!(nav.absence().is_empty());

        let outcome = nav.on_ready("#/missing").await.unwrap();
        assert!(outcome.report().unwrap().page_composed);
        assert!(nav.render_html().contains("deployed"));
    }

    #[tokio::test]
    async fn test_invalid_origin() {
        let mut config = RouterConfig::default();
        config.site.origin = "::nope".into();
        let err = Navigator::new(
            &config,
            Arc::new(MemoryTransport::new()),
            Arc::new(BehaviorRegistry::new()),
        )
        .unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_absent_page_is_logged_not_failed() {
        let transport = MemoryTransport::new().with_file("/routes/+layout.html", "<main><child></child></main>");
        let nav = navigator(&transport, &RouterConfig::default());

        let outcome = nav.on_ready("#/nowhere").await.unwrap();
        assert!(!outcome.report().unwrap().page_composed);
        assert!(logs_contain("Page not found"));
        assert_eq!(
            nav.render_html(),
            "<main data-path=\"/routes/+layout.html\"><child></child></main>"
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn test_failure_is_logged_at_error() {
        let transport = MemoryTransport::new().with_failure("/routes/+page.html", "reset");
        let nav = navigator(&transport, &RouterConfig::default());

        assert!(nav.on_ready("#/").await.is_err());
        assert!(logs_contain("Navigation failed"));
    }
}
