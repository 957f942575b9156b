//! End-to-end navigation over real HTTP against a mock site.

mod common;

use std::sync::Arc;

use fragment_router::behavior::BehaviorRegistry;
use fragment_router::config::RouterConfig;
use fragment_router::fetch::{HttpTransport, Transport};
use fragment_router::navigation::{NavigationError, NavigationOutcome, Navigator};

use common::{files, start_mock_site};

fn config_for(addr: std::net::SocketAddr, local: bool) -> RouterConfig {
    let mut config = RouterConfig::default();
    config.site.origin = format!("http://{}", addr);
    config.http.local_hosts = if local {
        vec!["127.0.0.1".to_string()]
    } else {
        Vec::new()
    };
    config
}

#[tokio::test]
async fn test_render_chain_over_http() {
    let (addr, seen) = start_mock_site(files(&[
        ("/routes/+layout.html", "<div class=\"shell\"><child></child></div>"),
        ("/routes/users/+page.html", "<h1>Users</h1>"),
    ]))
    .await;

    let config = config_for(addr, false);
    let navigator = Navigator::over_http(&config, Arc::new(BehaviorRegistry::new())).unwrap();

    let outcome = navigator.on_ready("#/users").await.unwrap();
    let report = outcome.report().unwrap();
    assert_eq!(report.layouts_composed, ["/routes/+layout.html"]);
    assert!(report.layouts_absent.is_empty());
    assert!(report.page_composed);

    assert_eq!(
        navigator.render_html(),
        "<div class=\"shell\" data-path=\"/routes/+layout.html\">\
         <h1 data-path=\"/routes/users/+page.html\">Users</h1></div>"
    );

    let seen = seen.lock().clone();
    assert!(seen.contains(&("GET".to_string(), "/routes/%2Blayout.html".to_string())));
    assert!(seen.contains(&("HEAD".to_string(), "/routes/users/%2Bpage.js".to_string())));
    assert!(seen.iter().all(|(_, path)| !path.contains('+')));
}

#[tokio::test]
async fn test_local_host_sends_literal_plus() {
    let (addr, seen) = start_mock_site(files(&[("/routes/+page.html", "<p>home</p>")])).await;

    let config = config_for(addr, true);
    let navigator = Navigator::over_http(&config, Arc::new(BehaviorRegistry::new())).unwrap();
    navigator.on_ready("#/").await.unwrap();

    let seen = seen.lock().clone();
    assert!(seen.contains(&("GET".to_string(), "/routes/+page.html".to_string())));
    assert!(seen.iter().all(|(_, path)| !path.contains("%2B")));
}

#[tokio::test]
async fn test_server_error_is_cached_absence() {
    let mut site = files(&[("/routes/a/+page.html", "<p>a</p>")]);
    site.insert("/routes/+layout.html".to_string(), (500, String::new()));
    let (addr, seen) = start_mock_site(site).await;

    let config = config_for(addr, false);
    let navigator = Navigator::over_http(&config, Arc::new(BehaviorRegistry::new())).unwrap();

    navigator.on_ready("#/a").await.unwrap();
    navigator.on_hash_change("#/a").await.unwrap();

    let layout_gets = seen
        .lock()
        .iter()
        .filter(|(method, path)| method == "GET" && path == "/routes/%2Blayout.html")
        .count();
    assert_eq!(layout_gets, 1);
    assert_eq!(navigator.render_html(), "<p data-path=\"/routes/a/+page.html\">a</p>");
}

#[tokio::test]
async fn test_connection_refused_is_error_and_not_cached() {
    // Bind then drop to get a port nobody listens on.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let config = config_for(addr, false);
    let navigator = Navigator::over_http(&config, Arc::new(BehaviorRegistry::new())).unwrap();

    let err = navigator.on_ready("#/").await.unwrap_err();
    assert!(matches!(err, NavigationError::Fetch(_)));
    assert!(navigator.absence().is_empty());
    assert_eq!(navigator.render_html(), "");
}

#[tokio::test]
async fn test_head_probe_returns_status() {
    let (addr, _seen) = start_mock_site(files(&[("/routes/+page.js", "export default () => {}")])).await;
    let transport = HttpTransport::new(&RouterConfig::default().http).unwrap();

    let found = url::Url::parse(&format!("http://{}/routes/%2Bpage.js", addr)).unwrap();
    assert_eq!(transport.head(&found).await.unwrap(), 200);

    let missing = url::Url::parse(&format!("http://{}/routes/a/%2Bpage.js", addr)).unwrap();
    assert_eq!(transport.head(&missing).await.unwrap(), 404);

    let page = transport.get(&found).await.unwrap();
    assert!(page.is_success());
    assert_eq!(page.body, "export default () => {}");
}

#[tokio::test]
async fn test_denied_outcome_has_no_report() {
    let (addr, seen) = start_mock_site(files(&[])).await;
    let config = config_for(addr, false);

    #[derive(Debug)]
    struct DenyAll;

    #[async_trait::async_trait]
    impl fragment_router::navigation::AccessGate for DenyAll {
        async fn allow(&self, _route: &fragment_router::routing::Route) -> bool {
            false
        }
    }

    let navigator = Navigator::over_http(&config, Arc::new(BehaviorRegistry::new()))
        .unwrap()
        .with_gate(Arc::new(DenyAll));
    let outcome = navigator.on_ready("#/").await.unwrap();
    assert!(matches!(outcome, NavigationOutcome::Denied));
    assert!(outcome.report().is_none());
    assert!(seen.lock().is_empty());
}
