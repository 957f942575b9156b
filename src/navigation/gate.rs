//! Access gate consulted before every navigation.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::routing::Route;

/// Decides whether a route may be navigated to.
///
/// Hosts plug their session or subscription check in here. A denied
/// navigation leaves the document untouched.
#[async_trait]
pub trait AccessGate: Send + Sync + Debug {
    async fn allow(&self, route: &Route) -> bool;
}

/// Gate that admits every route.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl AccessGate for AllowAll {
    async fn allow(&self, _route: &Route) -> bool {
        true
    }
}
