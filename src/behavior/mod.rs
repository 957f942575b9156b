//! Per-route behavior scripts.
//!
//! # Data Flow
//! ```text
//! script path ("/routes/users/[id]/+page.js")
//!     → loader.rs (absence cache, HEAD probe)
//!     → BehaviorResolver (path → Module)
//!         → registry.rs (path → registered behavior, optional fallback)
//!     → Module default export invoked with ScriptArgs { params }
//! ```
//!
//! # Design Decisions
//! - Scripts are capabilities resolved by path, not code loaded at runtime
//! - A module without a default export is logged and skipped
//! - Resolution and invocation failures propagate to the navigation

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use serde::Serialize;
use thiserror::Error;

use crate::fetch::FetchError;
use crate::routing::Params;

pub mod loader;
pub mod registry;

pub use loader::{BehaviorLoader, ScriptOutcome};
pub use registry::BehaviorRegistry;

/// Argument passed to a behavior's default export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptArgs {
    pub params: Params,
}

/// Future returned by a behavior.
pub type BehaviorFuture = BoxFuture<'static, Result<(), String>>;

/// A behavior: the default export of a route script.
pub type Behavior = Arc<dyn Fn(ScriptArgs) -> BehaviorFuture + Send + Sync>;

/// Wrap an async closure as a [`Behavior`].
pub fn behavior<F, Fut>(f: F) -> Behavior
where
    F: Fn(ScriptArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), String>> + Send + 'static,
{
    Arc::new(move |args| Box::pin(f(args)))
}

/// A resolved script module.
#[derive(Clone, Default)]
pub struct Module {
    default_export: Option<Behavior>,
}

impl Module {
    pub fn with_default(behavior: Behavior) -> Self {
        Self {
            default_export: Some(behavior),
        }
    }

    /// A module that exports nothing callable.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn default_export(&self) -> Option<&Behavior> {
        self.default_export.as_ref()
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("default_export", &self.default_export.is_some())
            .finish()
    }
}

/// Errors that can occur while loading or running a behavior.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BehaviorError {
    /// The existence probe failed without a status.
    #[error("probe failed: {0}")]
    Probe(#[from] FetchError),

    /// The script exists but could not be resolved to a module.
    #[error("failed to load {path}: {reason}")]
    Load { path: String, reason: String },

    /// The default export returned an error.
    #[error("behavior {path} failed: {reason}")]
    Invoke { path: String, reason: String },
}

/// Capability: map a script path to a module.
#[async_trait]
pub trait BehaviorResolver: Send + Sync + fmt::Debug {
    async fn resolve(&self, path: &str) -> Result<Module, BehaviorError>;
}
