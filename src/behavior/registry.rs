//! Path-keyed behavior registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::behavior::{behavior, Behavior, BehaviorError, BehaviorResolver, Module};

type Fallback = Arc<dyn Fn(&str) -> Result<Module, BehaviorError> + Send + Sync>;

/// Resolves script paths from registered behaviors.
///
/// Paths without an entry go to the fallback, or fail to load when there is
/// none.
#[derive(Clone, Default)]
pub struct BehaviorRegistry {
    modules: HashMap<String, Module>,
    fallback: Option<Fallback>,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `behavior` as the default export of `path`.
    pub fn register(mut self, path: &str, behavior: Behavior) -> Self {
        self.modules.insert(path.to_string(), Module::with_default(behavior));
        self
    }

    /// Register a module as-is (e.g. one without a default export).
    pub fn register_module(mut self, path: &str, module: Module) -> Self {
        self.modules.insert(path.to_string(), module);
        self
    }

    pub fn with_fallback<F>(mut self, fallback: F) -> Self
    where
        F: Fn(&str) -> Result<Module, BehaviorError> + Send + Sync + 'static,
    {
        self.fallback = Some(Arc::new(fallback));
        self
    }

    /// Fallback that resolves every unknown path to a behavior which only
    /// logs its invocation. Used by hosts that cannot execute scripts.
    pub fn with_logging_fallback(self) -> Self {
        self.with_fallback(|path| {
            let path = path.to_string();
            Ok(Module::with_default(behavior(move |args| {
                let path = path.clone();
                async move {
                    tracing::info!(path = %path, params = ?args.params, "Behavior script present, not executed");
                    Ok(())
                }
            })))
        })
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<_> = self.modules.keys().collect();
        paths.sort();
        f.debug_struct("BehaviorRegistry")
            .field("paths", &paths)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

#[async_trait]
impl BehaviorResolver for BehaviorRegistry {
    async fn resolve(&self, path: &str) -> Result<Module, BehaviorError> {
        if let Some(module) = self.modules.get(path) {
            return Ok(module.clone());
        }
        match &self.fallback {
            Some(fallback) => fallback(path),
            None => Err(BehaviorError::Load {
                path: path.to_string(),
                reason: "no module registered".to_string(),
            }),
        }
    }
}
