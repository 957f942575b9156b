//! Behavior loader.

use std::sync::Arc;

use crate::behavior::{BehaviorError, BehaviorResolver, ScriptArgs};
use crate::fetch::AssetClient;
use crate::routing::Params;

/// What happened to a script request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptOutcome {
    /// Confirmed absent (cached or by probe); nothing ran.
    Absent,
    /// The module had no default export; nothing ran.
    NoDefaultExport,
    /// The default export ran to completion.
    Ran,
}

/// Probes, resolves and runs route scripts.
#[derive(Debug, Clone)]
pub struct BehaviorLoader {
    client: AssetClient,
    resolver: Arc<dyn BehaviorResolver>,
}

impl BehaviorLoader {
    pub fn new(client: AssetClient, resolver: Arc<dyn BehaviorResolver>) -> Self {
        Self { client, resolver }
    }

    pub fn client(&self) -> &AssetClient {
        &self.client
    }

    /// Load the script at `path` and run its default export with `params`.
    pub async fn load_script(
        &self,
        path: &str,
        params: &Params,
    ) -> Result<ScriptOutcome, BehaviorError> {
        if !self.client.probe(path).await? {
            return Ok(ScriptOutcome::Absent);
        }

        let module = self.resolver.resolve(path).await?;
        let Some(run) = module.default_export() else {
            tracing::warn!(path, "No default export found in behavior script");
            return Ok(ScriptOutcome::NoDefaultExport);
        };

        let args = ScriptArgs {
            params: params.clone(),
        };
        run(args).await.map_err(|reason| BehaviorError::Invoke {
            path: path.to_string(),
            reason,
        })?;

        tracing::debug!(path, "Ran behavior script");
        Ok(ScriptOutcome::Ran)
    }
}
