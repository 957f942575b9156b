//! Fragment fetcher.

use crate::dom::Fragment;
use crate::fetch::client::AssetClient;
use crate::fetch::error::FetchError;
use crate::routing::{substitute, Params};

/// Fetches and parses route fragments.
#[derive(Debug, Clone)]
pub struct FragmentFetcher {
    client: AssetClient,
}

impl FragmentFetcher {
    pub fn new(client: AssetClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AssetClient {
        &self.client
    }

    /// Fetch a layout fragment. `Ok(None)` on confirmed absence.
    pub async fn fetch_fragment(&self, path: &str) -> Result<Option<Fragment>, FetchError> {
        Ok(self
            .client
            .get_text(path)
            .await?
            .map(|html| Fragment::parse(&html)))
    }

    /// Fetch a page fragment, substituting `[name]` tokens from `params`
    /// before parsing.
    pub async fn fetch_page(
        &self,
        path: &str,
        params: &Params,
    ) -> Result<Option<Fragment>, FetchError> {
        Ok(self
            .client
            .get_text(path)
            .await?
            .map(|html| Fragment::parse(&substitute(&html, params))))
    }
}
