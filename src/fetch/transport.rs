//! The network seam.

use async_trait::async_trait;
use url::Url;

use crate::fetch::error::FetchError;

/// Status and body of a GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// Empty unless the status is a success.
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }
}

/// 2xx
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Something that can GET and HEAD URLs.
///
/// Any response, whatever its status, is `Ok`; `Err` is reserved for
/// failures where no status was obtained.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn get(&self, url: &Url) -> Result<TransportResponse, FetchError>;

    /// Metadata-only request; returns the status.
    async fn head(&self, url: &Url) -> Result<u16, FetchError>;
}
