//! `reqwest`-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::config::HttpConfig;
use crate::fetch::error::FetchError;
use crate::fetch::transport::{Transport, TransportResponse};

/// Production transport over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a client from configuration.
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn transport_error(url: &Url, err: reqwest::Error) -> FetchError {
    FetchError::Transport {
        url: url.to_string(),
        reason: err.to_string(),
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse, FetchError> {
        let res = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let status = res.status();
        if !status.is_success() {
            return Ok(TransportResponse {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let body = res.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(TransportResponse {
            status: status.as_u16(),
            body,
        })
    }

    async fn head(&self, url: &Url) -> Result<u16, FetchError> {
        let res = self
            .client
            .head(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;
        Ok(res.status().as_u16())
    }
}
