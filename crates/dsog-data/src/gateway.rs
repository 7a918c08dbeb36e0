//! Outbound request seam.
//!
//! Everything above this layer talks to a [`Gateway`], so tests and offline
//! tools can swap the HTTP client for a scripted one.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::{FetchError, Response};

/// Performs single requests. No retries, no backoff.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// GET `url`.
    async fn get(&self, url: &Url) -> Result<Response, FetchError>;

    /// POST `body` as JSON to `url`.
    async fn post_json(&self, url: &Url, body: &serde_json::Value)
        -> Result<Response, FetchError>;
}

/// [`Gateway`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
}

impl HttpGateway {
    /// Build a client with a per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub fn user_agent() -> &'static str {
        concat!("dsog-storefront/", env!("CARGO_PKG_VERSION"))
    }

    async fn read(response: reqwest::Response) -> Result<Response, FetchError> {
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();
        debug!(status, bytes = body.len(), "response received");
        Ok(Response::new(status, headers, body))
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn get(&self, url: &Url) -> Result<Response, FetchError> {
        let response = self.client.get(url.clone()).send().await?;
        Self::read(response).await
    }

    async fn post_json(
        &self,
        url: &Url,
        body: &serde_json::Value,
    ) -> Result<Response, FetchError> {
        let response = self.client.post(url.clone()).json(body).send().await?;
        Self::read(response).await
    }
}
