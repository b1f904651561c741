// src/fetch/http.rs
// =============================================================================
// reqwest-backed implementation of the Fetcher trait.
//
// One Client is built up front and reused for every request, so we get
// connection pooling for free. Any non-2xx status is treated as an error:
// the mirror has no partial-success mode.
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

use super::{FetchError, Fetcher};

/// Fetches resources over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str, accept: Option<&'static str>) -> Result<Response, FetchError> {
        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, HeaderValue::from_static(accept));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self.get(url, Some("application/json")).await?;

        // Decode from bytes ourselves so a bad body surfaces as Decode
        // rather than as an opaque transport error
        let body = response.bytes().await?;
        let document = serde_json::from_slice(&body)?;
        Ok(document)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.get(url, None).await?;
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
