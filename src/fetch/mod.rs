// src/fetch/mod.rs
// =============================================================================
// This module is the transport capability of the mirror.
//
// The crawler never talks to reqwest directly. It asks a `Fetcher` for
// either a decoded JSON document or the raw bytes behind a URL. The real
// implementation lives in http.rs; tests plug in an in-memory fetcher.
//
// Rust concepts:
// - Traits: Describe a capability without fixing the implementation
// - async-trait: Async methods on traits (boxed futures under the hood)
// =============================================================================

mod http;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use http::HttpFetcher;

/// Why a single request failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status
    #[error("HTTP {0}")]
    Status(u16),

    /// Connection, TLS, timeout or body read failure
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The body of a document request was not valid JSON
    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// No response is known for this URL (used by in-memory fetchers)
    #[error("no such resource")]
    NotFound,
}

/// Retrieves resources by URL.
///
/// `fetch_json` is used while crawling, `fetch_bytes` while collecting
/// file references. Both are called at most once per URL per run.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
