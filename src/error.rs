// src/error.rs
// =============================================================================
// Error types for the mirroring engine.
//
// Every variant is fatal: the run stops and main prints the message.
// Nothing is written to disk before the emit phase, so an error during
// crawling or file collection leaves no output behind.
//
// Rust concepts:
// - thiserror: Derives Display and Error for our enum
// - #[source]: Keeps the underlying error so anyhow can print the chain
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

use crate::fetch::FetchError;

/// Errors raised while crawling, collecting, rewriting or writing resources.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// A URL could not be parsed into path and query
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The transport failed or the server answered with a non-success status
    #[error("failed to fetch {url}")]
    FetchFailed {
        url: String,
        #[source]
        source: FetchError,
    },

    /// A rewritten document could not be encoded as JSON
    #[error("failed to serialize document from {url}")]
    SerializationFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Creating a directory or writing a file failed
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file URL pattern is not a valid regular expression
    #[error("invalid file URL pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl MirrorError {
    /// Wraps a transport error with the URL that was being fetched.
    pub fn fetch_failed(url: &str, source: FetchError) -> Self {
        MirrorError::FetchFailed {
            url: url.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, MirrorError>;
