// src/crawl/files.rs
// =============================================================================
// This module downloads files referenced from crawled documents.
//
// After the crawl, every string value inside every stored document is
// tested against a matcher (usually a regex from --file-url-pattern).
// Matching strings are treated as URLs and fetched as raw bytes.
//
// Only documents present when collection starts are scanned. Downloaded
// files are opaque, so they never add new strings to scan.
// =============================================================================

use regex::Regex;
use serde_json::Value;
use tracing::{debug, info};

use super::store::{Resource, ResourceStore};
use crate::error::{MirrorError, Result};
use crate::fetch::Fetcher;

/// Decides whether a string value inside a document is a file reference.
pub trait FileMatcher: Send + Sync {
    fn matches(&self, value: &str) -> bool;
}

impl FileMatcher for Regex {
    fn matches(&self, value: &str) -> bool {
        self.is_match(value)
    }
}

// Collects every string value of a document in natural order
// (object values in key order, array elements in index order)
fn collect_strings<'v>(value: &'v Value, out: &mut Vec<&'v str>) {
    match value {
        Value::String(s) => out.push(s),
        Value::Array(items) => {
            for item in items {
                collect_strings(item, out);
            }
        }
        Value::Object(fields) => {
            for field in fields.values() {
                collect_strings(field, out);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

// Fetches every file referenced by the documents currently in the store
//
// Returns the number of files downloaded.
pub async fn collect_files<F, M>(fetcher: &F, store: &mut ResourceStore, matcher: &M) -> Result<usize>
where
    F: Fetcher + ?Sized,
    M: FileMatcher + ?Sized,
{
    // Snapshot the candidates first; the store grows while we fetch
    let candidates: Vec<String> = {
        let mut strings = Vec::new();
        for (_, document) in store.documents() {
            collect_strings(document, &mut strings);
        }
        strings
            .into_iter()
            .filter(|s| matcher.matches(s))
            .map(str::to_string)
            .collect()
    };

    let mut fetched = 0;
    for url in candidates {
        if store.contains(&url) {
            debug!("Already fetched {}", url);
            continue;
        }

        info!("Fetching file {}", url);
        let bytes = fetcher
            .fetch_bytes(&url)
            .await
            .map_err(|e| MirrorError::fetch_failed(&url, e))?;

        store.insert(url, Resource::File(bytes));
        fetched += 1;
    }

    Ok(fetched)
}
