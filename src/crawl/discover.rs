// src/crawl/discover.rs
// =============================================================================
// This module implements the hypermedia crawl, depth-first.
//
// How it works:
// 1. Skip the URL if it is already in the store (dedup + cycle breaking)
// 2. Fetch it as JSON and store it
// 3. Collect every `links[].href` of the document, then of each item
//    nested under `data`, recursively, in document order
// 4. Crawl each collected href completely before moving to the next one
//
// Discovery is purely structural: any object with `links` or `data` is an
// item, at any depth reachable through `data`.
//
// Rust concepts:
// - serde_json::Value: Tagged JSON tree (Object vs Array is explicit)
// - BoxFuture: Async recursion needs a boxed future of known size
// =============================================================================

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use tracing::{debug, info};

use super::store::{Resource, ResourceStore};
use crate::error::{MirrorError, Result};
use crate::fetch::Fetcher;

// Returns the hrefs an item declares, in the order the crawler visits them
//
// Example:
//   {"links": [{"href": "a"}], "data": [{"links": [{"href": "b"}]}]}
//   -> ["a", "b"]
pub fn discover_links(item: &Value) -> Vec<String> {
    let mut found = Vec::new();
    collect_item_links(item, &mut found);
    found
}

fn collect_item_links(item: &Value, found: &mut Vec<String>) {
    // Scalars and bare arrays are not items
    let Value::Object(fields) = item else {
        return;
    };

    match fields.get("links") {
        Some(Value::Array(links)) => {
            found.extend(links.iter().filter_map(href_of));
        }
        // Some APIs key their links by relation ("self", "next", ...)
        Some(Value::Object(links)) => {
            found.extend(links.values().filter_map(href_of));
        }
        _ => {}
    }

    match fields.get("data") {
        Some(single @ Value::Object(_)) => collect_item_links(single, found),
        Some(Value::Array(children)) => {
            for child in children {
                collect_item_links(child, found);
            }
        }
        _ => {}
    }
}

fn href_of(link: &Value) -> Option<String> {
    link.get("href").and_then(Value::as_str).map(str::to_string)
}

// Crawls the hypermedia graph reachable from `root_url`
//
// Every new URL is fetched exactly once and stored before its own links
// are followed. A failed fetch anywhere aborts the whole crawl.
pub async fn crawl<F>(fetcher: &F, store: &mut ResourceStore, root_url: &str) -> Result<()>
where
    F: Fetcher + ?Sized,
{
    visit(fetcher, store, root_url.to_string()).await
}

fn visit<'a, F>(
    fetcher: &'a F,
    store: &'a mut ResourceStore,
    url: String,
) -> BoxFuture<'a, Result<()>>
where
    F: Fetcher + ?Sized,
{
    async move {
        if store.contains(&url) {
            debug!("Already fetched {}", url);
            return Ok(());
        }

        info!("Fetching data from {}", url);
        let document = fetcher
            .fetch_json(&url)
            .await
            .map_err(|e| MirrorError::fetch_failed(&url, e))?;

        let links = discover_links(&document);
        store.insert(url, Resource::Document(document));

        for link in links {
            visit(fetcher, &mut *store, link).await?;
        }

        Ok(())
    }
    .boxed()
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why collect the hrefs before crawling them?
//    - Crawling needs `&mut store`, so we cannot hold a borrow of the
//      stored document while we recurse
//    - The list of hrefs of a document never changes, so visiting them one
//      by one gives the same depth-first order as walking the document live
//
// 2. Why BoxFuture?
//    - An async fn that calls itself would have an infinitely sized future
//    - Boxing the recursive step gives it a fixed size
// -----------------------------------------------------------------------------
