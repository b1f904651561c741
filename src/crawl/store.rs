// src/crawl/store.rs
// =============================================================================
// The resource store: every URL we have fetched, in discovery order.
//
// The store is both the download cache and the visited-set. An entry is
// added once and never replaced or removed, so "is this URL in the
// store?" is the only dedup check the crawler needs.
//
// Rust concepts:
// - IndexMap: Like HashMap, but iteration follows insertion order
// - Enums with data: A resource is either a JSON document or raw bytes
// =============================================================================

use indexmap::IndexMap;
use serde_json::Value;

/// Content fetched for a single URL.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    /// A decoded JSON document (crawled via links/data)
    Document(Value),
    /// Opaque bytes (file references such as images)
    File(Vec<u8>),
}

impl Resource {
    pub fn as_document(&self) -> Option<&Value> {
        match self {
            Resource::Document(value) => Some(value),
            Resource::File(_) => None,
        }
    }
}

/// Insertion-ordered map from URL to fetched content.
#[derive(Debug, Default)]
pub struct ResourceStore {
    entries: IndexMap<String, Resource>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn get(&self, url: &str) -> Option<&Resource> {
        self.entries.get(url)
    }

    /// Stores `resource` under `url` unless the URL is already present.
    ///
    /// Returns `false` (and drops `resource`) when the URL was already
    /// stored; the first entry always wins.
    pub fn insert(&mut self, url: impl Into<String>, resource: Resource) -> bool {
        match self.entries.entry(url.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(resource);
                true
            }
        }
    }

    /// Iterates `(url, resource)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Resource)> {
        self.entries.iter().map(|(url, resource)| (url.as_str(), resource))
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates only the JSON documents, in insertion order.
    pub fn documents(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.iter()
            .filter_map(|(url, resource)| resource.as_document().map(|doc| (url, doc)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_insert_wins() {
        let mut store = ResourceStore::new();
        assert!(store.insert("https://a", Resource::Document(json!({"v": 1}))));
        assert!(!store.insert("https://a", Resource::Document(json!({"v": 2}))));

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("https://a"),
            Some(&Resource::Document(json!({"v": 1})))
        );
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut store = ResourceStore::new();
        store.insert("https://z", Resource::Document(json!({})));
        store.insert("https://a", Resource::File(vec![1, 2]));
        store.insert("https://m", Resource::Document(json!([])));

        let urls: Vec<_> = store.urls().collect();
        assert_eq!(urls, vec!["https://z", "https://a", "https://m"]);

        let docs: Vec<_> = store.documents().map(|(url, _)| url).collect();
        assert_eq!(docs, vec!["https://z", "https://m"]);
    }
}
