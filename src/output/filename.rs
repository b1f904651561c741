// src/output/filename.rs
// =============================================================================
// This module turns URLs into relative file paths for the mirror.
//
// Algorithm:
// 1. Take the URL path exactly as written (no percent-encoding, no dot
//    segment removal) without its leading slashes
// 2. Append "?" + the raw query, if there is one; the fragment is dropped
// 3. Replace every character outside [A-Za-z0-9_/] with '@'
// 4. Names longer than 100 characters are cut to 100 and suffixed with
//    "-" + the SHA-1 of the full sanitized name, so they stay unique
// 5. Add ".png" / ".jpg" when the URL path has that extension,
//    ".json" otherwise
//
// Example:
//   https://api.example.com/items?page=1  ->  items@page@1.json
//   https://cdn.example.com/img/a.png     ->  img/a.png
// =============================================================================

use sha1::{Digest, Sha1};
use std::collections::HashMap;
use std::path::{Component, Path};
use url::Url;

use crate::crawl::ResourceStore;
use crate::error::{MirrorError, Result};

/// Replacement for characters that are not safe in a file name.
pub const PLACEHOLDER: char = '@';

/// Sanitized names longer than this are truncated and hashed.
pub const MAX_NAME_LEN: usize = 100;

const ALLOWED_EXTENSIONS: [&str; 2] = ["png", "jpg"];
const DEFAULT_EXTENSION: &str = "json";

/// Derives the relative output path for `url`.
///
/// Pure and deterministic. Fails with [`MirrorError::InvalidUrl`] when the
/// URL cannot be parsed.
pub fn derive_filename(url: &str) -> Result<String> {
    // Parsing only validates; the url crate normalizes paths, and two
    // distinct store keys must not collapse into one name
    Url::parse(url).map_err(|e| MirrorError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let (path, query) = raw_path_and_query(url);
    let path = path.trim_start_matches('/');
    let extension = extension_of(path).filter(|ext| ALLOWED_EXTENSIONS.contains(ext));

    // A kept extension is re-added after sanitizing, so drop it here
    // rather than turning "a.png" into "a@png.png"
    let mut name = match extension {
        Some(ext) => path[..path.len() - ext.len() - 1].to_string(),
        None => path.to_string(),
    };
    if let Some(query) = query {
        name.push('?');
        name.push_str(query);
    }

    let mut name = sanitize(&name);
    if name.len() > MAX_NAME_LEN {
        let digest = hex::encode(Sha1::digest(name.as_bytes()));
        // Sanitized names are pure ASCII, so byte slicing is safe
        name = format!("{}-{}", &name[..MAX_NAME_LEN], digest);
    }

    name.push('.');
    name.push_str(extension.unwrap_or(DEFAULT_EXTENSION));
    Ok(name)
}

// Splits an already validated URL into its path and query, as written
//
// "https://h/a/../b?q=a b#top" -> ("/a/../b", Some("q=a b"))
fn raw_path_and_query(url: &str) -> (&str, Option<&str>) {
    let url = url.split_once('#').map_or(url, |(head, _)| head);

    let rest = match url.find("://") {
        Some(index) => {
            let after_scheme = &url[index + 3..];
            let authority_end = after_scheme
                .find(|c: char| c == '/' || c == '?')
                .unwrap_or(after_scheme.len());
            &after_scheme[authority_end..]
        }
        // Opaque URLs such as "urn:x:y" have no authority
        None => url.split_once(':').map_or(url, |(_, tail)| tail),
    };

    match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    }
}

fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '/' {
                c
            } else {
                PLACEHOLDER
            }
        })
        .collect()
}

// Extension of the last path segment, if any
fn extension_of(path: &str) -> Option<&str> {
    let segment = path.rsplit('/').next()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}

// Keeps a user supplied filename inside the output directory by dropping
// root, drive and ".." components: "/srv/www/index.json" -> "srv/www/index.json"
fn relative_filename(filename: &str) -> String {
    Path::new(filename)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::CurDir
            | Component::ParentDir
            | Component::RootDir
            | Component::Prefix(_) => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// URL to relative output path, for every resource in a store.
#[derive(Debug, Clone, Default)]
pub struct FilenameMap {
    names: HashMap<String, String>,
}

impl FilenameMap {
    /// Derives a filename for every URL in `store`.
    ///
    /// `root_override` replaces the derived name of a single URL (the
    /// root document when --output-filename is given).
    pub fn build(store: &ResourceStore, root_override: Option<(&str, &str)>) -> Result<Self> {
        let mut names = HashMap::with_capacity(store.len());
        for url in store.urls() {
            names.insert(url.to_string(), derive_filename(url)?);
        }

        if let Some((url, filename)) = root_override {
            names.insert(url.to_string(), relative_filename(filename));
        }

        Ok(Self { names })
    }

    pub fn get(&self, url: &str) -> Option<&str> {
        self.names.get(url).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::Resource;
    use serde_json::json;

    #[test]
    fn test_path_and_query() {
        assert_eq!(
            derive_filename("https://api.example.com/items?page=1").unwrap(),
            "items@page@1.json"
        );
        assert_eq!(
            derive_filename("https://api.example.com/items/1").unwrap(),
            "items/1.json"
        );
    }

    #[test]
    fn test_deterministic() {
        let url = "https://api.example.com/a-b/c?x=1&y=2";
        assert_eq!(derive_filename(url).unwrap(), derive_filename(url).unwrap());
    }

    #[test]
    fn test_allowed_extensions_are_kept() {
        // Deliberately different from the PHP tool, whose allow-list lookup
        // never matched and so named every file ".json"
        assert_eq!(derive_filename("https://cdn.example.com/a.png").unwrap(), "a.png");
        assert_eq!(
            derive_filename("https://cdn.example.com/img/photo.jpg?v=2").unwrap(),
            "img/photo@v@2.jpg"
        );
    }

    #[test]
    fn test_other_extensions_become_json() {
        // Only png and jpg survive; everything else is stored as .json
        assert_eq!(
            derive_filename("https://cdn.example.com/doc.pdf").unwrap(),
            "doc@pdf.json"
        );
        assert_eq!(
            derive_filename("https://cdn.example.com/a.PNG").unwrap(),
            "a@PNG.json"
        );
        // The query never provides the extension
        assert_eq!(
            derive_filename("https://cdn.example.com/img?f=a.png").unwrap(),
            "img@f@a@png.json"
        );
    }

    #[test]
    fn test_no_prohibited_characters() {
        let name = derive_filename("https://api.example.com/ä ö/~x;y?q=ü&z=%20").unwrap();
        let stem = name.strip_suffix(".json").unwrap();
        assert!(stem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '/' || c == PLACEHOLDER));
    }

    #[test]
    fn test_long_names_are_truncated_and_hashed() {
        let long = format!("https://api.example.com/{}", "a".repeat(150));
        let name = derive_filename(&long).unwrap();
        let stem = name.strip_suffix(".json").unwrap();

        assert_eq!(stem.len(), MAX_NAME_LEN + 1 + 40);
        assert!(stem.starts_with(&"a".repeat(MAX_NAME_LEN)));
        assert_eq!(&stem[MAX_NAME_LEN..MAX_NAME_LEN + 1], "-");

        let expected = hex::encode(Sha1::digest("a".repeat(150).as_bytes()));
        assert!(stem.ends_with(&expected));
    }

    #[test]
    fn test_truncation_keeps_names_distinct() {
        let base = "x".repeat(120);
        let a = derive_filename(&format!("https://h/{base}?a=1")).unwrap();
        let b = derive_filename(&format!("https://h/{base}?a=2")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_exactly_max_length_is_untouched() {
        let url = format!("https://h/{}", "b".repeat(MAX_NAME_LEN));
        assert_eq!(
            derive_filename(&url).unwrap(),
            format!("{}.json", "b".repeat(MAX_NAME_LEN))
        );
    }

    #[test]
    fn test_raw_query_is_not_reencoded() {
        assert_eq!(
            derive_filename("https://api.example.com/items?q=a b").unwrap(),
            "items@q@a@b.json"
        );
        assert_eq!(
            derive_filename("https://api.example.com/grüße").unwrap(),
            "gr@@e.json"
        );
    }

    #[test]
    fn test_dot_segments_are_kept() {
        let dotted = derive_filename("https://h/a/../b").unwrap();
        let plain = derive_filename("https://h/b").unwrap();

        assert_eq!(dotted, "a/@@/b.json");
        assert_ne!(dotted, plain);
    }

    #[test]
    fn test_fragment_and_authority_are_ignored() {
        assert_eq!(
            derive_filename("https://user:pw@api.example.com:8443/items/1?x=1#top").unwrap(),
            "items/1@x@1.json"
        );
        assert_eq!(derive_filename("https://api.example.com?page=2").unwrap(), "@page@2.json");
    }

    #[test]
    fn test_invalid_url() {
        let err = derive_filename("not a url").unwrap_err();
        assert!(matches!(err, MirrorError::InvalidUrl { ref url, .. } if url == "not a url"));
    }

    #[test]
    fn test_map_covers_store_and_applies_override() {
        let mut store = ResourceStore::new();
        store.insert("https://api.example.com/", Resource::Document(json!({})));
        store.insert("https://api.example.com/items/1", Resource::Document(json!({})));

        let map = FilenameMap::build(
            &store,
            Some(("https://api.example.com/", "index.json")),
        )
        .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("https://api.example.com/"), Some("index.json"));
        assert_eq!(map.get("https://api.example.com/items/1"), Some("items/1.json"));
        assert_eq!(map.get("https://elsewhere"), None);
    }

    #[test]
    fn test_override_stays_relative() {
        let mut store = ResourceStore::new();
        store.insert("https://api.example.com/", Resource::Document(json!({})));

        let map = FilenameMap::build(
            &store,
            Some(("https://api.example.com/", "/srv/../www/./index.json")),
        )
        .unwrap();

        assert_eq!(map.get("https://api.example.com/"), Some("srv/www/index.json"));
    }

    #[test]
    fn test_map_fails_on_invalid_key() {
        let mut store = ResourceStore::new();
        store.insert("relative/path.png", Resource::File(vec![]));

        assert!(FilenameMap::build(&store, None).is_err());
    }
}
