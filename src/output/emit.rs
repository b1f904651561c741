// src/output/emit.rs
// =============================================================================
// Writes the resource store to disk.
//
// One file per stored URL, in store order:
// - JSON documents are rewritten, then pretty-printed with four-space
//   indentation (slashes and non-ASCII characters are left as-is)
// - Files are written byte-for-byte
// Parent directories are created as needed.
// =============================================================================

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::filename::FilenameMap;
use super::rewrite::rewrite_document;
use crate::crawl::{Resource, ResourceStore};
use crate::error::{MirrorError, Result};

const INDENT: &[u8] = b"    ";

// Serializes a document the way it ends up on disk
pub fn render_document(url: &str, document: &Value) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = Serializer::with_formatter(&mut out, formatter);

    document
        .serialize(&mut serializer)
        .map_err(|source| MirrorError::SerializationFailed {
            url: url.to_string(),
            source,
        })?;

    Ok(out)
}

/// Writes every resource under `output_dir` and returns the written paths.
pub fn emit(
    store: &ResourceStore,
    filenames: &FilenameMap,
    base_url: &str,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(store.len());

    for (url, resource) in store.iter() {
        // FilenameMap::build covers every key of the store
        let Some(filename) = filenames.get(url) else {
            return Err(MirrorError::InvalidUrl {
                url: url.to_string(),
                reason: "no output filename derived".to_string(),
            });
        };
        let target = output_dir.join(filename);

        let contents = match resource {
            Resource::Document(document) => {
                let rewritten = rewrite_document(document, filenames, base_url);
                render_document(url, &rewritten)?
            }
            Resource::File(bytes) => bytes.clone(),
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| MirrorError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        info!("Dumping content from {} to file {}", url, target.display());
        fs::write(&target, contents).map_err(|source| MirrorError::Write {
            path: target.clone(),
            source,
        })?;

        written.push(target);
    }

    Ok(written)
}
