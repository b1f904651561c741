// src/crawl/mod.rs
// =============================================================================
// This module fills the resource store.
//
// Features:
// - Depth-first crawl of `links[].href` and nested `data` items
// - Each URL fetched at most once (the store doubles as visited-set)
// - Optional second pass that downloads file references by pattern
//
// Rust concepts:
// - Owned state passed explicitly: the store is a parameter, not a global
// =============================================================================

mod discover;
mod files;
mod store;

pub use discover::{crawl, discover_links};
pub use files::{collect_files, FileMatcher};
pub use store::{Resource, ResourceStore};
