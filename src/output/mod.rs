// src/output/mod.rs
// =============================================================================
// This module turns the resource store into a static file tree.
//
// Submodules:
// - filename: URL -> relative path
// - rewrite: URL strings inside documents -> local paths
// - emit: Writes everything to the output directory
// =============================================================================

mod emit;
mod filename;
mod rewrite;

pub use emit::{emit, render_document};
pub use filename::{derive_filename, FilenameMap};
pub use rewrite::rewrite_document;
