//! Mirror a hypermedia JSON API into a static file tree.
//!
//! The pipeline crawls `links[].href` and nested `data` items from a root
//! URL, optionally downloads file references matching a pattern, derives a
//! local filename for every URL, rewrites cross-references inside the JSON
//! documents, and writes everything to an output directory.

pub mod cli;
pub mod config;
pub mod crawl;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod mirror;
pub mod output;

pub use config::MirrorOptions;
pub use error::{MirrorError, Result};
pub use mirror::{run, MirrorSummary};
