// src/mirror.rs
// =============================================================================
// The full mirroring pipeline, one phase after another:
//
// 1. Crawl the API from the root URL into the resource store
// 2. Optionally download file references matching the pattern
// 3. Derive a filename for every stored URL (plus the root override)
// 4. Rewrite and write every resource to the output directory
//
// Nothing touches the disk before step 4, so a failed fetch leaves no
// partial output behind.
// =============================================================================

use std::path::PathBuf;
use tracing::info;

use crate::config::MirrorOptions;
use crate::crawl::{self, ResourceStore};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::output::{self, FilenameMap};

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct MirrorSummary {
    /// JSON documents fetched while crawling
    pub documents: usize,
    /// Files fetched by the collection pass
    pub files: usize,
    /// Every path written, in write order
    pub written: Vec<PathBuf>,
}

pub async fn run<F>(fetcher: &F, options: &MirrorOptions) -> Result<MirrorSummary>
where
    F: Fetcher + ?Sized,
{
    let mut store = ResourceStore::new();

    crawl::crawl(fetcher, &mut store, &options.api_url).await?;
    let documents = store.len();
    info!("Crawled {} document(s)", documents);

    let files = match &options.file_pattern {
        Some(pattern) => crawl::collect_files(fetcher, &mut store, pattern).await?,
        None => 0,
    };

    let root_override = options
        .output_filename
        .as_deref()
        .map(|filename| (options.api_url.as_str(), filename));
    let filenames = FilenameMap::build(&store, root_override)?;

    let written = output::emit(
        &store,
        &filenames,
        &options.base_url,
        &options.output_directory,
    )?;

    Ok(MirrorSummary {
        documents,
        files,
        written,
    })
}
