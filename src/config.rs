// src/config.rs
// =============================================================================
// Validated run options, built from the parsed command line.
//
// Everything that can be rejected without touching the network is checked
// here: the root URL must parse and the file pattern must compile.
// =============================================================================

use regex::Regex;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::cli::Cli;
use crate::error::{MirrorError, Result};

// Flags of a delimited pattern that have an inline (?flags) equivalent
const INLINE_FLAGS: &str = "imsx";

/// Options for one mirror run.
#[derive(Debug, Clone)]
pub struct MirrorOptions {
    pub api_url: String,
    pub output_directory: PathBuf,
    /// Replaces the derived filename of `api_url`
    pub output_filename: Option<String>,
    /// Prefix for rewritten references, without trailing slash ("" = none)
    pub base_url: String,
    /// Enables the file collection pass
    pub file_pattern: Option<Regex>,
    pub timeout: Duration,
}

impl MirrorOptions {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        Url::parse(&cli.api_url).map_err(|e| MirrorError::InvalidUrl {
            url: cli.api_url.clone(),
            reason: e.to_string(),
        })?;

        let file_pattern = cli
            .file_url_pattern
            .as_deref()
            .map(compile_file_pattern)
            .transpose()?;

        Ok(Self {
            api_url: cli.api_url,
            output_directory: cli.output_directory,
            output_filename: cli.output_filename,
            base_url: normalize_base_url(cli.base_url.as_deref()),
            file_pattern,
            timeout: Duration::from_secs(cli.timeout),
        })
    }
}

pub fn normalize_base_url(base_url: Option<&str>) -> String {
    base_url.unwrap_or_default().trim_end_matches('/').to_string()
}

/// Compiles a file URL pattern.
///
/// Both plain patterns (`\.png$`) and delimited ones (`/\.png$/i`,
/// `#\.jpg$#`) are accepted. Delimiter flags `i`, `m`, `s` and `x` become an
/// inline flag group; anything else makes the input a plain pattern.
pub fn compile_file_pattern(pattern: &str) -> Result<Regex> {
    let source = match split_delimited(pattern) {
        Some((body, "")) => body.to_string(),
        Some((body, flags)) => format!("(?{flags}){body}"),
        None => pattern.to_string(),
    };

    Regex::new(&source).map_err(|source| MirrorError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn split_delimited(pattern: &str) -> Option<(&str, &str)> {
    let delimiter = pattern.chars().next().filter(|c| matches!(*c, '/' | '#' | '~'))?;
    let rest = &pattern[delimiter.len_utf8()..];
    let end = rest.rfind(delimiter)?;
    let (body, flags) = (&rest[..end], &rest[end + delimiter.len_utf8()..]);

    if flags.chars().all(|c| INLINE_FLAGS.contains(c)) {
        Some((body, flags))
    } else {
        None
    }
}
