// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// The whole CLI: one root URL plus options for where and how to write
#[derive(Parser, Debug)]
#[command(
    name = "api-mirror",
    version,
    about = "Mirror a hypermedia JSON API into a static file tree",
    long_about = "api-mirror fetches a JSON API document, follows every `links[].href` and nested \
                  `data` item it finds, optionally downloads referenced files, and writes \
                  everything to disk with cross-references rewritten to local paths."
)]
pub struct Cli {
    /// The API URL to fetch (e.g., https://api.example.com/items?page=1)
    pub api_url: String,

    /// Directory the mirror is written to
    #[arg(long, default_value = ".")]
    pub output_directory: PathBuf,

    /// Filename for the root document (relative to the output directory)
    ///
    /// Without it the root gets a name derived from its URL like every
    /// other resource.
    #[arg(long)]
    pub output_filename: Option<String>,

    /// Base URL prepended to rewritten references
    ///
    /// Example: --base-url https://static.example.org/api
    #[arg(long)]
    pub base_url: Option<String>,

    /// Download string values matching this regular expression as files
    ///
    /// Accepts a plain regex (\.png$) or a delimited one (/\.png$/i).
    #[arg(long)]
    pub file_url_pattern: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Log every skipped duplicate as well as progress
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["api-mirror", "https://api.example.com"]).unwrap();
        assert_eq!(cli.api_url, "https://api.example.com");
        assert_eq!(cli.output_directory, PathBuf::from("."));
        assert_eq!(cli.output_filename, None);
        assert_eq!(cli.base_url, None);
        assert_eq!(cli.file_url_pattern, None);
        assert_eq!(cli.timeout, 30);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from([
            "api-mirror",
            "https://api.example.com",
            "--output-directory",
            "out",
            "--output-filename",
            "index.json",
            "--base-url",
            "https://static.example.org/",
            "--file-url-pattern",
            r"/\.png$/",
            "--timeout",
            "5",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.output_directory, PathBuf::from("out"));
        assert_eq!(cli.output_filename.as_deref(), Some("index.json"));
        assert_eq!(cli.base_url.as_deref(), Some("https://static.example.org/"));
        assert_eq!(cli.file_url_pattern.as_deref(), Some(r"/\.png$/"));
        assert_eq!(cli.timeout, 5);
        assert!(cli.verbose);
    }

    #[test]
    fn test_url_is_required() {
        assert!(Cli::try_parse_from(["api-mirror"]).is_err());
    }
}
