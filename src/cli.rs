// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The CLI is the "input source / output sink" for the pipeline: it collects
// reference lines (arguments and/or a file), the two filters, and the GitHub
// connection settings, and turns them into the types the library expects.
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] generates the parsing code
// - env fallbacks: --token reads GITHUB_TOKEN when the flag is absent
// =============================================================================

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{Config, DEFAULT_API_BASE, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};
use crate::filter::{FilterMode, FilterSpec};
use crate::input::split_input_lines;

#[derive(Parser, Debug)]
#[command(
    name = "codestitch",
    version,
    about = "Stitch GitHub repos, paths, files, pull requests and issues into one text document",
    long_about = "codestitch takes a list of GitHub references (one per line) and produces a single \
                  document with all of their content, optionally filtered by file path and by line. \
                  Failures are reported inline; the run never stops at the first error.\n\n\
                  Accepted references:\n  \
                  github.com/<owner>/<repo>\n  \
                  github.com/<owner>/<repo>/tree/<branch>[/<path>]\n  \
                  github.com/<owner>/<repo>/blob/<branch>/<path>\n  \
                  github.com/<owner>/<repo>/pull/<n>\n  \
                  github.com/<owner>/<repo>/issues/<n>\n  \
                  regex:<pattern>   (recognized, not searched)"
)]
pub struct Cli {
    /// GitHub references to stitch, in order
    ///
    /// Example: codestitch github.com/rust-lang/log/blob/master/README.md
    #[arg(value_name = "REFERENCE")]
    pub references: Vec<String>,

    /// Read more references from a file, one per line ("-" for stdin)
    #[arg(short = 'i', long, value_name = "PATH")]
    pub input_file: Option<PathBuf>,

    /// Regex applied to file paths (repeatable)
    #[arg(long = "file-pattern", value_name = "REGEX")]
    pub file_patterns: Vec<String>,

    /// Keep (include) or drop (exclude) files whose path matches
    #[arg(long, value_enum, default_value_t = FilterMode::Include)]
    pub file_mode: FilterMode,

    /// Regex applied to each line of file content (repeatable)
    #[arg(long = "line-pattern", value_name = "REGEX")]
    pub line_patterns: Vec<String>,

    /// Keep (include) or drop (exclude) lines that match
    #[arg(long, value_enum, default_value_t = FilterMode::Include)]
    pub line_mode: FilterMode,

    /// Write the document to this file instead of stdout (e.g. stitched_content.md)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the result as JSON ({document, had_errors, cancelled})
    #[arg(long)]
    pub json: bool,

    /// GitHub token; sent as "Authorization: token <TOKEN>"
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API base URL (or a proxy that mirrors its paths)
    #[arg(long, env = "CODESTITCH_API_URL", default_value = DEFAULT_API_BASE)]
    pub api_url: String,

    /// Per-request timeout in seconds (at least 1)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// How many references are resolved at the same time
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Don't print progress or the summary to stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose logging (same as RUST_LOG=codestitch=debug)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            timeout: Duration::from_secs(self.timeout_secs),
            concurrency: self.concurrency.max(1),
            ..Config::default()
        }
        .with_api_base(self.api_url.clone())
        .with_token(self.token.clone())
    }

    pub fn file_filter(&self) -> FilterSpec {
        FilterSpec::new(self.file_patterns.clone(), self.file_mode)
    }

    pub fn line_filter(&self) -> FilterSpec {
        FilterSpec::new(self.line_patterns.clone(), self.line_mode)
    }

    // Positional references first, then the lines of --input-file
    pub fn read_inputs(&self) -> Result<Vec<String>> {
        let mut inputs = split_input_lines(&self.references.join("\n"));

        if let Some(path) = &self.input_file {
            let text = if path.as_os_str() == "-" {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read references from stdin")?;
                text
            } else {
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read input file {}", path.display()))?
            };
            inputs.extend(split_input_lines(&text));
        }

        Ok(inputs)
    }
}
