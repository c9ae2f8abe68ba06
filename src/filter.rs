// src/filter.rs
// =============================================================================
// Pattern filters for file paths and line contents.
//
// A filter is a list of regex patterns plus a mode:
// - Include: keep only candidates that match at least one pattern
// - Exclude: drop candidates that match any pattern, keep everything else
// - No patterns at all: keep everything, whatever the mode
//
// Patterns are unanchored (a pattern matches anywhere in the candidate unless
// it uses ^ or $ itself).
//
// Rust concepts:
// - RegexSet: test many patterns against one string in a single pass
// - clap::ValueEnum: lets the CLI accept "include" / "exclude" directly
// =============================================================================

use clap::ValueEnum;
use regex::RegexSet;
use serde::{Deserialize, Serialize};

use crate::error::FilterError;

// Whether matching candidates are kept or dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Keep only what matches
    #[default]
    Include,
    /// Drop what matches
    Exclude,
}

impl FilterMode {
    pub fn keep_matching(self) -> bool {
        matches!(self, FilterMode::Include)
    }
}

// The uncompiled form, as it comes from the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub patterns: Vec<String>,
    pub keep_matching: bool,
}

impl FilterSpec {
    pub fn new(patterns: Vec<String>, mode: FilterMode) -> Self {
        Self {
            patterns,
            keep_matching: mode.keep_matching(),
        }
    }

    // Compiles every pattern once
    //
    // Returns an error naming the first pattern that is not a valid regex
    pub fn compile(&self) -> Result<PatternFilter, FilterError> {
        // Compile one by one first so the error names the bad pattern
        for pattern in &self.patterns {
            regex::Regex::new(pattern).map_err(|source| FilterError {
                pattern: pattern.clone(),
                source,
            })?;
        }
        let set = RegexSet::new(&self.patterns).map_err(|source| FilterError {
            pattern: self.patterns.join(", "),
            source,
        })?;
        Ok(PatternFilter {
            set,
            keep_matching: self.keep_matching,
        })
    }
}

// A compiled filter, built once per run and shared by every resolver
#[derive(Debug, Clone)]
pub struct PatternFilter {
    set: RegexSet,
    keep_matching: bool,
}

impl PatternFilter {
    // A filter that keeps everything
    pub fn allow_all() -> Self {
        Self {
            set: RegexSet::empty(),
            keep_matching: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    // Decides whether a candidate survives
    //
    // The mode acts as an XOR gate on "did any pattern match"
    pub fn keeps(&self, candidate: &str) -> bool {
        if self.set.is_empty() {
            return true;
        }
        self.set.is_match(candidate) == self.keep_matching
    }
}

impl Default for PatternFilter {
    fn default() -> Self {
        Self::allow_all()
    }
}

// Should this file path be included? Compiles the patterns on every call.
pub fn include_file(path: &str, spec: &FilterSpec) -> Result<bool, FilterError> {
    if spec.patterns.is_empty() {
        return Ok(true);
    }
    Ok(spec.compile()?.keeps(path))
}

// Should this line be included? Compiles the patterns on every call.
pub fn include_line(line: &str, spec: &FilterSpec) -> Result<bool, FilterError> {
    if spec.patterns.is_empty() {
        return Ok(true);
    }
    Ok(spec.compile()?.keeps(line))
}
