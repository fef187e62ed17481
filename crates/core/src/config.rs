//! Host-supplied configuration.
//!
//! The host page exposes the options as `window.$docsify.toc`; field names
//! follow that object's camelCase spelling.

use crate::error::TocError;
use crate::heading::HeadingDescriptor;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Scroll offset (px) past which the back-to-top control is shown.
pub const BACK_TO_TOP_OFFSET: f64 = 300.0;

/// Distance (px) from the bottom of the page treated as "at the bottom".
pub const BOTTOM_THRESHOLD: f64 = 5.0;

pub const DEFAULT_TARGET: &str = "h2, h3, h4, h5, h6";

/// ToC options as written by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TocConfig {
    /// Selector, relative to the main content, for elements treated as headings.
    pub target: String,
    /// Deepest heading level (inclusive) that gets an entry.
    pub toc_max_level: u8,
    /// Regular expressions; a heading whose text matches any of them is skipped.
    pub ignore_headers: Vec<String>,
    /// The ToC is only shown when strictly more entries than this are produced.
    pub no_toc_if_headings_found_is: usize,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            toc_max_level: 6,
            ignore_headers: Vec::new(),
            no_toc_if_headings_found_is: 1,
        }
    }
}

impl TocConfig {
    pub fn from_json(json: &str) -> Result<Self, TocError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the options and compiles the ignore patterns.
    pub fn compile(&self) -> Result<CompiledConfig, TocError> {
        if self.target.trim().is_empty() {
            return Err(TocError::Config("target selector must not be empty".to_string()));
        }

        let ignore = self
            .ignore_headers
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| TocError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.compiled_with(self.target.clone(), ignore))
    }

    /// Like [`compile`](Self::compile), but never fails.
    ///
    /// An empty target falls back to the default selector and an invalid
    /// pattern is matched as literal text.
    pub fn compile_lenient(&self) -> CompiledConfig {
        let target = if self.target.trim().is_empty() {
            log::warn!("Empty ToC target selector; using '{}'", DEFAULT_TARGET);
            DEFAULT_TARGET.to_string()
        } else {
            self.target.clone()
        };

        let ignore = self
            .ignore_headers
            .iter()
            .filter_map(|pattern| match Regex::new(pattern) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    log::warn!(
                        "Invalid ignoreHeaders pattern '{}' ({}); matching it literally",
                        pattern,
                        err
                    );
                    Regex::new(&regex::escape(pattern)).ok()
                }
            })
            .collect();

        self.compiled_with(target, ignore)
    }

    fn compiled_with(&self, target: String, ignore: Vec<Regex>) -> CompiledConfig {
        CompiledConfig {
            target,
            toc_max_level: self.toc_max_level,
            ignore,
            min_headings: self.no_toc_if_headings_found_is,
        }
    }
}

/// Validated configuration, ready for rendering.
#[derive(Debug, Clone)]
pub struct CompiledConfig {
    target: String,
    toc_max_level: u8,
    ignore: Vec<Regex>,
    min_headings: usize,
}

impl Default for CompiledConfig {
    fn default() -> Self {
        TocConfig::default().compile_lenient()
    }
}

impl CompiledConfig {
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn toc_max_level(&self) -> u8 {
        self.toc_max_level
    }

    /// Entry count that must be exceeded for a ToC to be shown.
    pub fn min_headings(&self) -> usize {
        self.min_headings
    }

    /// Whether the heading's text matches any ignore pattern.
    pub fn is_ignored(&self, text: &str) -> bool {
        self.ignore.iter().any(|regex| regex.is_match(text))
    }

    /// Whether a level gets an entry.
    pub fn level_in_range(&self, level: u8) -> bool {
        (1..=self.toc_max_level).contains(&level)
    }

    /// Whether the heading produces a ToC entry.
    ///
    /// Used by both the builder and the scroll tracker, so the n-th included
    /// heading always corresponds to the n-th rendered entry.
    pub fn includes(&self, heading: &HeadingDescriptor) -> bool {
        !self.is_ignored(&heading.text) && heading.level.is_some_and(|l| self.level_in_range(l))
    }
}
