//! Compiled line patterns

use regex::{Regex, RegexBuilder};

use crate::{Error, Result};

/// A pattern compiled for both line-start matching and whole-line search.
///
/// Opening, closing, and target patterns apply anchored at the start of the
/// line; occurrence scans look anywhere in it. Both forms are compiled up
/// front, which keeps strategy and matcher constructors infallible and
/// surfaces a bad pattern exactly once, with its source text.
#[derive(Debug, Clone)]
pub struct LinePattern {
    source: String,
    anchored: Regex,
    search: Regex,
    case_insensitive: bool,
}

impl LinePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_case(pattern, false)
    }

    pub fn case_insensitive(pattern: &str) -> Result<Self> {
        Self::with_case(pattern, true)
    }

    pub fn with_case(pattern: &str, case_insensitive: bool) -> Result<Self> {
        let anchored = RegexBuilder::new(&format!("^(?:{pattern})"))
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| Error::pattern(pattern, e))?;
        let search = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| Error::pattern(pattern, e))?;
        Ok(Self {
            source: pattern.to_string(),
            anchored,
            search,
            case_insensitive,
        })
    }

    /// The pattern text as given, without the added anchor.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// True if the pattern matches at the start of `line`.
    pub fn matches(&self, line: &str) -> bool {
        self.anchored.is_match(line)
    }

    /// Capture groups from a match at the start of `line`, if any.
    pub fn captures<'t>(&self, line: &'t str) -> Option<regex::Captures<'t>> {
        self.anchored.captures(line)
    }

    /// Non-overlapping occurrences anywhere in `line`.
    pub fn find_iter<'r, 't>(&'r self, line: &'t str) -> regex::Matches<'r, 't> {
        self.search.find_iter(line)
    }
}
