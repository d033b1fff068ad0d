//! Match strategies: what the target line looks like and what to do with it
//!
//! Every strategy keeps two pieces of state between lines: whether any line
//! has matched since the last reset, and the most recently seen line, which
//! key/value synthesis copies its indentation from.

mod capture;
mod find_all;
mod key_value;
mod multi_locate;

pub use capture::CaptureStrategy;
pub use find_all::FindAllStrategy;
pub use key_value::{ExpectedValues, KeyValueStrategy};
pub use multi_locate::MultiLocateStrategy;

/// A captured piece of a matched line: its text and byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub text: String,
    pub span: (usize, usize),
}

impl Capture {
    pub(crate) fn from_match(m: regex::Match<'_>) -> Self {
        Self {
            text: m.as_str().to_string(),
            span: (m.start(), m.end()),
        }
    }
}

/// The pluggable rule for the one target line sought inside a block.
pub trait MatchStrategy {
    /// Clears match state and captured results.
    fn reset(&mut self);

    /// Pure test; records nothing.
    fn is_match(&self, line: &str) -> bool;

    /// Records the line as the most recently seen, tests it, and on a match
    /// records captures and returns the possibly rewritten line. A line that
    /// does not match comes back unchanged.
    fn apply(&mut self, line: &str) -> String;

    /// Fabricates a line standing in for the target that never appeared, if
    /// the variant supports that.
    fn synthesize(&self) -> Option<String> {
        None
    }

    /// True once any line has matched since construction or the last reset.
    fn match_found(&self) -> bool;

    /// Captured state from the most recent matching line.
    fn captured(&self) -> &[Capture];
}

/// Match state common to all strategies.
#[derive(Debug, Clone, Default)]
pub struct MatchState {
    match_found: bool,
    previous_line: Option<String>,
}

impl MatchState {
    pub fn record_line(&mut self, line: &str) {
        self.previous_line = Some(line.to_string());
    }

    pub fn record_match(&mut self) {
        self.match_found = true;
    }

    pub fn reset(&mut self) {
        self.match_found = false;
        self.previous_line = None;
    }

    pub fn match_found(&self) -> bool {
        self.match_found
    }

    pub fn previous_line(&self) -> Option<&str> {
        self.previous_line.as_deref()
    }
}
