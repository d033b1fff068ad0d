//! Capture-group strategy

use crate::pattern::LinePattern;

use super::{Capture, MatchState, MatchStrategy};

/// Records every participating capture group of the target pattern, in
/// group order, with byte spans. The line passes through unchanged.
pub struct CaptureStrategy {
    pattern: LinePattern,
    state: MatchState,
    captures: Vec<Capture>,
}

impl CaptureStrategy {
    pub fn new(pattern: LinePattern) -> Self {
        Self {
            pattern,
            state: MatchState::default(),
            captures: Vec::new(),
        }
    }

    pub fn pattern(&self) -> &LinePattern {
        &self.pattern
    }
}

impl MatchStrategy for CaptureStrategy {
    fn reset(&mut self) {
        self.state.reset();
        self.captures.clear();
    }

    fn is_match(&self, line: &str) -> bool {
        self.pattern.matches(line)
    }

    fn apply(&mut self, line: &str) -> String {
        self.state.record_line(line);
        if let Some(caps) = self.pattern.captures(line) {
            self.state.record_match();
            // Group 0 is the whole match; optional groups that did not
            // participate have no span and are skipped.
            self.captures = caps
                .iter()
                .skip(1)
                .flatten()
                .map(Capture::from_match)
                .collect();
        }
        line.to_string()
    }

    fn match_found(&self) -> bool {
        self.state.match_found()
    }

    fn captured(&self) -> &[Capture] {
        &self.captures
    }
}
