//! Find-all strategy

use crate::pattern::LinePattern;

use super::{Capture, MatchState, MatchStrategy};

/// Records every non-overlapping occurrence of the target pattern anywhere
/// in the line, from a single scan. The line passes through unchanged.
pub struct FindAllStrategy {
    pattern: LinePattern,
    state: MatchState,
    captures: Vec<Capture>,
}

impl FindAllStrategy {
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

impl MatchStrategy for FindAllStrategy {
    fn reset(&mut self) {
        self.state.reset();
        self.captures.clear();
    }

    fn is_match(&self, line: &str) -> bool {
        self.pattern.find_iter(line).next().is_some()
    }

    fn apply(&mut self, line: &str) -> String {
        self.state.record_line(line);
        let found: Vec<Capture> = self
            .pattern
            .find_iter(line)
            .map(Capture::from_match)
            .collect();
        if !found.is_empty() {
            self.state.record_match();
            self.captures = found;
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
