//! Multi-occurrence locate strategy

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::pattern::LinePattern;

use super::{Capture, MatchState, MatchStrategy};

/// Locates every occurrence of a repeated target.
///
/// A single regex cannot group "the same pattern, N times" when N varies by
/// line. This strategy counts occurrences first, derives a secondary pattern
/// sized to that count (`.*` then pattern + `.*` per occurrence), and
/// records the derived match's capture groups in sequence. When the derived
/// match yields no groups (a target with none of its own, or a secondary
/// pattern that fails to compile), the plain occurrence spans are recorded
/// instead. The line passes through unchanged.
pub struct MultiLocateStrategy {
    pattern: LinePattern,
    state: MatchState,
    captures: Vec<Capture>,
    // Derived pattern cache, keyed by occurrence count.
    derived: Option<(usize, Regex)>,
}

impl MultiLocateStrategy {
    pub fn new(pattern: LinePattern) -> Self {
        Self {
            pattern,
            state: MatchState::default(),
            captures: Vec::new(),
            derived: None,
        }
    }

    pub fn pattern(&self) -> &LinePattern {
        &self.pattern
    }

    fn derived_pattern(&mut self, count: usize) -> Option<&Regex> {
        if self.derived.as_ref().map(|(n, _)| *n) != Some(count) {
            let mut source = String::from(".*");
            for _ in 0..count {
                source.push_str(self.pattern.source());
                source.push_str(".*");
            }
            match RegexBuilder::new(&source)
                .case_insensitive(self.pattern.is_case_insensitive())
                .build()
            {
                Ok(regex) => self.derived = Some((count, regex)),
                Err(error) => {
                    warn!(%error, count, "derived locate pattern failed to compile");
                    self.derived = None;
                }
            }
        }
        self.derived.as_ref().map(|(_, regex)| regex)
    }
}

impl MatchStrategy for MultiLocateStrategy {
    fn reset(&mut self) {
        self.state.reset();
        self.captures.clear();
    }

    fn is_match(&self, line: &str) -> bool {
        self.pattern.find_iter(line).next().is_some()
    }

    fn apply(&mut self, line: &str) -> String {
        self.state.record_line(line);
        let occurrences: Vec<Capture> = self
            .pattern
            .find_iter(line)
            .map(Capture::from_match)
            .collect();
        if occurrences.is_empty() {
            return line.to_string();
        }
        self.state.record_match();
        let located = self.derived_pattern(occurrences.len()).and_then(|regex| {
            regex.captures(line).map(|caps| {
                caps.iter()
                    .skip(1)
                    .flatten()
                    .map(Capture::from_match)
                    .collect::<Vec<_>>()
            })
        });
        self.captures = match located {
            Some(located) if !located.is_empty() => located,
            _ => occurrences,
        };
        line.to_string()
    }

    fn match_found(&self) -> bool {
        self.state.match_found()
    }

    fn captured(&self) -> &[Capture] {
        &self.captures
    }
}
