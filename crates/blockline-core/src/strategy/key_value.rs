//! Key/value-list repair strategy

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::pattern::LinePattern;

use super::{Capture, MatchState, MatchStrategy};

/// The baseline value list a key is expected to carry, given either as a
/// single value or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpectedValues {
    Single(String),
    List(Vec<String>),
}

impl ExpectedValues {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::List(values) => values,
        }
    }
}

/// Keeps a key's whitespace-separated value list complete.
///
/// The target pattern's group 1 must capture the current value list. On a
/// match, the required value is appended when absent (splicing over the
/// captured span, so nothing else in the line changes). If the key's line
/// never appears before the block closes, `synthesize` fabricates one: the
/// expected values plus the required value, indented like the most recently
/// seen line.
pub struct KeyValueStrategy {
    target: LinePattern,
    indent: LinePattern,
    key: String,
    value: String,
    expected: ExpectedValues,
    state: MatchState,
    captures: Vec<Capture>,
    current_values: Vec<String>,
}

impl KeyValueStrategy {
    pub fn new(
        target: LinePattern,
        indent: LinePattern,
        key: impl Into<String>,
        value: impl Into<String>,
        expected: ExpectedValues,
    ) -> Self {
        Self {
            target,
            indent,
            key: key.into(),
            value: value.into(),
            expected,
            state: MatchState::default(),
            captures: Vec::new(),
            current_values: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn required_value(&self) -> &str {
        &self.value
    }

    pub fn expected(&self) -> &ExpectedValues {
        &self.expected
    }

    /// The value list from the most recent matching line, after any append.
    pub fn current_values(&self) -> &[String] {
        &self.current_values
    }

    // Expected values with the required value appended when absent.
    fn complete_values(&self) -> Vec<&str> {
        let mut values: Vec<&str> = self
            .expected
            .as_slice()
            .iter()
            .map(String::as_str)
            .collect();
        if !values.contains(&self.value.as_str()) {
            values.push(&self.value);
        }
        values
    }
}

impl MatchStrategy for KeyValueStrategy {
    fn reset(&mut self) {
        self.state.reset();
        self.captures.clear();
        self.current_values.clear();
    }

    fn is_match(&self, line: &str) -> bool {
        self.target.matches(line)
    }

    fn apply(&mut self, line: &str) -> String {
        self.state.record_line(line);
        let Some(caps) = self.target.captures(line) else {
            return line.to_string();
        };
        self.state.record_match();
        let Some(group) = caps.get(1) else {
            warn!(
                pattern = self.target.source(),
                "key/value target pattern captured no value list"
            );
            return line.to_string();
        };
        self.captures = vec![Capture::from_match(group)];
        let mut values: Vec<String> = group
            .as_str()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let has_value = values.iter().any(|v| v == &self.value);
        let rewritten = if has_value {
            line.to_string()
        } else {
            values.push(self.value.clone());
            let mut out = String::with_capacity(line.len() + self.value.len() + 1);
            out.push_str(&line[..group.start()]);
            out.push_str(&values.join(" "));
            out.push_str(&line[group.end()..]);
            out
        };
        self.current_values = values;
        rewritten
    }

    fn synthesize(&self) -> Option<String> {
        let previous = self.state.previous_line()?;
        let indent = self
            .indent
            .captures(previous)?
            .get(1)
            .map(|m| m.as_str())
            .unwrap_or_default();
        let values = self.complete_values().join(" ");
        Some(format!("{indent}{} = \"{values}\";\n", self.key))
    }

    fn match_found(&self) -> bool {
        self.state.match_found()
    }

    fn captured(&self) -> &[Capture] {
        &self.captures
    }
}
