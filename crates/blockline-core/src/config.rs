//! Declarative matcher configuration
//!
//! A matcher set can be described in TOML and built into live matchers:
//!
//! ```toml
//! [[matcher]]
//! opening = ['\s+settings = \{']
//! closing = '\s+\};'
//!
//! [matcher.strategy]
//! kind = "key-value"
//! target = '\s+ARCHS\s+=\s+"(.+)";'
//! indent = '(\s+).+;'
//! key = "ARCHS"
//! value = "x86_64"
//! expected = ["arm64", "armv7"]
//! ```

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::matcher::BlockMatcher;
use crate::pattern::LinePattern;
use crate::strategy::{
    CaptureStrategy, ExpectedValues, FindAllStrategy, KeyValueStrategy, MultiLocateStrategy,
};

/// Strategy choice and its parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StrategyConfig {
    /// Record capture groups from the target pattern.
    Capture { target: String },
    /// Record every occurrence of the target pattern.
    FindAll { target: String },
    /// Record the location of every occurrence of the target pattern.
    MultiLocate { target: String },
    /// Keep a key's value list complete, rewriting or synthesizing its line.
    KeyValue {
        target: String,
        indent: String,
        key: String,
        value: String,
        expected: ExpectedValues,
    },
}

/// One matcher: its block boundaries and its strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Ordered opening patterns. Empty strings are ignored.
    #[serde(default)]
    pub opening: Vec<String>,
    /// Closing pattern. Absent or empty means the block ends on the match.
    #[serde(default)]
    pub closing: Option<String>,
    /// Applies to every pattern of this matcher.
    #[serde(default)]
    pub case_insensitive: bool,
    pub strategy: StrategyConfig,
}

impl MatcherConfig {
    pub fn build(&self) -> Result<BlockMatcher> {
        let ci = self.case_insensitive;
        let opening = self
            .opening
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| LinePattern::with_case(p, ci))
            .collect::<Result<Vec<_>>>()?;
        let closing = match self.closing.as_deref() {
            Some(p) if !p.is_empty() => Some(LinePattern::with_case(p, ci)?),
            _ => None,
        };
        Ok(match &self.strategy {
            StrategyConfig::Capture { target } => BlockMatcher::new(
                opening,
                CaptureStrategy::new(LinePattern::with_case(target, ci)?),
                closing,
            ),
            StrategyConfig::FindAll { target } => BlockMatcher::new(
                opening,
                FindAllStrategy::new(LinePattern::with_case(target, ci)?),
                closing,
            ),
            StrategyConfig::MultiLocate { target } => BlockMatcher::new(
                opening,
                MultiLocateStrategy::new(LinePattern::with_case(target, ci)?),
                closing,
            ),
            StrategyConfig::KeyValue {
                target,
                indent,
                key,
                value,
                expected,
            } => BlockMatcher::new(
                opening,
                KeyValueStrategy::new(
                    LinePattern::with_case(target, ci)?,
                    LinePattern::with_case(indent, ci)?,
                    key.as_str(),
                    value.as_str(),
                    expected.clone(),
                ),
                closing,
            ),
        })
    }
}

/// A full matcher set as parsed from a TOML document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatcherSet {
    #[serde(default, rename = "matcher")]
    pub matchers: Vec<MatcherConfig>,
}

impl MatcherSet {
    /// Parses a TOML document into a matcher set.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Builds live matchers, in declaration order.
    pub fn build(&self) -> Result<Vec<BlockMatcher>> {
        self.matchers.iter().map(MatcherConfig::build).collect()
    }
}
