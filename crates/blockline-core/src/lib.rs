//! Block matching for line streams
//!
//! A `BlockMatcher` walks a block of lines: an ordered opening-pattern
//! sequence, a body in which one target line is sought, and an optional
//! closing pattern. What "the target" means is pluggable through the
//! `MatchStrategy` family: capture groups, occurrence scans, occurrence
//! locations, or key/value-list repair that can synthesize the line when the
//! key never appears before the block closes.
//!
//! Matcher sets can also be described declaratively in TOML through the
//! `config` module.

pub mod config;
pub mod error;
pub mod matcher;
pub mod pattern;
pub mod strategy;

pub use config::{MatcherConfig, MatcherSet, StrategyConfig};
pub use error::{Error, Result};
pub use matcher::{BlockDelegate, BlockEnd, BlockMatcher, BlockState, LineOutcome, NoopDelegate};
pub use pattern::LinePattern;
pub use strategy::{
    Capture, CaptureStrategy, ExpectedValues, FindAllStrategy, KeyValueStrategy, MatchStrategy,
    MultiLocateStrategy,
};
