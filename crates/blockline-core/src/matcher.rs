//! Block matching state machine

use tracing::{debug, warn};

use crate::pattern::LinePattern;
use crate::strategy::MatchStrategy;

/// Where a matcher stands relative to its block, derived from the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    /// Still matching the ordered opening sequence.
    Opening,
    /// Past the opening sequence; every line is offered to the strategy.
    Inside,
    /// The closing pattern just matched; transient, a reset follows.
    Closing,
}

/// Outcome of processing one line inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome {
    /// Whether the strategy matched this line.
    pub matched: bool,
    /// The line as the strategy left it.
    pub line: String,
}

/// Whether a line ended the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockEnd {
    /// The block continues.
    Open,
    /// The block ended on this line. `synthesized` carries a fabricated
    /// line to emit before it when the target never appeared.
    Closed { synthesized: Option<String> },
}

/// Notifications a matcher emits as it walks a block.
///
/// Every method defaults to a no-op; implement the ones you care about.
pub trait BlockDelegate {
    /// An opening pattern matched; `index` is its position in the sequence.
    fn on_opening_match(&mut self, _index: usize, _line: &str) {}
    /// The strategy matched a line inside the block.
    fn on_target_match(&mut self, _line: &str) {}
    /// The closing pattern matched; the block is done.
    fn on_closing_match(&mut self, _line: &str) {}
}

/// The default delegate: ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDelegate;

impl BlockDelegate for NoopDelegate {}

/// Tracks one block shape through a line stream.
///
/// A block is an ordered opening-pattern sequence, a body in which the
/// strategy's target is sought, and an optional closing pattern. With no
/// opening patterns the matcher starts inside the block; with no closing
/// pattern the block ends the moment the strategy matches. The cursor walks
/// the opening sequence and derives the state; stepping it outside the
/// configured range is a programming error and panics.
pub struct BlockMatcher {
    opening: Vec<LinePattern>,
    closing: Option<LinePattern>,
    strategy: Box<dyn MatchStrategy>,
    delegate: Box<dyn BlockDelegate>,
    cursor: usize,
}

impl std::fmt::Debug for BlockMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockMatcher")
            .field("opening", &self.opening)
            .field("closing", &self.closing)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl BlockMatcher {
    pub fn new(
        opening: Vec<LinePattern>,
        strategy: impl MatchStrategy + 'static,
        closing: Option<LinePattern>,
    ) -> Self {
        Self {
            opening,
            closing,
            strategy: Box::new(strategy),
            delegate: Box::new(NoopDelegate),
            cursor: 0,
        }
    }

    /// Replaces the delegate.
    pub fn with_delegate(mut self, delegate: impl BlockDelegate + 'static) -> Self {
        self.delegate = Box::new(delegate);
        self
    }

    pub fn set_delegate(&mut self, delegate: impl BlockDelegate + 'static) {
        self.delegate = Box::new(delegate);
    }

    pub fn state(&self) -> BlockState {
        let opening = self.opening.len();
        if self.cursor < opening {
            BlockState::Opening
        } else if self.cursor == opening {
            BlockState::Inside
        } else if self.cursor == opening + 1 && self.closing.is_some() {
            BlockState::Closing
        } else {
            panic!(
                "block cursor {} stepped past {} opening patterns",
                self.cursor, opening
            );
        }
    }

    pub fn strategy(&self) -> &dyn MatchStrategy {
        self.strategy.as_ref()
    }

    /// True once the strategy has matched a line in the current block.
    pub fn match_found(&self) -> bool {
        self.strategy.match_found()
    }

    /// True when the matcher has no opening sequence. Such a matcher never
    /// claims a line exclusively, so under exclusive dispatch later
    /// matchers still get to see the line.
    pub fn allow_next(&self) -> bool {
        self.opening.is_empty()
    }

    /// True once the matcher has advanced past its initial state.
    pub fn is_engaged(&self) -> bool {
        self.cursor > 0
    }

    /// Restores construction state, including the strategy's.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.strategy.reset();
    }

    /// Offers a line. True means the matcher claims it: either the next
    /// opening pattern matched and the cursor advanced, or the matcher is
    /// already inside the block. An opening mismatch resets the whole
    /// sequence; openings must be consecutive lines.
    pub fn wants_line(&mut self, line: &str) -> bool {
        match self.state() {
            BlockState::Opening => {
                if self.opening[self.cursor].matches(line) {
                    self.delegate.on_opening_match(self.cursor, line);
                    self.cursor += 1;
                    true
                } else {
                    self.reset();
                    false
                }
            }
            BlockState::Inside => true,
            BlockState::Closing => {
                warn!("wants_line called in the closing state");
                false
            }
        }
    }

    /// Processes a line inside the block: tests the strategy and returns the
    /// possibly rewritten line. Called in any other state it logs and passes
    /// the line through unmatched.
    pub fn process_line(&mut self, line: &str) -> LineOutcome {
        if self.state() != BlockState::Inside {
            warn!(state = ?self.state(), "process_line called outside the block");
            return LineOutcome {
                matched: false,
                line: line.to_string(),
            };
        }
        let matched = self.strategy.is_match(line);
        if matched {
            self.delegate.on_target_match(line);
        }
        let line = self.strategy.apply(line);
        LineOutcome { matched, line }
    }

    /// Checks whether `line` ends the block. With a closing pattern the
    /// block ends when it matches; without one, as soon as the strategy has
    /// matched. On close the delegate is notified, a line is synthesized
    /// when the target never appeared, and the matcher resets so it can
    /// engage again later in the stream.
    pub fn check_finished(&mut self, line: &str) -> BlockEnd {
        if self.state() != BlockState::Inside {
            return BlockEnd::Open;
        }
        match &self.closing {
            Some(closing) => {
                if !closing.matches(line) {
                    return BlockEnd::Open;
                }
                self.cursor = self.opening.len() + 1;
                self.delegate.on_closing_match(line);
            }
            None => {
                if !self.strategy.match_found() {
                    return BlockEnd::Open;
                }
            }
        }
        let synthesized = self.synthesize_if_unmatched();
        self.reset();
        BlockEnd::Closed { synthesized }
    }

    fn synthesize_if_unmatched(&mut self) -> Option<String> {
        if self.strategy.match_found() {
            return None;
        }
        let synthesized = self.strategy.synthesize();
        if synthesized.is_some() {
            debug!("synthesizing the target line for a block that closed without one");
        }
        synthesized
    }
}
