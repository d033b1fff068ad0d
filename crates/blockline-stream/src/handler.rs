//! Line handler callbacks

use blockline_core::BlockMatcher;

/// What the line handler wants the orchestrator to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandlerOutcome {
    /// Keep going.
    #[default]
    Continue,
    /// Keep going, but reset this matcher and drop it from the active set.
    Release,
    /// Finalize immediately. The current line is not written and no further
    /// line is read.
    Stop,
}

/// One processed line, as seen by the line handler.
///
/// The handler fires once for every matcher that processed the line inside
/// its block, in dispatch order, before completion checking, so captured
/// state read through `matcher` is still present even when this line is
/// about to close the block.
pub struct LineEvent<'a> {
    /// Zero-based position of the line in the stream.
    pub line_index: usize,
    /// Registration index of the matcher that processed the line.
    pub index: usize,
    /// The matcher itself, for reading captured state.
    pub matcher: &'a BlockMatcher,
    /// Whether the matcher's strategy matched this line.
    pub matched: bool,
    /// The line as the matcher left it.
    pub line: &'a str,
}
