//! Replay buffer: recorded line history for second-pass parsing

use std::ops::RangeInclusive;

use blockline_io::LineSource;

/// Append-only history of raw lines, recorded before any transformation.
///
/// Indices are assigned in arrival order and match the `line_index` carried
/// by line events, so a handler can locate a region during the first pass
/// and re-parse exactly that window afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReplayBuffer {
    lines: Vec<String>,
}

impl ReplayBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// A line-source view over the recorded lines in `range`, inclusive on
    /// both ends. Bounds are clamped to the recorded history; a window that
    /// starts past it is simply empty.
    pub fn window(&self, range: RangeInclusive<usize>) -> ReplayWindow<'_> {
        let end = range.end().saturating_add(1).min(self.lines.len());
        let next = (*range.start()).min(self.lines.len());
        ReplayWindow {
            buffer: self,
            next,
            end,
        }
    }
}

/// Yields a recorded window line by line, then end of input.
///
/// Holding a window borrows the buffer, so nothing can append to it while a
/// second pass is reading.
pub struct ReplayWindow<'a> {
    buffer: &'a ReplayBuffer,
    next: usize,
    end: usize,
}

impl LineSource for ReplayWindow<'_> {
    fn next_line(&mut self) -> blockline_io::Result<Option<String>> {
        if self.next >= self.end {
            return Ok(None);
        }
        let line = self.buffer.lines[self.next].clone();
        self.next += 1;
        Ok(Some(line))
    }
}
