//! Stream orchestrator: line dispatch across registered matchers

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use blockline_core::{BlockEnd, BlockMatcher, BlockState};
use blockline_io::{LineSink, LineSource};

use crate::handler::{HandlerOutcome, LineEvent};
use crate::replay::ReplayBuffer;
use crate::{Error, Result};

/// How many matchers may claim the same line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchPolicy {
    /// Every matcher that accepts a line gets to process it.
    #[default]
    Cooperative,
    /// At most one matcher claims a line; scanning stops at the first
    /// acceptor, except for matchers with no opening sequence.
    Exclusive,
}

/// Summary of one orchestrator run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub lines_read: usize,
    pub lines_written: usize,
    pub stopped_early: bool,
}

enum Offer {
    Rejected,
    Accepted,
    Stopped,
}

/// Drives line-by-line consumption, tracks which matchers are mid-block,
/// and enforces the dispatch policy.
///
/// Matchers are registered once and offered lines in registration order:
/// first those already mid-block, then, in the scan phase, the rest. Under
/// cooperative dispatch the scan runs on every line; under exclusive
/// dispatch only when no mid-block matcher consumed the line, and it stops
/// at the first acceptor. Rewrites compose: a later matcher sees the line
/// as the previous one left it, and the final text goes to the sink.
pub struct StreamOrchestrator {
    matchers: Vec<BlockMatcher>,
    active: BTreeSet<usize>,
    policy: DispatchPolicy,
    replay: Option<ReplayBuffer>,
}

impl StreamOrchestrator {
    pub fn new() -> Self {
        Self::with_policy(DispatchPolicy::default())
    }

    pub fn with_policy(policy: DispatchPolicy) -> Self {
        Self {
            matchers: Vec::new(),
            active: BTreeSet::new(),
            policy,
            replay: None,
        }
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Registers a matcher and returns the index line events will carry.
    /// Earlier registrations take priority during scans.
    pub fn register(&mut self, matcher: BlockMatcher) -> usize {
        self.matchers.push(matcher);
        self.matchers.len() - 1
    }

    pub fn matcher(&self, index: usize) -> &BlockMatcher {
        &self.matchers[index]
    }

    pub fn matcher_mut(&mut self, index: usize) -> &mut BlockMatcher {
        &mut self.matchers[index]
    }

    pub fn matchers(&self) -> &[BlockMatcher] {
        &self.matchers
    }

    /// Resets every matcher and empties the active set. Recorded replay
    /// history is kept; call `attach_replay` again for a fresh buffer.
    pub fn reset(&mut self) {
        for matcher in &mut self.matchers {
            matcher.reset();
        }
        self.active.clear();
    }

    /// Starts recording raw lines, replacing any previous history.
    pub fn attach_replay(&mut self) {
        self.replay = Some(ReplayBuffer::new());
    }

    pub fn replay(&self) -> Option<&ReplayBuffer> {
        self.replay.as_ref()
    }

    /// Runs the full per-line loop until end of input, an early stop from
    /// the handler, or an I/O failure. Without a sink the matchers still
    /// run, which is how read-only extraction works.
    pub fn run<H>(
        &mut self,
        source: &mut dyn LineSource,
        mut sink: Option<&mut dyn LineSink>,
        mut handler: H,
    ) -> Result<RunReport>
    where
        H: FnMut(LineEvent<'_>) -> HandlerOutcome,
    {
        let mut report = RunReport::default();
        loop {
            let Some(raw) = source.next_line().map_err(Error::Source)? else {
                break;
            };
            let line_index = report.lines_read;
            report.lines_read += 1;
            if let Some(replay) = &mut self.replay {
                replay.append(&raw);
            }

            let mut line = raw;
            // Synthesized lines collect here instead of onto `line`, so a
            // second matcher closing on the same line still sees the real
            // closing text.
            let mut prefix = String::new();
            let mut consumed = false;
            let mut stop = false;

            // Mid-block matchers first, over a snapshot; membership changes
            // as matchers close or stop wanting lines.
            let engaged: Vec<usize> = self.active.iter().copied().collect();
            for index in engaged {
                match self.offer(index, line_index, &mut line, &mut prefix, &mut handler) {
                    Offer::Rejected => {}
                    Offer::Accepted => consumed = true,
                    Offer::Stopped => {
                        stop = true;
                        break;
                    }
                }
            }

            // Scan phase for the remaining matchers.
            if !stop && (self.policy == DispatchPolicy::Cooperative || !consumed) {
                for index in 0..self.matchers.len() {
                    if self.active.contains(&index) {
                        continue;
                    }
                    match self.offer(index, line_index, &mut line, &mut prefix, &mut handler) {
                        Offer::Rejected => {}
                        Offer::Accepted => {
                            if self.policy == DispatchPolicy::Exclusive
                                && !self.matchers[index].allow_next()
                            {
                                break;
                            }
                        }
                        Offer::Stopped => {
                            stop = true;
                            break;
                        }
                    }
                }
            }

            if stop {
                report.stopped_early = true;
                break;
            }

            if let Some(sink) = sink.as_deref_mut() {
                if !prefix.is_empty() {
                    sink.write_line(&prefix).map_err(Error::Sink)?;
                    report.lines_written += 1;
                }
                sink.write_line(&line).map_err(Error::Sink)?;
                report.lines_written += 1;
            }
        }

        source.finish().map_err(Error::Source)?;
        if let Some(sink) = sink {
            sink.finish().map_err(Error::Sink)?;
        }
        debug!(
            lines_read = report.lines_read,
            lines_written = report.lines_written,
            stopped_early = report.stopped_early,
            "stream run finished"
        );
        Ok(report)
    }

    /// Copies the stream through the matchers with no handler.
    pub fn run_to_end(
        &mut self,
        source: &mut dyn LineSource,
        sink: &mut dyn LineSink,
    ) -> Result<RunReport> {
        self.run(source, Some(sink), |_| HandlerOutcome::Continue)
    }

    /// Offers one line to one matcher: the wants/process/handle/finish walk.
    fn offer<H>(
        &mut self,
        index: usize,
        line_index: usize,
        line: &mut String,
        prefix: &mut String,
        handler: &mut H,
    ) -> Offer
    where
        H: FnMut(LineEvent<'_>) -> HandlerOutcome,
    {
        let matcher = &mut self.matchers[index];
        if !matcher.wants_line(line) {
            self.update_membership(index);
            return Offer::Rejected;
        }
        if matcher.state() != BlockState::Inside {
            // still walking the opening sequence
            self.update_membership(index);
            return Offer::Accepted;
        }
        let outcome = matcher.process_line(line);
        let matched = outcome.matched;
        *line = outcome.line;

        let verdict = handler(LineEvent {
            line_index,
            index,
            matcher: &self.matchers[index],
            matched,
            line: line.as_str(),
        });
        match verdict {
            HandlerOutcome::Stop => {
                self.update_membership(index);
                return Offer::Stopped;
            }
            HandlerOutcome::Release => {
                self.matchers[index].reset();
                self.update_membership(index);
                return Offer::Accepted;
            }
            HandlerOutcome::Continue => {}
        }

        if let BlockEnd::Closed { synthesized } = self.matchers[index].check_finished(line) {
            if let Some(synthesized) = synthesized {
                prefix.push_str(&synthesized);
            }
            debug!(matcher = index, line = line_index, "block closed");
        }
        self.update_membership(index);
        Offer::Accepted
    }

    fn update_membership(&mut self, index: usize) {
        if self.matchers[index].is_engaged() {
            self.active.insert(index);
        } else {
            self.active.remove(&index);
        }
    }
}

impl Default for StreamOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
