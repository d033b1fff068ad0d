//! Recording delegate for block-matcher tests.
//!
//! [`BlockMatcher`](blockline_core::BlockMatcher) owns its delegate, so a
//! test that wants to inspect notifications afterwards hands the matcher a
//! [`RecordingDelegate`] and keeps the [`EventLog`] it writes to.

use std::cell::RefCell;
use std::rc::Rc;

use blockline_core::BlockDelegate;

/// One delegate notification, with the line that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegateEvent {
    /// An opening pattern matched; `index` is its position in the sequence.
    Opening { index: usize, line: String },
    /// The strategy matched a line inside the block.
    Target { line: String },
    /// The closing pattern matched.
    Closing { line: String },
}

/// Shared event history. Clones refer to the same underlying log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<DelegateEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A delegate that appends to this log.
    pub fn recorder(&self) -> RecordingDelegate {
        RecordingDelegate { log: self.clone() }
    }

    /// Snapshot of all recorded events, in notification order.
    pub fn events(&self) -> Vec<DelegateEvent> {
        self.events.borrow().clone()
    }

    pub fn opening_count(&self) -> usize {
        self.count(|e| matches!(e, DelegateEvent::Opening { .. }))
    }

    pub fn target_count(&self) -> usize {
        self.count(|e| matches!(e, DelegateEvent::Target { .. }))
    }

    pub fn closing_count(&self) -> usize {
        self.count(|e| matches!(e, DelegateEvent::Closing { .. }))
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn count(&self, pred: impl Fn(&DelegateEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }

    fn push(&self, event: DelegateEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// A [`BlockDelegate`] that records every notification into an [`EventLog`].
pub struct RecordingDelegate {
    log: EventLog,
}

impl BlockDelegate for RecordingDelegate {
    fn on_opening_match(&mut self, index: usize, line: &str) {
        self.log.push(DelegateEvent::Opening {
            index,
            line: line.to_string(),
        });
    }

    fn on_target_match(&mut self, line: &str) {
        self.log.push(DelegateEvent::Target {
            line: line.to_string(),
        });
    }

    fn on_closing_match(&mut self, line: &str) {
        self.log.push(DelegateEvent::Closing {
            line: line.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_shared_between_clones() {
        let log = EventLog::new();
        let mut recorder = log.recorder();
        recorder.on_opening_match(0, "begin\n");
        recorder.on_target_match("hit\n");
        recorder.on_closing_match("end\n");

        assert_eq!(log.opening_count(), 1);
        assert_eq!(log.target_count(), 1);
        assert_eq!(log.closing_count(), 1);
        assert_eq!(
            log.events()[0],
            DelegateEvent::Opening {
                index: 0,
                line: "begin\n".to_string()
            }
        );

        log.clear();
        assert!(log.events().is_empty());
    }
}
