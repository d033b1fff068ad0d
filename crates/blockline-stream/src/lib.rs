//! Stream orchestration for blockline
//!
//! Drives line-by-line consumption from a `LineSource`, dispatches each line
//! to registered `BlockMatcher`s under a cooperative or exclusive policy,
//! and writes the possibly rewritten lines to a `LineSink`. An optional
//! replay buffer records raw history so a later pass can re-parse a window
//! of it with different matchers, without re-reading the original source.

pub mod error;
pub mod handler;
pub mod orchestrator;
pub mod replay;

pub use error::{Error, Result};
pub use handler::{HandlerOutcome, LineEvent};
pub use orchestrator::{DispatchPolicy, RunReport, StreamOrchestrator};
pub use replay::{ReplayBuffer, ReplayWindow};
