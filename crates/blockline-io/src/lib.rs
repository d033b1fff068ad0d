//! Line-oriented stream I/O for blockline
//!
//! Defines the `LineSource`/`LineSink` contracts the rest of the workspace is
//! written against, plus adapters over readers, writers, files, and in-memory
//! buffers. Lines travel with their original terminators so a stream can be
//! copied byte-for-byte when nothing rewrites it.

pub mod error;
pub mod sink;
pub mod source;

pub use error::{Error, Result};
pub use sink::{FileSink, LineSink, VecSink, WriterSink};
pub use source::{FileSource, LineSource, MemorySource, ReaderSource};
