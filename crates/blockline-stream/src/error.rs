//! Error types for blockline-stream

/// Result type for blockline-stream operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur driving a stream
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("line source failed: {0}")]
    Source(#[source] blockline_io::Error),

    #[error("line sink failed: {0}")]
    Sink(#[source] blockline_io::Error),
}
