//! Error types for blockline-core

/// Result type for blockline-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur building patterns and matchers
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to parse matcher config: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    pub fn pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            source,
        }
    }
}
