use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur during chunking
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// A constructed chunk would violate a model invariant
    #[error("Validation error: {0}")]
    Validation(String),

    /// The structural parser rejected the source
    #[error("Parse error: {0}")]
    Parse(String),

    /// The token-bounded splitter failed
    #[error("Split error: {0}")]
    Split(String),

    /// A required grammar failed to load at startup
    #[error("Grammar unavailable: {0}")]
    GrammarUnavailable(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChunkerError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a split error
    pub fn split(msg: impl Into<String>) -> Self {
        Self::Split(msg.into())
    }

    /// Create a grammar-unavailable error
    pub fn grammar_unavailable(name: impl Into<String>) -> Self {
        Self::GrammarUnavailable(name.into())
    }
}
