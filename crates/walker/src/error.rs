use thiserror::Error;

pub type Result<T> = std::result::Result<T, WalkerError>;

#[derive(Error, Debug)]
pub enum WalkerError {
    /// Filesystem read failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A file's content could not be chunked
    #[error("Chunker error: {0}")]
    Chunker(#[from] codechunk_chunker::ChunkerError),

    /// Scan root is missing or not the expected kind of entry
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}
