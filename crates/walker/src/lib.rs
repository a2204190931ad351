//! Repository walker and aggregator.
//!
//! Visits every regular file under a scan root, dispatches each to the
//! chunker, and collects the results into three append-only streams: code
//! chunks, non-code chunks, and per-file error records. Failures are
//! contained at the single-file boundary; the walk itself fails only when
//! the root is missing or not a directory.

mod error;
mod run;
mod scanner;

pub use error::{Result, WalkerError};
pub use run::{chunk_repository, chunk_single_file, FileError, RunResult};
pub use scanner::FileScanner;
