use crate::error::{Result, WalkerError};
use crate::scanner::FileScanner;
use codechunk_chunker::{chunk_content, classify, Chunk, GrammarRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One file that raised during processing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileError {
    pub file_path: String,
    pub error: String,
}

/// Aggregate of a repository scan: three append-only streams, finalized at
/// scan end. Chunks are never mutated after being appended.
#[derive(Debug, Default, Serialize)]
pub struct RunResult {
    pub code_chunks: Vec<Chunk>,
    pub non_code_chunks: Vec<Chunk>,
    pub errors: Vec<FileError>,
}

impl RunResult {
    /// Combined view: code chunks followed by non-code chunks
    pub fn combined(&self) -> impl Iterator<Item = &Chunk> {
        self.code_chunks.iter().chain(self.non_code_chunks.iter())
    }

    #[must_use]
    pub fn total_chunks(&self) -> usize {
        self.code_chunks.len() + self.non_code_chunks.len()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Chunk every file reachable under `root`.
///
/// Fails fast only when the root is missing or not a directory. Any
/// per-file failure (unreadable bytes, splitter error) becomes one entry in
/// `errors` keyed by the file's relative path, and the walk continues; a
/// single bad file never terminates the scan.
pub fn chunk_repository(root: impl AsRef<Path>, registry: &GrammarRegistry) -> Result<RunResult> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(WalkerError::InvalidPath(format!(
            "Path does not exist: {}",
            root.display()
        )));
    }
    if !root.is_dir() {
        return Err(WalkerError::InvalidPath(format!(
            "Path is not a directory: {}",
            root.display()
        )));
    }

    let files = FileScanner::new(root).scan();
    let mut result = RunResult::default();

    for path in files {
        let relative = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .to_string_lossy()
            .into_owned();

        match process_file(&path, &relative, registry) {
            Ok(chunks) => {
                if classify(&path).is_code() {
                    result.code_chunks.extend(chunks);
                } else {
                    result.non_code_chunks.extend(chunks);
                }
            }
            Err(e) => {
                log::warn!("Failed to process {relative}: {e}");
                result.errors.push(FileError {
                    file_path: relative,
                    error: e.to_string(),
                });
            }
        }
    }

    log::info!(
        "Chunked {} code + {} non-code chunks, {} errors",
        result.code_chunks.len(),
        result.non_code_chunks.len(),
        result.errors.len()
    );
    Ok(result)
}

/// Chunk a single file; errors when the path is missing or not a file
pub fn chunk_single_file(path: impl AsRef<Path>, registry: &GrammarRegistry) -> Result<Vec<Chunk>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(WalkerError::InvalidPath(format!(
            "File does not exist: {}",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(WalkerError::InvalidPath(format!(
            "Path is not a file: {}",
            path.display()
        )));
    }

    let relative = path.to_string_lossy().into_owned();
    Ok(process_file(path, &relative, registry)?)
}

fn process_file(
    path: &Path,
    relative: &str,
    registry: &GrammarRegistry,
) -> codechunk_chunker::Result<Vec<Chunk>> {
    let content = std::fs::read_to_string(path)?;
    chunk_content(registry, relative, &content)
}
