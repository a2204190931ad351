use crate::error::{ChunkerError, Result};
use crate::language::SplitLanguage;
use crate::types::{Chunk, ChunkKind};
use text_splitter::CodeSplitter;

/// Fixed size budget handed to the external splitter. A single indivisible
/// unit larger than this still comes back as one piece.
pub const MAX_SPLIT_BYTES: usize = 8192;

/// Chunk source text with the external token-bounded splitter.
///
/// The splitter owns all segmentation logic; this adapter maps each returned
/// piece 1:1 into a chunk and derives 1-based line bounds from the piece's
/// byte offset.
pub fn chunk_token_bounded(
    language: SplitLanguage,
    content: &str,
    file_path: &str,
) -> Result<Vec<Chunk>> {
    let splitter = CodeSplitter::new(language.tree_sitter_language(), MAX_SPLIT_BYTES)
        .map_err(|e| ChunkerError::split(format!("{} splitter: {e}", language.as_str())))?;

    let mut chunks = Vec::new();
    for (offset, piece) in splitter.chunk_indices(content) {
        let (start_line, end_line) = line_bounds(content, offset, piece);
        match Chunk::new(file_path, start_line, end_line, piece, ChunkKind::Code) {
            Ok(chunk) => chunks.push(chunk.language(language.as_str())),
            Err(e) => log::debug!("Dropping split piece in {file_path}: {e}"),
        }
    }

    Ok(chunks)
}

/// 1-based inclusive line bounds for a piece starting at `offset`
fn line_bounds(content: &str, offset: usize, piece: &str) -> (usize, usize) {
    let start_line = content[..offset].matches('\n').count() + 1;
    let end_line = start_line + piece.trim_end_matches('\n').matches('\n').count();
    (start_line, end_line)
}
