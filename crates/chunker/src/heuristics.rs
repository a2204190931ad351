use crate::types::{Chunk, ChunkKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Level-2/3 markdown heading at the start of a line
static MD_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{2,3}\s").unwrap());

/// Build-script instruction keywords that open a new step
static BUILD_INSTRUCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(?:FROM|RUN|COPY|ARG|ENV|ENTRYPOINT|CMD|WORKDIR)\s").unwrap());

/// Split markdown at `##`/`###` headings. Each section keeps its heading
/// line; a non-empty preamble before the first heading is its own chunk.
pub fn chunk_markdown(content: &str, file_path: &str) -> Vec<Chunk> {
    split_sections(content, &MD_HEADING, file_path, ChunkKind::Markdown)
}

/// Split a Dockerfile-like build script at instruction boundaries
pub fn chunk_dockerfile(content: &str, file_path: &str) -> Vec<Chunk> {
    split_sections(content, &BUILD_INSTRUCTION, file_path, ChunkKind::Dockerfile)
}

/// Whole-file passthrough for config formats: one trimmed chunk spanning
/// the file, or nothing when the file is blank
pub fn chunk_config(content: &str, file_path: &str) -> Vec<Chunk> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let end_line = content.lines().count().max(1);
    match Chunk::new(file_path, 1, end_line, trimmed, ChunkKind::Config) {
        Ok(chunk) => vec![chunk],
        Err(e) => {
            log::debug!("Dropping config chunk for {file_path}: {e}");
            Vec::new()
        }
    }
}

/// Partition `content` at every match of `boundary`, keeping the matched
/// text with the section that follows it.
///
/// Line numbers derive from the match byte offsets, so repeated section text
/// earlier in the file cannot skew them. Sections that are empty after
/// trimming are dropped.
fn split_sections(content: &str, boundary: &Regex, file_path: &str, kind: ChunkKind) -> Vec<Chunk> {
    let mut starts: Vec<usize> = boundary.find_iter(content).map(|m| m.start()).collect();
    if starts.first() != Some(&0) {
        // Unmarked preamble before the first boundary.
        starts.insert(0, 0);
    }

    let mut chunks = Vec::new();
    for (i, &section_start) in starts.iter().enumerate() {
        let section_end = starts.get(i + 1).copied().unwrap_or(content.len());
        let raw = &content[section_start..section_end];
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }

        let leading = raw.len() - raw.trim_start().len();
        let start_line = content[..section_start + leading].matches('\n').count() + 1;
        let end_line = start_line + text.matches('\n').count();

        match Chunk::new(file_path, start_line, end_line, text, kind) {
            Ok(chunk) => chunks.push(chunk),
            Err(e) => log::debug!("Dropping section in {file_path}: {e}"),
        }
    }

    chunks
}
