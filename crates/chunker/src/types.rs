use crate::error::{ChunkerError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use uuid::Uuid;

/// Coarse category a chunk is emitted under, serialized as the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    /// Code extracted by the structural or token-bounded chunkers
    Code,
    /// Heading-delimited markdown section
    Markdown,
    /// Instruction-delimited build-script step
    Dockerfile,
    /// Whole-file config passthrough
    Config,
}

impl ChunkKind {
    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Markdown => "markdown",
            Self::Dockerfile => "dockerfile",
            Self::Config => "config",
        }
    }
}

/// An immutable, identified, line-bounded slice of a file's text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// Generated identifier, unique per chunk
    pub id: String,

    /// SHA-256 of the exact content bytes; identical content hashes
    /// identically regardless of origin
    pub chunk_hash: String,

    /// Path of origin, relative to the scan root
    pub file_path: String,

    /// Final path component
    pub file_name: String,

    /// Directory part of `file_path`
    pub relative_dir: String,

    /// Lowercased extension including the dot, empty when absent
    pub extension: String,

    #[serde(rename = "type")]
    pub kind: ChunkKind,

    /// Start line (1-indexed)
    pub start_line: usize,

    /// End line (1-indexed, inclusive)
    pub end_line: usize,

    /// The raw text content
    pub content: String,

    /// Byte length of `content`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,

    /// Language tag when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Name of the enclosing construct (function, class, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_name: Option<String>,

    /// Whether the origin file looks like a test file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_test_file: Option<bool>,

    /// Coarse zone classification derived from the path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_guess: Option<String>,
}

impl Chunk {
    /// Construct a chunk, enforcing the model invariants.
    ///
    /// Fails with [`ChunkerError::Validation`] when the line range is
    /// inverted, the start line is not positive, or the content is empty
    /// after trimming. The content hash is computed over the exact bytes,
    /// with no normalization.
    pub fn new(
        file_path: impl Into<String>,
        start_line: usize,
        end_line: usize,
        content: impl Into<String>,
        kind: ChunkKind,
    ) -> Result<Self> {
        let file_path = file_path.into();
        let content = content.into();

        if start_line == 0 {
            return Err(ChunkerError::validation(format!(
                "start_line must be >= 1 ({file_path})"
            )));
        }
        if end_line < start_line {
            return Err(ChunkerError::validation(format!(
                "end_line ({end_line}) must be >= start_line ({start_line}) ({file_path})"
            )));
        }
        if content.trim().is_empty() {
            return Err(ChunkerError::validation(format!(
                "empty chunk content ({file_path})"
            )));
        }

        let path = Path::new(&file_path);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let relative_dir = path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        let chunk_hash = content_hash(&content);
        let size = content.len();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            chunk_hash,
            file_path,
            file_name,
            relative_dir,
            extension,
            kind,
            start_line,
            end_line,
            content,
            size: Some(size),
            language: None,
            symbol_name: None,
            is_test_file: None,
            zone_guess: None,
        })
    }

    /// Builder: set language tag
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builder: set enclosing-construct name
    #[must_use]
    pub fn symbol_name(mut self, name: impl Into<String>) -> Self {
        self.symbol_name = Some(name.into());
        self
    }

    /// Builder: set test-file flag
    #[must_use]
    pub fn test_file(mut self, is_test: bool) -> Self {
        self.is_test_file = Some(is_test);
        self
    }

    /// Builder: set zone classification
    #[must_use]
    pub fn zone(mut self, zone: impl Into<String>) -> Self {
        self.zone_guess = Some(zone.into());
        self
    }

    /// Get the number of lines in this chunk
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

/// Deterministic digest of chunk text: lowercase hex SHA-256 of the bytes
#[must_use]
pub fn content_hash(content: &str) -> String {
    format!("{:x}", Sha256::digest(content.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn constructs_with_derived_fields() {
        let chunk = Chunk::new("src/app/Main.TS", 3, 7, "fn x() {}", ChunkKind::Code).unwrap();
        assert_eq!(chunk.file_name, "Main.TS");
        assert_eq!(chunk.relative_dir, "src/app");
        assert_eq!(chunk.extension, ".ts");
        assert_eq!(chunk.size, Some(9));
        assert_eq!(chunk.line_count(), 5);
        assert!(!chunk.id.is_empty());
    }

    #[test]
    fn rejects_zero_start_line() {
        let result = Chunk::new("a.rs", 0, 1, "x", ChunkKind::Code);
        assert!(matches!(result, Err(ChunkerError::Validation(_))));
    }

    #[test]
    fn rejects_inverted_range() {
        let result = Chunk::new("a.rs", 5, 4, "x", ChunkKind::Code);
        assert!(matches!(result, Err(ChunkerError::Validation(_))));
    }

    #[test]
    fn rejects_whitespace_only_content() {
        let result = Chunk::new("a.rs", 1, 1, "  \n\t ", ChunkKind::Code);
        assert!(matches!(result, Err(ChunkerError::Validation(_))));
    }

    #[test]
    fn hash_is_deterministic_and_content_addressed() {
        let a = Chunk::new("a.rs", 1, 1, "same text", ChunkKind::Code).unwrap();
        let b = Chunk::new("deep/nested/b.py", 40, 40, "same text", ChunkKind::Code).unwrap();
        assert_eq!(a.chunk_hash, b.chunk_hash);
        assert_ne!(a.id, b.id);

        let c = Chunk::new("a.rs", 1, 1, "other text", ChunkKind::Code).unwrap();
        assert_ne!(a.chunk_hash, c.chunk_hash);

        assert_eq!(content_hash("same text"), content_hash("same text"));
    }

    #[test]
    fn serialization_omits_unset_metadata() {
        let chunk = Chunk::new("a.md", 1, 1, "# hi", ChunkKind::Markdown).unwrap();
        let json = serde_json::to_value(&chunk).unwrap();
        assert_eq!(json["type"], "markdown");
        assert!(json.get("language").is_none());
        assert!(json.get("symbol_name").is_none());
        assert!(json.get("is_test_file").is_none());

        let tagged = Chunk::new("a.rs", 1, 1, "fn a() {}", ChunkKind::Code)
            .unwrap()
            .language("rust")
            .test_file(false);
        let json = serde_json::to_value(&tagged).unwrap();
        assert_eq!(json["language"], "rust");
        assert_eq!(json["is_test_file"], false);
    }
}
