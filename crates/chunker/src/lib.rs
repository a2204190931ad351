//! # Codechunk Chunker
//!
//! Partitions source files into bounded, addressable chunks for downstream
//! indexing (embeddings, search, retrieval).
//!
//! ## Architecture
//!
//! ```text
//! File path + content
//!     │
//!     ├──> Classification (name/extension, never content)
//!     │
//!     ├──> One strategy per bucket
//!     │    ├─> Structural: tree-sitter AST, one chunk per named unit
//!     │    ├─> Token-bounded: external splitter, fixed size budget
//!     │    ├─> Heuristic: heading / instruction boundaries
//!     │    └─> Passthrough: whole trimmed file
//!     │
//!     └──> Chunk[] — immutable, validated, content-hashed
//! ```
//!
//! ## Example
//!
//! ```rust
//! use codechunk_chunker::{chunk_content, GrammarRegistry};
//!
//! let registry = GrammarRegistry::load_defaults();
//! let chunks = chunk_content(&registry, "notes.md", "## A\nbody\n").unwrap();
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].start_line, 1);
//! ```

mod ast;
mod dispatch;
mod error;
mod heuristics;
mod language;
mod splitter;
mod types;

pub use dispatch::{chunk_content, classify, is_test_path, FileClass};
pub use error::{ChunkerError, Result};
pub use language::{Grammar, GrammarRegistry, SplitLanguage};
pub use splitter::MAX_SPLIT_BYTES;
pub use types::{content_hash, Chunk, ChunkKind};
