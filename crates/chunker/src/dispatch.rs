use crate::ast;
use crate::error::Result;
use crate::heuristics;
use crate::language::{Grammar, GrammarRegistry, SplitLanguage};
use crate::splitter;
use crate::types::Chunk;
use once_cell::sync::Lazy;
use regex::RegexSet;
use std::path::Path;

/// Classification bucket a file is routed to.
///
/// A closed enumeration evaluated in fixed priority order: exact file name,
/// then lowercased extension, then [`FileClass::Unsupported`]. New formats
/// are added by extending [`classify`], never by runtime mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    /// Code split by the external token-bounded splitter
    TokenBounded(SplitLanguage),
    /// Code chunked along syntax-tree boundaries
    Structural(Grammar),
    /// Heading-delimited structured text
    Markdown,
    /// Instruction-delimited build script
    BuildScript,
    /// Whole-file config passthrough
    Config,
    /// Produces no chunks; logged as a skip, not an error
    Unsupported,
}

impl FileClass {
    /// Whether chunks from this bucket land in the code stream
    #[must_use]
    pub const fn is_code(self) -> bool {
        matches!(self, Self::TokenBounded(_) | Self::Structural(_))
    }
}

/// Classify a file by name and extension. Pure; never inspects content.
#[must_use]
pub fn classify(path: &Path) -> FileClass {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        match name {
            "Dockerfile" => return FileClass::BuildScript,
            // dotfile, so extension() sees nothing
            ".env" => return FileClass::Config,
            _ => {}
        }
    }

    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return FileClass::Unsupported;
    };

    match ext.to_lowercase().as_str() {
        "py" => FileClass::TokenBounded(SplitLanguage::Python),
        "go" => FileClass::TokenBounded(SplitLanguage::Go),
        "rs" => FileClass::TokenBounded(SplitLanguage::Rust),
        "ts" | "js" | "cjs" => FileClass::Structural(Grammar::TypeScript),
        "tsx" | "jsx" | "baml" => FileClass::Structural(Grammar::Tsx),
        "java" => FileClass::Structural(Grammar::Java),
        "md" => FileClass::Markdown,
        "json" | "yaml" | "yml" | "toml" | "env" => FileClass::Config,
        _ => FileClass::Unsupported,
    }
}

static TEST_FILE_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"test_[^/]*\.py$",
        r"_test\.py$",
        r"\.test\.(js|ts|tsx)$",
        r"\.spec\.(js|ts|tsx)$",
        r"Test\.(java|kt)$",
        r"_test\.(go|rs)$",
    ])
    .unwrap()
});

/// Best-effort test-file detection by filename convention
#[must_use]
pub fn is_test_path(path: &str) -> bool {
    TEST_FILE_PATTERNS.is_match(path)
}

/// Coarse zone classification from the leading path component
fn zone_guess(path: &str) -> Option<&'static str> {
    let first = Path::new(path).components().next()?;
    let first = first.as_os_str().to_str()?;
    match first {
        "tests" | "test" | "__tests__" | "spec" => Some("tests"),
        "docs" | "doc" => Some("docs"),
        "src" | "lib" | "app" | "pkg" => Some("source"),
        ".github" | "ci" | "deploy" | "infra" => Some("infra"),
        _ => None,
    }
}

/// Chunk one file's content according to its classification.
///
/// Unsupported types and structural types whose grammar is not loaded yield
/// zero chunks. Errors surfaced here belong to this file alone; the caller
/// decides whether to record or propagate them.
pub fn chunk_content(
    registry: &GrammarRegistry,
    file_path: &str,
    content: &str,
) -> Result<Vec<Chunk>> {
    let class = classify(Path::new(file_path));

    let chunks = match class {
        FileClass::TokenBounded(language) => {
            splitter::chunk_token_bounded(language, content, file_path)?
        }
        FileClass::Structural(grammar) => {
            if !registry.supports(grammar) {
                log::warn!(
                    "Grammar {} not loaded, skipping {file_path}",
                    grammar.as_str()
                );
                return Ok(Vec::new());
            }
            ast::chunk_structural(registry, grammar, content, file_path)?
        }
        FileClass::Markdown => heuristics::chunk_markdown(content, file_path),
        FileClass::BuildScript => heuristics::chunk_dockerfile(content, file_path),
        FileClass::Config => heuristics::chunk_config(content, file_path),
        FileClass::Unsupported => {
            log::debug!("Unsupported file type, skipping {file_path}");
            return Ok(Vec::new());
        }
    };

    let is_test = class.is_code().then(|| is_test_path(file_path));
    let zone = zone_guess(file_path);

    Ok(chunks
        .into_iter()
        .map(|chunk| {
            let chunk = match is_test {
                Some(flag) => chunk.test_file(flag),
                None => chunk,
            };
            match zone {
                Some(zone) => chunk.zone(zone),
                None => chunk,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn exact_name_wins_over_extension() {
        assert_eq!(classify(Path::new("deploy/Dockerfile")), FileClass::BuildScript);
    }

    #[test]
    fn bare_env_dotfile_is_config() {
        assert_eq!(classify(Path::new(".env")), FileClass::Config);
        assert_eq!(classify(Path::new("deploy/.env")), FileClass::Config);
        assert_eq!(classify(Path::new("prod.env")), FileClass::Config);

        let registry = GrammarRegistry::empty();
        let chunks = chunk_content(&registry, ".env", "KEY=value\n").unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].kind, crate::types::ChunkKind::Config);
    }

    #[test]
    fn extensions_map_to_buckets() {
        assert_eq!(
            classify(Path::new("a.py")),
            FileClass::TokenBounded(SplitLanguage::Python)
        );
        assert_eq!(
            classify(Path::new("a.RS")),
            FileClass::TokenBounded(SplitLanguage::Rust)
        );
        assert_eq!(
            classify(Path::new("a.ts")),
            FileClass::Structural(Grammar::TypeScript)
        );
        assert_eq!(
            classify(Path::new("a.jsx")),
            FileClass::Structural(Grammar::Tsx)
        );
        assert_eq!(
            classify(Path::new("A.java")),
            FileClass::Structural(Grammar::Java)
        );
        assert_eq!(classify(Path::new("README.md")), FileClass::Markdown);
        assert_eq!(classify(Path::new("app.yaml")), FileClass::Config);
        assert_eq!(classify(Path::new("a.xyz")), FileClass::Unsupported);
        assert_eq!(classify(Path::new("no_extension")), FileClass::Unsupported);
    }

    #[test]
    fn unsupported_extension_yields_zero_chunks() {
        let registry = GrammarRegistry::empty();
        let chunks = chunk_content(&registry, "data.xyz", "anything at all").unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn missing_grammar_degrades_to_skip() {
        let registry = GrammarRegistry::empty();
        let chunks = chunk_content(&registry, "app.ts", "function f() {}").unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_file_patterns() {
        assert!(is_test_path("tests/test_api.py"));
        assert!(is_test_path("pkg/handler_test.go"));
        assert!(is_test_path("src/app.spec.ts"));
        assert!(is_test_path("src/FooTest.java"));
        assert!(!is_test_path("src/main.py"));
        assert!(!is_test_path("src/app.ts"));
    }

    #[test]
    fn code_chunks_carry_test_flag_and_zone() {
        let registry = GrammarRegistry::load_defaults();
        let chunks = chunk_content(
            &registry,
            "src/app.test.ts",
            "function check(): void {}\n",
        )
        .unwrap();

        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert_eq!(chunk.is_test_file, Some(true));
            assert_eq!(chunk.zone_guess.as_deref(), Some("source"));
        }
    }

    #[test]
    fn non_code_chunks_have_no_test_flag() {
        let registry = GrammarRegistry::empty();
        let chunks = chunk_content(&registry, "docs/guide.md", "## Usage\nrun it\n").unwrap();
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_test_file.is_none());
        assert_eq!(chunks[0].zone_guess.as_deref(), Some("docs"));
    }
}
