use crate::error::{ChunkerError, Result};
use std::collections::HashMap;
use tree_sitter::Parser;

/// Grammar used by the structural chunker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    TypeScript,
    Tsx,
    Java,
}

impl Grammar {
    /// Every grammar the registry attempts to load at startup
    pub const ALL: [Self; 3] = [Self::TypeScript, Self::Tsx, Self::Java];

    /// Language tag attached to chunks produced with this grammar
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
            Self::Java => "java",
        }
    }

    fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Self::Java => tree_sitter_java::LANGUAGE.into(),
        }
    }
}

/// Language handled by the token-bounded splitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitLanguage {
    Python,
    Go,
    Rust,
}

impl SplitLanguage {
    /// Language tag attached to chunks produced by the splitter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Go => "go",
            Self::Rust => "rust",
        }
    }

    /// Grammar handed to the external splitter
    #[must_use]
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::Go => tree_sitter_go::LANGUAGE.into(),
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
        }
    }
}

/// Immutable registry of structural grammars, built once at startup.
///
/// A grammar that fails to load is logged and left out; files routed to it
/// later degrade to zero chunks instead of erroring per file.
pub struct GrammarRegistry {
    loaded: HashMap<Grammar, tree_sitter::Language>,
}

impl GrammarRegistry {
    /// Load every known grammar, tolerating individual failures
    #[must_use]
    pub fn load_defaults() -> Self {
        let mut loaded = HashMap::new();
        for grammar in Grammar::ALL {
            match Self::try_load(grammar) {
                Ok(language) => {
                    log::debug!("Loaded grammar: {}", grammar.as_str());
                    loaded.insert(grammar, language);
                }
                Err(e) => {
                    log::warn!("Failed to load grammar {}: {e}", grammar.as_str());
                }
            }
        }
        Self { loaded }
    }

    /// Registry with no grammars; every structural file degrades to a skip
    #[must_use]
    pub fn empty() -> Self {
        Self {
            loaded: HashMap::new(),
        }
    }

    fn try_load(grammar: Grammar) -> Result<tree_sitter::Language> {
        let language = grammar.tree_sitter_language();
        // A throwaway parser verifies ABI compatibility up front.
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| ChunkerError::grammar_unavailable(format!("{}: {e}", grammar.as_str())))?;
        Ok(language)
    }

    /// Look up a loaded grammar
    #[must_use]
    pub fn get(&self, grammar: Grammar) -> Option<&tree_sitter::Language> {
        self.loaded.get(&grammar)
    }

    /// Check whether a grammar loaded successfully
    #[must_use]
    pub fn supports(&self, grammar: Grammar) -> bool {
        self.loaded.contains_key(&grammar)
    }
}
