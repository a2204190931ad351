use crate::error::{ChunkerError, Result};
use crate::language::{Grammar, GrammarRegistry};
use crate::types::{Chunk, ChunkKind};
use tree_sitter::{Node, Parser};

/// Chunk source text along syntax-tree node boundaries.
///
/// Every node anywhere in the tree whose kind is on the grammar's allow-list
/// becomes one chunk; traversal always continues into children, so nested
/// units are emitted independently of their enclosing unit (a class chunk
/// and its method chunks overlap by design). When no node matches, the whole
/// file is emitted as a single untyped chunk.
pub fn chunk_structural(
    registry: &GrammarRegistry,
    grammar: Grammar,
    content: &str,
    file_path: &str,
) -> Result<Vec<Chunk>> {
    let language = registry
        .get(grammar)
        .ok_or_else(|| ChunkerError::grammar_unavailable(grammar.as_str().to_string()))?;

    let mut parser = Parser::new();
    parser
        .set_language(language)
        .map_err(|e| ChunkerError::parse(format!("set_language {}: {e}", grammar.as_str())))?;

    let Some(tree) = parser.parse(content, None) else {
        // Malformed source: fall back to the whole-file chunk instead of
        // failing the file.
        log::warn!("Parse produced no tree for {file_path}, using whole-file fallback");
        return Ok(fallback_chunk(content, file_path, grammar));
    };

    let mut chunks = Vec::new();

    // Explicit-stack pre-order traversal; deeply nested source must not
    // exhaust the call stack.
    let mut stack = vec![tree.root_node()];
    while let Some(node) = stack.pop() {
        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }

        if !emits_chunk(grammar, node.kind()) {
            continue;
        }
        if let Some(chunk) = node_to_chunk(content, file_path, grammar, node) {
            chunks.push(chunk);
        }
    }

    if chunks.is_empty() {
        return Ok(fallback_chunk(content, file_path, grammar));
    }

    Ok(chunks)
}

/// Node kinds extracted per grammar
fn emits_chunk(grammar: Grammar, kind: &str) -> bool {
    match grammar {
        Grammar::TypeScript | Grammar::Tsx => matches!(
            kind,
            "function_declaration"
                | "method_definition"
                | "class_declaration"
                | "interface_declaration"
                | "type_alias_declaration"
                | "enum_declaration"
                | "variable_declaration"
                | "export_statement"
                | "import_statement"
                | "jsx_element"
                | "jsx_self_closing_element"
        ),
        Grammar::Java => matches!(kind, "method_declaration" | "class_declaration"),
    }
}

/// Kinds that carry an identifier in their `name` field
fn is_definition_kind(kind: &str) -> bool {
    matches!(
        kind,
        "function_declaration"
            | "method_definition"
            | "method_declaration"
            | "class_declaration"
            | "interface_declaration"
            | "type_alias_declaration"
            | "enum_declaration"
    )
}

fn node_to_chunk(content: &str, file_path: &str, grammar: Grammar, node: Node) -> Option<Chunk> {
    // A span that misses a char boundary skips this one node, never the file.
    let text = content.get(node.byte_range())?;

    let start_line = node.start_position().row + 1;
    let end_line = node.end_position().row + 1;

    let chunk = match Chunk::new(file_path, start_line, end_line, text, ChunkKind::Code) {
        Ok(chunk) => chunk.language(grammar.as_str()),
        Err(e) => {
            log::debug!("Dropping {} node in {file_path}: {e}", node.kind());
            return None;
        }
    };

    if is_definition_kind(node.kind()) {
        if let Some(name) = node
            .child_by_field_name("name")
            .and_then(|name_node| content.get(name_node.byte_range()))
        {
            return Some(chunk.symbol_name(name));
        }
    }

    Some(chunk)
}

fn fallback_chunk(content: &str, file_path: &str, grammar: Grammar) -> Vec<Chunk> {
    let end_line = content.lines().count().max(1);
    match Chunk::new(file_path, 1, end_line, content, ChunkKind::Code) {
        Ok(chunk) => vec![chunk.language(grammar.as_str())],
        Err(e) => {
            // Empty or whitespace-only input; nothing to emit.
            log::debug!("No fallback chunk for {file_path}: {e}");
            Vec::new()
        }
    }
}
