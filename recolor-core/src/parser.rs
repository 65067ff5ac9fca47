//! TreeSitter-based JavaScript/TypeScript parser
//!
//! Parses config modules and component sources into tree-sitter trees. The
//! tree never gets printed back: rewrites are spliced into the original text
//! by byte range, so `ParsedSource` keeps the source alongside the tree.

use std::fs;
use std::path::Path;
use thiserror::Error;
use tree_sitter::{Node, Tree};

/// Supported languages and their extensions
pub static SUPPORTED_LANGUAGES: &[(&str, &[&str])] = &[
    ("javascript", &["js", "mjs", "cjs", "jsx"]),
    ("typescript", &["ts", "mts", "cts"]),
    ("tsx", &["tsx"]),
];

/// Errors that can occur during parsing
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse: {0}")]
    Parse(String),
    #[error("TreeSitter error: {0}")]
    TreeSitter(String),
    #[error("{file}:{line}:{column}: syntax error")]
    Syntax { file: String, line: usize, column: usize },
}

/// A parsed source file: the tree plus the text it was built from.
pub struct ParsedSource {
    pub tree: Tree,
    pub source: String,
    /// File path or "<string>"
    pub file_path: String,
    /// Language used for parsing
    pub language: String,
}

impl ParsedSource {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`.
    pub fn text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }
}

/// Detect language from file path extension
pub fn detect_language(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("");
    match ext.to_lowercase().as_str() {
        "js" | "mjs" | "cjs" | "jsx" => "javascript",
        "ts" | "mts" | "cts" => "typescript",
        "tsx" => "tsx",
        _ => "unknown",
    }
}

/// Get TreeSitter language for a language name
fn get_tree_sitter_language(lang: &str) -> Result<tree_sitter::Language, ParseError> {
    match lang {
        "javascript" | "js" | "jsx" => Ok(tree_sitter_javascript::LANGUAGE.into()),
        "typescript" | "ts" => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
        "tsx" => Ok(tree_sitter_typescript::LANGUAGE_TSX.into()),
        _ => Err(ParseError::UnsupportedLanguage(lang.to_string())),
    }
}

/// Language ABI version info
#[derive(Debug, Clone)]
pub struct LanguageAbiInfo {
    pub name: &'static str,
    /// Tree-sitter ABI version
    pub abi_version: usize,
}

/// Get ABI versions for the bundled grammars
pub fn get_language_abi_versions() -> Vec<LanguageAbiInfo> {
    vec![
        LanguageAbiInfo {
            name: "javascript",
            abi_version: tree_sitter::Language::from(tree_sitter_javascript::LANGUAGE).abi_version(),
        },
        LanguageAbiInfo {
            name: "typescript",
            abi_version: tree_sitter::Language::from(tree_sitter_typescript::LANGUAGE_TYPESCRIPT).abi_version(),
        },
        LanguageAbiInfo {
            name: "tsx",
            abi_version: tree_sitter::Language::from(tree_sitter_typescript::LANGUAGE_TSX).abi_version(),
        },
    ]
}

/// Parse a source string.
///
/// Tree-sitter recovers from syntax errors; we don't. A tree containing an
/// ERROR or MISSING node is rejected with the position of the first one.
pub fn parse_string(source: String, lang: &str, file_path: String) -> Result<ParsedSource, ParseError> {
    let language = get_tree_sitter_language(lang)?;

    let mut parser = tree_sitter::Parser::new();
    parser.set_language(&language)
        .map_err(|e| ParseError::TreeSitter(e.to_string()))?;

    let tree = parser.parse(&source, None)
        .ok_or_else(|| ParseError::Parse(format!("{}: parser returned no tree", file_path)))?;

    if tree.root_node().has_error() {
        let (line, column) = first_error_position(tree.root_node());
        return Err(ParseError::Syntax { file: file_path, line, column });
    }

    Ok(ParsedSource {
        tree,
        source,
        file_path,
        language: lang.to_string(),
    })
}

/// Parse a file, detecting the language from its extension unless overridden
pub fn parse_file(path: &Path, lang_override: Option<&str>) -> Result<ParsedSource, ParseError> {
    let source = fs::read_to_string(path).map_err(|e| ParseError::FileRead {
        path: path.display().to_string(),
        source: e,
    })?;
    let lang = lang_override.unwrap_or_else(|| detect_language(path.to_str().unwrap_or("")));
    parse_string(source, lang, path.display().to_string())
}

/// 1-based line:column of the first ERROR/MISSING node in document order.
fn first_error_position(root: Node<'_>) -> (usize, usize) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            return (pos.row + 1, pos.column + 1);
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    let pos = root.start_position();
    (pos.row + 1, pos.column + 1)
}
