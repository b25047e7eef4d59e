//! treescout: query-driven symbol and structure extraction using tree-sitter.
//!
//! This crate provides the building blocks for language-agnostic code
//! intelligence (hover info, outline views, retrieval indexing):
//! - Declarative per-language profiles holding raw pattern text and metadata
//! - A process-lifetime pattern cache with single-flight compilation
//! - A symbol extractor producing normalized [`SymbolRecord`]s
//! - A structure extractor producing a per-file [`StructureModel`]
//!
//! The engine depends only on capture-label conventions (`@name`, `@body`,
//! `@definition.<kind>`, ...), never on any grammar's node kinds, so adding
//! a language means writing a profile, not touching the engine.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod cache;
pub mod comments;
pub mod engine;
pub mod grammars;
pub mod languages;
pub mod profile;
pub mod query;
pub mod structure;
pub mod symbols;

// Re-export main types
pub use cache::PatternCache;
pub use engine::{Engine, FileExtraction};
pub use grammars::{parse_source, BundledGrammars, GrammarProvider};
pub use profile::{LanguageProfile, PatternSlot, ProfileRegistry};
pub use query::{for_each_match, CaptureSet};
pub use structure::{
    FieldDecl, FunctionDecl, ImplBlock, MethodDecl, MethodSig, Param, StructureModel, TraitDecl,
    TypeDecl,
};
pub use symbols::SymbolExtraction;

/// A byte range in a source file, with 1-indexed line numbers for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start_line: u32, // 1-indexed
    pub end_line: u32,   // 1-indexed
}

impl Span {
    pub fn from_node(node: &tree_sitter::Node) -> Self {
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: (node.start_position().row + 1) as u32,
            end_line: (node.end_position().row + 1) as u32,
        }
    }
}

/// The kind of definition a symbol record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolKind {
    Struct,
    Function,
    Method,
    Trait,
    Enum,
    Constant,
    Field,
    Module,
}

impl SymbolKind {
    /// Map a `@definition.<kind>` capture label to a symbol kind.
    ///
    /// This lookup table is the whole engine/profile contract for symbol
    /// kinds: a profile tags each alternative clause of its symbol pattern
    /// with one of these labels and the engine never branches on grammar
    /// node kinds.
    pub fn from_capture_label(label: &str) -> Option<Self> {
        match label {
            "definition.struct" => Some(SymbolKind::Struct),
            "definition.function" => Some(SymbolKind::Function),
            "definition.method" => Some(SymbolKind::Method),
            "definition.trait" => Some(SymbolKind::Trait),
            "definition.enum" => Some(SymbolKind::Enum),
            "definition.constant" => Some(SymbolKind::Constant),
            "definition.field" => Some(SymbolKind::Field),
            "definition.module" => Some(SymbolKind::Module),
            _ => None,
        }
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Struct => write!(f, "struct"),
            SymbolKind::Function => write!(f, "function"),
            SymbolKind::Method => write!(f, "method"),
            SymbolKind::Trait => write!(f, "trait"),
            SymbolKind::Enum => write!(f, "enum"),
            SymbolKind::Constant => write!(f, "constant"),
            SymbolKind::Field => write!(f, "field"),
            SymbolKind::Module => write!(f, "module"),
        }
    }
}

/// A normalized, language-agnostic description of one definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    /// Kind of definition
    pub kind: SymbolKind,
    /// Short name: "process_payment"
    pub name: String,
    /// Range of the whole definition
    pub range: Span,
    /// Range of the definition body, when the pattern captured one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_range: Option<Span>,
    /// Leading comment block, delimiters preserved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,
    /// Enclosing type name, for methods inside impl/extension blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// A non-fatal problem found during extraction.
///
/// One malformed definition never aborts the rest of the file; it is skipped
/// and reported here instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractWarning {
    /// Warning message describing the issue
    pub message: String,
    /// Optional location in the source file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

/// Errors that can occur during extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("No grammar or profile available for language: {0}")]
    UnknownLanguage(String),

    #[error("Pattern for {language} failed to compile at offset {offset}: {message}")]
    PatternCompile {
        language: String,
        offset: usize,
        message: String,
    },

    #[error("Profile for {language} has no `{slot}` pattern")]
    MissingPattern {
        language: String,
        slot: &'static str,
    },

    #[error("Failed to parse source: {0}")]
    Parse(String),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Absolute path plus per-file outcome, for batch callers.
pub type FileOutcome = (PathBuf, Result<FileExtraction>);

#[cfg(test)]
pub(crate) mod testutil {
    /// Parse Rust source into a tree for extractor tests.
    pub fn rust_tree(source: &str) -> tree_sitter::Tree {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .unwrap();
        parser.parse(source, None).unwrap()
    }

    pub fn rust_grammar() -> tree_sitter::Language {
        tree_sitter_rust::LANGUAGE.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_from_node() {
        let tree = testutil::rust_tree("fn main() {}\n");
        let span = Span::from_node(&tree.root_node());
        assert_eq!(span.start_byte, 0);
        assert_eq!(span.start_line, 1);
    }

    #[test]
    fn test_symbol_kind_display() {
        assert_eq!(format!("{}", SymbolKind::Function), "function");
        assert_eq!(format!("{}", SymbolKind::Struct), "struct");
    }

    #[test]
    fn test_symbol_kind_from_capture_label() {
        assert_eq!(
            SymbolKind::from_capture_label("definition.method"),
            Some(SymbolKind::Method)
        );
        assert_eq!(
            SymbolKind::from_capture_label("definition.module"),
            Some(SymbolKind::Module)
        );
        assert_eq!(SymbolKind::from_capture_label("name"), None);
        assert_eq!(SymbolKind::from_capture_label("definition.widget"), None);
    }
}
