//! Grammar lookup and parsing helpers.
//!
//! The engine never links a profile to a grammar directly; it asks a
//! [`GrammarProvider`] by language id. A failed lookup means "no profile
//! usable" and surfaces as
//! [`ExtractError::UnknownLanguage`](crate::ExtractError::UnknownLanguage),
//! never a crash.

use tree_sitter::{Language, Parser, Tree};

use crate::{ExtractError, Result};

/// External provider of grammar handles, keyed by language id.
pub trait GrammarProvider: Send + Sync {
    /// The grammar for a language id, or `None` when the id is unknown.
    fn language(&self, language_id: &str) -> Option<Language>;
}

/// Provider backed by the grammar crates bundled with treescout.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledGrammars;

impl GrammarProvider for BundledGrammars {
    fn language(&self, language_id: &str) -> Option<Language> {
        match language_id {
            "rust" => Some(tree_sitter_rust::LANGUAGE.into()),
            "go" => Some(tree_sitter_go::LANGUAGE.into()),
            "python" => Some(tree_sitter_python::LANGUAGE.into()),
            "typescript" => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
            _ => None,
        }
    }
}

/// Parse source text with the given grammar.
///
/// Thin wrapper over the external parser so the CLI and tests share one
/// entry point; the extraction engine itself only consumes trees.
pub fn parse_source(grammar: &Language, source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(grammar)
        .map_err(|e| ExtractError::Parse(e.to_string()))?;
    parser
        .parse(source, None)
        .ok_or_else(|| ExtractError::Parse("parser produced no tree".to_string()))
}
