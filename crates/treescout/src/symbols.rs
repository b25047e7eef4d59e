//! Symbol extraction: the flat, normalized view over a file.
//!
//! Runs a profile's `symbol_extractor` pattern once and turns every match
//! into a [`SymbolRecord`]. Each alternative clause of the pattern tags its
//! root with `@definition.<kind>`, so the engine learns the symbol kind
//! from the capture label and never inspects grammar node kinds.

use tree_sitter::{Language, Tree};

use crate::cache::PatternCache;
use crate::comments::leading_comments;
use crate::profile::LanguageProfile;
use crate::query::for_each_match;
use crate::{ExtractError, ExtractWarning, Result, Span, SymbolKind, SymbolRecord};

/// Symbols extracted from one file, plus warnings for definitions that had
/// to be skipped. One malformed definition never poisons the rest of the
/// file, but it is never silently dropped either.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct SymbolExtraction {
    pub symbols: Vec<SymbolRecord>,
    pub warnings: Vec<ExtractWarning>,
}

/// Extract all symbol records from `tree` using the profile's
/// `symbol_extractor` pattern.
///
/// Fails with [`ExtractError::MissingPattern`] when the profile has no
/// symbol pattern; callers that prefer "zero symbols" can match on that
/// variant (the [`Engine::extract_file`](crate::Engine::extract_file)
/// convenience does).
///
/// One match produces at most one record, so two records with identical
/// (kind, name, range) are impossible; the same (kind, name) repeating
/// across different ranges is legitimate and preserved.
pub fn extract(
    profile: &LanguageProfile,
    grammar: &Language,
    tree: &Tree,
    source: &str,
    cache: &PatternCache,
) -> Result<SymbolExtraction> {
    let pattern = profile
        .symbol_extractor
        .ok_or_else(|| ExtractError::MissingPattern {
            language: profile.language_id.to_string(),
            slot: "symbol_extractor",
        })?;
    let query = cache.get_or_compile(profile.language_id, grammar, pattern)?;

    let mut out = SymbolExtraction::default();
    for_each_match(&query, tree.root_node(), source, |set| {
        let Some((kind, definition)) = set
            .entries()
            .iter()
            .find_map(|(label, node)| SymbolKind::from_capture_label(label).map(|k| (k, *node)))
        else {
            // Clause without a definition tag; nothing to record
            return;
        };

        let range = Span::from_node(&definition);
        let Some(name) = set.text("name", source) else {
            out.warnings.push(ExtractWarning {
                message: format!(
                    "{} definition at line {} has no name capture, skipping",
                    kind, range.start_line
                ),
                span: Some(range),
            });
            return;
        };

        out.symbols.push(SymbolRecord {
            kind,
            name: name.to_string(),
            range,
            body_range: set.node("body").map(|n| Span::from_node(&n)),
            doc_comment: leading_comments(&definition, source, profile.comment_kinds),
            owner: set.text("impl-type", source).map(str::to_string),
        });
    });

    Ok(out)
}
