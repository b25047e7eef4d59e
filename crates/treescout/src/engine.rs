//! Engine facade: grammar provider + pattern cache + profile registry.
//!
//! The engine is synchronous and stateless per call; the pattern cache is
//! the only shared mutable state, and it is safe under concurrent access.
//! Parallelism is the caller's business, safe at file granularity.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tree_sitter::{Language, Query, Tree};

use crate::cache::PatternCache;
use crate::grammars::{parse_source, BundledGrammars, GrammarProvider};
use crate::profile::{LanguageProfile, PatternSlot, ProfileRegistry};
use crate::structure::{self, StructureModel};
use crate::symbols::{self, SymbolExtraction};
use crate::{ExtractError, ExtractWarning, FileOutcome, Result, SymbolRecord};

/// Everything extracted from one file: the flat symbol view and the nested
/// structure view, built over the same tree.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct FileExtraction {
    pub language: String,
    pub symbols: Vec<SymbolRecord>,
    pub structure: StructureModel,
    pub warnings: Vec<ExtractWarning>,
}

/// The extraction engine.
///
/// Holds the profile registry, the shared pattern cache, and a grammar
/// provider. The default provider serves the grammars bundled with this
/// crate; tests and embedders can inject their own.
pub struct Engine<G: GrammarProvider = BundledGrammars> {
    grammars: G,
    cache: PatternCache,
    registry: ProfileRegistry,
}

impl Engine<BundledGrammars> {
    pub fn new() -> Self {
        Self::with_grammars(BundledGrammars)
    }
}

impl Default for Engine<BundledGrammars> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: GrammarProvider> Engine<G> {
    pub fn with_grammars(grammars: G) -> Self {
        Self {
            grammars,
            cache: PatternCache::new(),
            registry: ProfileRegistry::bundled(),
        }
    }

    pub fn with_registry(grammars: G, registry: ProfileRegistry) -> Self {
        Self {
            grammars,
            cache: PatternCache::new(),
            registry,
        }
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &PatternCache {
        &self.cache
    }

    fn profile(&self, language_id: &str) -> Result<&'static LanguageProfile> {
        self.registry
            .by_language(language_id)
            .ok_or_else(|| ExtractError::UnknownLanguage(language_id.to_string()))
    }

    fn grammar(&self, language_id: &str) -> Result<Language> {
        self.grammars
            .language(language_id)
            .ok_or_else(|| ExtractError::UnknownLanguage(language_id.to_string()))
    }

    /// Parse source text for a language.
    pub fn parse(&self, language_id: &str, source: &str) -> Result<Tree> {
        let grammar = self.grammar(language_id)?;
        parse_source(&grammar, source)
    }

    /// Compiled pattern for one of a profile's slots, through the shared
    /// cache. Slots are compiled strictly on first use.
    pub fn compiled_pattern(&self, language_id: &str, slot: PatternSlot) -> Result<Arc<Query>> {
        let profile = self.profile(language_id)?;
        let grammar = self.grammar(language_id)?;
        let pattern = profile
            .pattern(slot)
            .ok_or_else(|| ExtractError::MissingPattern {
                language: profile.language_id.to_string(),
                slot: slot.name(),
            })?;
        self.cache
            .get_or_compile(profile.language_id, &grammar, pattern)
    }

    /// Run the symbol extractor over an already-parsed tree.
    pub fn extract_symbols(
        &self,
        language_id: &str,
        tree: &Tree,
        source: &str,
    ) -> Result<SymbolExtraction> {
        let profile = self.profile(language_id)?;
        let grammar = self.grammar(language_id)?;
        symbols::extract(profile, &grammar, tree, source, &self.cache)
    }

    /// Run the structure extractor over an already-parsed tree.
    pub fn extract_structure(
        &self,
        language_id: &str,
        tree: &Tree,
        source: &str,
    ) -> Result<StructureModel> {
        let profile = self.profile(language_id)?;
        let grammar = self.grammar(language_id)?;
        structure::extract(profile, &grammar, tree, source, &self.cache)
    }

    /// Parse a file's source and run both extractors.
    ///
    /// The profile is chosen by file extension. Profiles without extractor
    /// patterns (hover-only languages) yield empty symbol and structure
    /// views rather than failing; every other error propagates.
    pub fn extract_file(&self, path: &Path, source: &str) -> Result<FileExtraction> {
        let profile = self.registry.for_path(path).ok_or_else(|| {
            ExtractError::UnknownLanguage(path.to_string_lossy().into_owned())
        })?;
        let grammar = self.grammar(profile.language_id)?;
        let tree = parse_source(&grammar, source)?;

        let symbols = match symbols::extract(profile, &grammar, &tree, source, &self.cache) {
            Ok(extraction) => extraction,
            Err(ExtractError::MissingPattern { .. }) => SymbolExtraction::default(),
            Err(e) => return Err(e),
        };
        let structure = match structure::extract(profile, &grammar, &tree, source, &self.cache) {
            Ok(model) => model,
            Err(ExtractError::MissingPattern { .. }) => StructureModel::default(),
            Err(e) => return Err(e),
        };

        Ok(FileExtraction {
            language: profile.language_id.to_string(),
            symbols: symbols.symbols,
            structure,
            warnings: symbols.warnings,
        })
    }

    /// Read and extract a batch of files, isolating per-file failures.
    ///
    /// One unreadable or unsupported file never stops the batch; its error
    /// is recorded in the outcome list and processing continues.
    pub fn extract_files<I>(&self, paths: I) -> Vec<FileOutcome>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        paths
            .into_iter()
            .map(|path| {
                let outcome = std::fs::read_to_string(&path)
                    .map_err(ExtractError::from)
                    .and_then(|source| self.extract_file(&path, &source));
                if let Err(e) = &outcome {
                    tracing::warn!("Failed to extract {:?}: {}", path, e);
                }
                (path, outcome)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SymbolKind;
    use std::io::Write;

    /// Provider whose lookups always fail, for unknown-language paths.
    struct NoGrammars;

    impl GrammarProvider for NoGrammars {
        fn language(&self, _language_id: &str) -> Option<Language> {
            None
        }
    }

    #[test]
    fn test_parse_and_extract_symbols() {
        let engine = Engine::new();
        let source = "// entry\nfn main() {}\n";
        let tree = engine.parse("rust", source).unwrap();
        let out = engine.extract_symbols("rust", &tree, source).unwrap();
        assert_eq!(out.symbols.len(), 1);
        assert_eq!(out.symbols[0].name, "main");
        assert_eq!(out.symbols[0].doc_comment.as_deref(), Some("// entry"));
    }

    #[test]
    fn test_unknown_language_id() {
        let engine = Engine::new();
        assert!(matches!(
            engine.parse("cobol", "IDENTIFICATION DIVISION."),
            Err(ExtractError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn test_failed_grammar_lookup_is_unknown_language() {
        // Profile exists but the grammar provider cannot serve it
        let engine = Engine::with_grammars(NoGrammars);
        let tree = crate::testutil::rust_tree("fn f() {}\n");
        let result = engine.extract_symbols("rust", &tree, "fn f() {}\n");
        assert!(matches!(result, Err(ExtractError::UnknownLanguage(ref l)) if l == "rust"));
    }

    #[test]
    fn test_extract_file_both_views() {
        let engine = Engine::new();
        let source = "struct Point { x: i32 }\nimpl Point { fn get(&self) -> i32 { self.x } }\n";
        let out = engine
            .extract_file(&PathBuf::from("point.rs"), source)
            .unwrap();
        assert_eq!(out.language, "rust");
        assert!(out.symbols.iter().any(|s| s.kind == SymbolKind::Struct));
        assert!(out.symbols.iter().any(|s| s.kind == SymbolKind::Method));
        assert_eq!(out.structure.types.len(), 1);
        assert_eq!(out.structure.impls.len(), 1);
    }

    #[test]
    fn test_extract_file_unsupported_extension() {
        let engine = Engine::new();
        let result = engine.extract_file(&PathBuf::from("notes.txt"), "hello");
        assert!(matches!(result, Err(ExtractError::UnknownLanguage(_))));
    }

    #[test]
    fn test_extract_file_metadata_only_profile() {
        // Go has no extractor slots; both views degrade to empty
        let engine = Engine::new();
        let out = engine
            .extract_file(&PathBuf::from("main.go"), "package main\nfunc main() {}\n")
            .unwrap();
        assert_eq!(out.language, "go");
        assert!(out.symbols.is_empty());
        assert_eq!(out.structure, StructureModel::default());
    }

    #[test]
    fn test_compiled_pattern_slot() {
        let engine = Engine::new();
        let hover = engine
            .compiled_pattern("rust", PatternSlot::Hoverable)
            .unwrap();
        let again = engine
            .compiled_pattern("rust", PatternSlot::Hoverable)
            .unwrap();
        assert!(Arc::ptr_eq(&hover, &again));
        assert!(matches!(
            engine.compiled_pattern("go", PatternSlot::SymbolExtractor),
            Err(ExtractError::MissingPattern { .. })
        ));
    }

    #[test]
    fn test_batch_isolates_failures() {
        let dir = tempfile::TempDir::new().unwrap();

        let good = dir.path().join("good.rs");
        writeln!(std::fs::File::create(&good).unwrap(), "fn ok() {{}}").unwrap();

        let unsupported = dir.path().join("data.bin");
        writeln!(std::fs::File::create(&unsupported).unwrap(), "junk").unwrap();

        let missing = dir.path().join("missing.rs");

        let engine = Engine::new();
        let outcomes = engine.extract_files(vec![missing, unsupported, good.clone()]);
        assert_eq!(outcomes.len(), 3);
        assert!(matches!(outcomes[0].1, Err(ExtractError::Io(_))));
        assert!(matches!(outcomes[1].1, Err(ExtractError::UnknownLanguage(_))));
        // The batch kept going: the last file extracted fine
        let extraction = outcomes[2].1.as_ref().unwrap();
        assert_eq!(extraction.symbols[0].name, "ok");
    }

    #[test]
    fn test_cache_shared_across_files() {
        let engine = Engine::new();
        for source in ["fn a() {}\n", "fn b() {}\n", "struct C;\n"] {
            let tree = engine.parse("rust", source).unwrap();
            engine.extract_symbols("rust", &tree, source).unwrap();
        }
        // One symbol pattern, compiled once for three files
        assert_eq!(engine.cache().compile_count(), 1);
    }
}
