//! Language profiles: the declarative per-language bundle of pattern text
//! and metadata the extraction engine runs against.
//!
//! Profiles are immutable static data created at process start. Pattern
//! slots hold raw query text and are compiled lazily, on first use, through
//! the [`PatternCache`](crate::PatternCache) — a slot an integration never
//! touches costs nothing.
//!
//! # Capture-label contract
//!
//! The engine reads these labels and nothing else:
//! - `symbol_extractor`: one alternative clause per definition kind, the
//!   clause root captured as `@definition.<kind>` (see
//!   [`SymbolKind::from_capture_label`](crate::SymbolKind::from_capture_label)),
//!   plus `@name`, optional `@body`, and `@impl-type` on method clauses for
//!   owner attribution.
//! - `structure`: `@use-path`, `@struct-name`/`@struct-field-name`/
//!   `@struct-field-type`, `@trait-name`/`@trait-method-*`, `@impl-type-name`/
//!   `@impl-trait-name`/`@impl-method-*`, `@function-*`, and
//!   `@param-name`/`@param-type`.

use std::path::Path;

/// Named pattern slots a profile may fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSlot {
    Hoverable,
    ClassLike,
    MethodLike,
    BlockComment,
    MethodSignature,
    Structure,
    SymbolExtractor,
}

impl PatternSlot {
    pub fn name(&self) -> &'static str {
        match self {
            PatternSlot::Hoverable => "hoverable",
            PatternSlot::ClassLike => "class_like",
            PatternSlot::MethodLike => "method_like",
            PatternSlot::BlockComment => "block_comment",
            PatternSlot::MethodSignature => "method_signature",
            PatternSlot::Structure => "structure",
            PatternSlot::SymbolExtractor => "symbol_extractor",
        }
    }
}

/// A per-language extraction profile.
///
/// All pattern slots hold raw pattern text; `None` means the language does
/// not support that capability and callers get
/// [`ExtractError::MissingPattern`](crate::ExtractError::MissingPattern)
/// when they require it.
pub struct LanguageProfile {
    /// Stable language identifier, e.g. "rust"
    pub language_id: &'static str,
    /// File extensions (lowercase, without the dot) handled by this profile
    pub file_extensions: &'static [&'static str],
    /// Predicate deciding whether a path is a test file for this language
    pub test_file_matcher: fn(&Path) -> bool,

    pub hoverable: Option<&'static str>,
    pub class_like: Option<&'static str>,
    pub method_like: Option<&'static str>,
    pub block_comment: Option<&'static str>,
    pub method_signature: Option<&'static str>,
    pub structure: Option<&'static str>,
    pub symbol_extractor: Option<&'static str>,

    /// Kind tags grouped into precedence tiers, for downstream ranking
    pub namespaces: &'static [&'static [&'static str]],
    /// Primitive/collection type spellings that need no cross-file resolution
    pub built_in_types: &'static [&'static str],
    /// Node kinds whose selection range should expand to the parent
    pub auto_select_inside_parent: &'static [&'static str],
    /// Node kinds the comment-association pass accepts as leading comments
    pub comment_kinds: &'static [&'static str],
}

impl LanguageProfile {
    /// Raw pattern text for a slot, if the profile fills it.
    pub fn pattern(&self, slot: PatternSlot) -> Option<&'static str> {
        match slot {
            PatternSlot::Hoverable => self.hoverable,
            PatternSlot::ClassLike => self.class_like,
            PatternSlot::MethodLike => self.method_like,
            PatternSlot::BlockComment => self.block_comment,
            PatternSlot::MethodSignature => self.method_signature,
            PatternSlot::Structure => self.structure,
            PatternSlot::SymbolExtractor => self.symbol_extractor,
        }
    }

    /// Exact-spelling membership test against the built-in type vocabulary.
    ///
    /// Deliberately blunt: `Vec<T>` matches only that literal spelling,
    /// never `Vec<String>`. Callers needing generic unification must build
    /// it on top of this primitive.
    pub fn is_built_in(&self, type_spelling: &str) -> bool {
        self.built_in_types.contains(&type_spelling)
    }

    /// Whether the given path looks like a test file for this language.
    pub fn is_test_file(&self, path: &Path) -> bool {
        (self.test_file_matcher)(path)
    }
}

impl std::fmt::Debug for LanguageProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageProfile")
            .field("language_id", &self.language_id)
            .field("file_extensions", &self.file_extensions)
            .finish_non_exhaustive()
    }
}

/// Registry of known profiles, looked up by language id or file extension.
pub struct ProfileRegistry {
    profiles: Vec<&'static LanguageProfile>,
}

impl ProfileRegistry {
    /// Registry holding the profiles bundled with this crate.
    pub fn bundled() -> Self {
        Self {
            profiles: vec![
                &crate::languages::rust::PROFILE,
                &crate::languages::go::PROFILE,
                &crate::languages::python::PROFILE,
                &crate::languages::typescript::PROFILE,
            ],
        }
    }

    /// Registry over a caller-supplied profile set.
    pub fn with_profiles(profiles: Vec<&'static LanguageProfile>) -> Self {
        Self { profiles }
    }

    pub fn by_language(&self, language_id: &str) -> Option<&'static LanguageProfile> {
        self.profiles
            .iter()
            .copied()
            .find(|p| p.language_id == language_id)
    }

    pub fn by_extension(&self, extension: &str) -> Option<&'static LanguageProfile> {
        let extension = extension.to_lowercase();
        self.profiles
            .iter()
            .copied()
            .find(|p| p.file_extensions.contains(&extension.as_str()))
    }

    /// Profile for a path, by its extension. `None` means the caller should
    /// skip the file.
    pub fn for_path(&self, path: &Path) -> Option<&'static LanguageProfile> {
        let extension = path.extension()?.to_str()?;
        self.by_extension(extension)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static LanguageProfile> + '_ {
        self.profiles.iter().copied()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::bundled()
    }
}
