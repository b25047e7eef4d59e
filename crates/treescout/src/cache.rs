//! Process-lifetime cache of compiled patterns.
//!
//! Pattern compilation is the expensive step of query-driven extraction and
//! the same pattern text runs against every file of a language, so compiled
//! patterns are compiled once per (language id, pattern text) pair and
//! shared from then on. The cache is an injected dependency rather than a
//! hidden global, so tests can substitute a fresh cache per test.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use tree_sitter::{Language, Query};

use crate::{ExtractError, Result};

/// A cached compile failure. Identical text always fails identically, so
/// the failure is cached alongside successes and never retried.
#[derive(Debug, Clone)]
struct CompileFailure {
    offset: usize,
    message: String,
}

type Slot = Arc<OnceLock<std::result::Result<Arc<Query>, CompileFailure>>>;

/// Shared cache of compiled patterns, keyed by (language id, pattern text).
///
/// Safe under concurrent access: callers racing on the same key block on a
/// single in-flight compilation (single-flight), callers on different keys
/// never block each other because the map lock is released before compiling.
#[derive(Default)]
pub struct PatternCache {
    slots: Mutex<HashMap<(String, String), Slot>>,
    compiles: AtomicUsize,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the compiled pattern for (language id, pattern text),
    /// compiling it on first use.
    ///
    /// Fails with [`ExtractError::PatternCompile`] when the text is not
    /// valid for the language's grammar; the failure is a profile-authoring
    /// bug, surfaced immediately and never retried.
    pub fn get_or_compile(
        &self,
        language_id: &str,
        grammar: &Language,
        pattern_text: &str,
    ) -> Result<Arc<Query>> {
        let slot = {
            let mut slots = self.slots.lock().expect("pattern cache lock poisoned");
            slots
                .entry((language_id.to_string(), pattern_text.to_string()))
                .or_default()
                .clone()
        };

        let compiled = slot.get_or_init(|| {
            self.compiles.fetch_add(1, Ordering::SeqCst);
            Query::new(grammar, pattern_text)
                .map(Arc::new)
                .map_err(|e| CompileFailure {
                    offset: e.offset,
                    message: e.message,
                })
        });

        match compiled {
            Ok(query) => Ok(Arc::clone(query)),
            Err(failure) => Err(ExtractError::PatternCompile {
                language: language_id.to_string(),
                offset: failure.offset,
                message: failure.message.clone(),
            }),
        }
    }

    /// Number of times the pattern compiler has actually been invoked.
    pub fn compile_count(&self) -> usize {
        self.compiles.load(Ordering::SeqCst)
    }

    /// Number of cached (language id, pattern text) entries.
    pub fn len(&self) -> usize {
        self.slots.lock().expect("pattern cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::rust_grammar;
    use std::sync::Barrier;

    const PATTERN: &str = "(function_item name: (identifier) @name) @fn";

    #[test]
    fn test_compiles_once_for_equal_keys() {
        let cache = PatternCache::new();
        let grammar = rust_grammar();

        let a = cache.get_or_compile("rust", &grammar, PATTERN).unwrap();
        let b = cache.get_or_compile("rust", &grammar, PATTERN).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.compile_count(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_keys_compile_separately() {
        let cache = PatternCache::new();
        let grammar = rust_grammar();

        let a = cache.get_or_compile("rust", &grammar, PATTERN).unwrap();
        let b = cache
            .get_or_compile("rust", &grammar, "(struct_item) @s")
            .unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.compile_count(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_single_flight_under_concurrency() {
        let cache = PatternCache::new();
        let grammar = rust_grammar();
        let barrier = Barrier::new(8);

        let queries: Vec<Arc<Query>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        cache.get_or_compile("rust", &grammar, PATTERN).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for query in &queries[1..] {
            assert!(Arc::ptr_eq(&queries[0], query));
        }
        assert_eq!(cache.compile_count(), 1);
    }

    #[test]
    fn test_compile_error_surfaced_and_cached() {
        let cache = PatternCache::new();
        let grammar = rust_grammar();

        let first = cache.get_or_compile("rust", &grammar, "(not_a_node_kind) @x");
        assert!(matches!(
            first,
            Err(ExtractError::PatternCompile { ref language, .. }) if language == "rust"
        ));

        // Second lookup reports the same failure without recompiling
        let second = cache.get_or_compile("rust", &grammar, "(not_a_node_kind) @x");
        assert!(second.is_err());
        assert_eq!(cache.compile_count(), 1);
    }
}
