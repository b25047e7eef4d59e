//! TypeScript language profile (metadata and hover support only).

use std::path::Path;

use crate::profile::LanguageProfile;

pub static PROFILE: LanguageProfile = LanguageProfile {
    language_id: "typescript",
    file_extensions: &["ts", "tsx"],
    test_file_matcher: is_test_path,
    hoverable: Some(HOVERABLE),
    class_like: None,
    method_like: None,
    block_comment: None,
    method_signature: None,
    structure: None,
    symbol_extractor: None,
    namespaces: &[&[
        "const",
        "function",
        "variable",
        "class",
        "interface",
        "enum",
        "field",
        "module",
    ]],
    built_in_types: &[
        "string",
        "number",
        "boolean",
        "any",
        "unknown",
        "never",
        "void",
        "object",
        "symbol",
        "bigint",
        "null",
        "undefined",
        "Array<T>",
        "Promise<T>",
        "Map<K, V>",
        "Set<T>",
    ],
    auto_select_inside_parent: &[],
    comment_kinds: &["comment"],
};

fn is_test_path(path: &Path) -> bool {
    let text = path.to_string_lossy();
    text.ends_with(".test.ts")
        || text.ends_with(".spec.ts")
        || text.ends_with(".test.tsx")
        || text.ends_with(".spec.tsx")
}

const HOVERABLE: &str = r#"
[(identifier)
 (property_identifier)
 (type_identifier)] @hoverable
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::PatternCache;
    use crate::grammars::{BundledGrammars, GrammarProvider};

    #[test]
    fn test_hoverable_compiles_against_typescript_grammar() {
        let cache = PatternCache::new();
        let grammar = BundledGrammars.language("typescript").unwrap();
        cache
            .get_or_compile("typescript", &grammar, HOVERABLE)
            .unwrap();
    }
}
