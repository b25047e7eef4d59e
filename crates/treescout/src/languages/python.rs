//! Python language profile (metadata and hover support only).

use std::path::Path;

use crate::profile::LanguageProfile;

pub static PROFILE: LanguageProfile = LanguageProfile {
    language_id: "python",
    file_extensions: &["py", "pyi"],
    test_file_matcher: is_test_path,
    hoverable: Some(HOVERABLE),
    class_like: None,
    method_like: None,
    block_comment: None,
    method_signature: None,
    structure: None,
    symbol_extractor: None,
    namespaces: &[&[
        "const", "function", "variable", "class", "field", "module",
    ]],
    built_in_types: &[
        "int", "float", "complex", "bool", "str", "bytes", "list", "dict", "set", "tuple", "None",
    ],
    auto_select_inside_parent: &[],
    comment_kinds: &["comment"],
};

fn is_test_path(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.starts_with("test_") || name.ends_with("_test.py")
}

const HOVERABLE: &str = r#"
(identifier) @hoverable
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::PatternCache;
    use crate::grammars::{BundledGrammars, GrammarProvider};
    use std::path::PathBuf;

    #[test]
    fn test_hoverable_compiles_against_python_grammar() {
        let cache = PatternCache::new();
        let grammar = BundledGrammars.language("python").unwrap();
        cache
            .get_or_compile("python", &grammar, HOVERABLE)
            .unwrap();
    }

    #[test]
    fn test_test_file_detection() {
        assert!(PROFILE.is_test_file(&PathBuf::from("pkg/test_views.py")));
        assert!(PROFILE.is_test_file(&PathBuf::from("pkg/views_test.py")));
        assert!(!PROFILE.is_test_file(&PathBuf::from("pkg/views.py")));
    }
}
