//! Go language profile (metadata and hover support only).

use std::path::Path;

use crate::profile::LanguageProfile;

pub static PROFILE: LanguageProfile = LanguageProfile {
    language_id: "go",
    file_extensions: &["go"],
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
        "struct",
        "interface",
        "field",
        "module",
    ]],
    built_in_types: &[
        "bool", "string", "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16",
        "uint32", "uint64", "uintptr", "byte", "rune", "float32", "float64", "complex64",
        "complex128", "error",
    ],
    auto_select_inside_parent: &[],
    comment_kinds: &["comment"],
};

fn is_test_path(path: &Path) -> bool {
    path.to_string_lossy().ends_with("_test.go")
}

const HOVERABLE: &str = r#"
[(identifier)
 (type_identifier)
 (field_identifier)] @hoverable
"#;
