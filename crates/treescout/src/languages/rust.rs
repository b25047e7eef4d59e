//! Rust language profile.
//!
//! The only bundled profile filling every pattern slot; the other bundled
//! profiles are metadata-only and serve hover-style consumers.

use std::path::Path;

use crate::profile::LanguageProfile;

pub static PROFILE: LanguageProfile = LanguageProfile {
    language_id: "rust",
    file_extensions: &["rs"],
    test_file_matcher: is_test_path,
    hoverable: Some(HOVERABLE),
    class_like: Some(CLASS_LIKE),
    method_like: Some(METHOD_LIKE),
    block_comment: Some(BLOCK_COMMENT),
    method_signature: Some(METHOD_SIGNATURE),
    structure: Some(STRUCTURE),
    symbol_extractor: Some(SYMBOL_EXTRACTOR),
    namespaces: &[&[
        // variables
        "const",
        "function",
        "variable",
        // types
        "struct",
        "enum",
        "union",
        "typedef",
        "interface",
        // fields
        "field",
        "enumerator",
        // namespacing
        "module",
        // misc
        "label",
        "lifetime",
    ]],
    built_in_types: &[
        "bool",
        "char",
        "str",
        "i8",
        "i16",
        "i32",
        "i64",
        "i128",
        "isize",
        "u8",
        "u16",
        "u32",
        "u64",
        "u128",
        "usize",
        "f32",
        "f64",
        "()",
        "String",
        "&str",
        "&[T]",
        "Vec<T>",
        "HashMap<K, V>",
        "HashSet<T>",
        "Option<T>",
        "Result<T, E>",
        "Box<T>",
        "impl Iterator",
    ],
    auto_select_inside_parent: &[],
    comment_kinds: &["line_comment", "block_comment"],
};

fn is_test_path(path: &Path) -> bool {
    path.to_string_lossy().ends_with("test.rs")
        || path.components().any(|c| c.as_os_str() == "tests")
}

const HOVERABLE: &str = r#"
[(identifier)
 (shorthand_field_identifier)
 (field_identifier)
 (type_identifier)] @hoverable
"#;

const CLASS_LIKE: &str = r#"
(struct_item (type_identifier) @type-name) @type-declaration
"#;

const METHOD_LIKE: &str = r#"
(function_item (identifier) @name.definition.method) @definition.method
"#;

const BLOCK_COMMENT: &str = r#"
(block_comment) @doc-comment
"#;

const METHOD_SIGNATURE: &str = r#"
(function_item
  name: (identifier) @function-name
  return_type: (type_identifier)? @function-return-type) @function
"#;

// One alternative clause per definition kind; the clause root carries the
// @definition.<kind> tag the engine keys on. Leading comments are attached
// by the comment-association pass, not captured here, so every definition
// yields exactly one match.
const SYMBOL_EXTRACTOR: &str = r#"
(struct_item
  name: (type_identifier) @name
  body: [(field_declaration_list) (ordered_field_declaration_list)]? @body) @definition.struct

(source_file
  (function_item
    name: (identifier) @name
    body: (block) @body) @definition.function)

(impl_item
  type: (type_identifier) @impl-type
  body: (declaration_list
    (function_item
      name: (identifier) @name
      body: (block) @body) @definition.method))

(trait_item
  name: (type_identifier) @name
  body: (declaration_list) @body) @definition.trait

(enum_item
  name: (type_identifier) @name
  body: (enum_variant_list) @body) @definition.enum

(const_item
  name: (identifier) @name) @definition.constant

(field_declaration
  name: (field_identifier) @name) @definition.field

(mod_item
  name: (identifier) @name
  body: (declaration_list)? @body) @definition.module
"#;

const STRUCTURE: &str = r#"
(use_declaration
  argument: (_) @use-path)

(struct_item
  name: (type_identifier) @struct-name
  body: (field_declaration_list
    (field_declaration
      name: (field_identifier) @struct-field-name
      type: (_) @struct-field-type))?)

(trait_item
  name: (type_identifier) @trait-name
  body: (declaration_list
    (function_signature_item
      name: (identifier) @trait-method-name
      parameters: (parameters) @trait-method-params
      return_type: (_)? @trait-method-return-type))?)

(impl_item
  trait: (type_identifier)? @impl-trait-name
  type: (type_identifier) @impl-type-name
  body: (declaration_list
    (function_item
      name: (identifier) @impl-method-name
      parameters: (parameters) @impl-method-params
      return_type: (_)? @impl-method-return-type
      body: (_) @impl-method-body)?))

(function_item
  name: (identifier) @function-name
  parameters: (parameters) @function-params
  return_type: (_)? @function-return-type
  body: (_) @function-body)

(parameter
  pattern: (identifier) @param-name
  type: (_) @param-type)
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::PatternCache;
    use crate::testutil::rust_grammar;

    #[test]
    fn test_all_slots_compile() {
        let cache = PatternCache::new();
        let grammar = rust_grammar();
        for pattern in [
            HOVERABLE,
            CLASS_LIKE,
            METHOD_LIKE,
            BLOCK_COMMENT,
            METHOD_SIGNATURE,
            STRUCTURE,
            SYMBOL_EXTRACTOR,
        ] {
            cache.get_or_compile("rust", &grammar, pattern).unwrap();
        }
    }

    #[test]
    fn test_metadata() {
        assert_eq!(PROFILE.language_id, "rust");
        assert!(PROFILE.file_extensions.contains(&"rs"));
        assert!(PROFILE.comment_kinds.contains(&"line_comment"));
        assert!(PROFILE.namespaces[0].contains(&"struct"));
    }
}
