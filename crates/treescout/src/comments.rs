//! Leading-comment association.
//!
//! Given a definition node, collects the contiguous run of comment siblings
//! immediately before it and concatenates them as the definition's
//! documentation. The walk inspects sibling *kinds* only: blank lines
//! between a comment and the definition do not disqualify it, since
//! whitespace never appears as a sibling node. That is a deliberate design
//! choice, not an oversight.

use tree_sitter::Node;

/// Collect the leading comment block of `node`, delimiters preserved.
///
/// Walks the immediately preceding siblings in reverse, accepting only the
/// profile's recognized comment kinds, and stops at the first non-comment
/// sibling (an attribute, another definition) or at the start of the
/// enclosing node's children. Accepted comments are returned in original
/// order, joined by newlines, without reformatting. Returns `None` when no
/// comment precedes the node.
pub fn leading_comments(node: &Node, source: &str, comment_kinds: &[&str]) -> Option<String> {
    let mut comments = Vec::new();

    let mut sibling = node.prev_sibling();
    while let Some(sib) = sibling {
        if !comment_kinds.contains(&sib.kind()) {
            break;
        }
        if let Ok(text) = sib.utf8_text(source.as_bytes()) {
            // Some grammars include the line terminator in a comment node's
            // byte range; drop it so the join below stays single-newline
            comments.push(text.strip_suffix('\n').unwrap_or(text));
        }
        sibling = sib.prev_sibling();
    }

    if comments.is_empty() {
        return None;
    }
    comments.reverse();
    Some(comments.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::rust_tree;

    const RUST_COMMENTS: &[&str] = &["line_comment", "block_comment"];

    /// Find the first node of `kind` in a depth-first walk.
    fn find_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
        if node.kind() == kind {
            return Some(node);
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if let Some(found) = find_kind(child, kind) {
                return Some(found);
            }
        }
        None
    }

    fn doc_for(source: &str, kind: &str) -> Option<String> {
        let tree = rust_tree(source);
        let node = find_kind(tree.root_node(), kind).unwrap();
        leading_comments(&node, source, RUST_COMMENTS)
    }

    #[test]
    fn test_single_line_comment() {
        assert_eq!(
            doc_for("// doc\nfn foo() {}\n", "function_item"),
            Some("// doc".to_string())
        );
    }

    #[test]
    fn test_no_comment_is_absent() {
        assert_eq!(doc_for("fn bar() {}\n", "function_item"), None);
    }

    #[test]
    fn test_contiguous_comments_joined_in_order() {
        let source = "// first\n// second\n/* third */\nstruct S;\n";
        assert_eq!(
            doc_for(source, "struct_item"),
            Some("// first\n// second\n/* third */".to_string())
        );
    }

    #[test]
    fn test_blank_line_gap_does_not_disqualify() {
        // Only sibling kinds matter, not textual distance
        let source = "// floating doc\n\n\nfn spaced() {}\n";
        assert_eq!(
            doc_for(source, "function_item"),
            Some("// floating doc".to_string())
        );
    }

    #[test]
    fn test_stops_at_non_comment_sibling() {
        // The attribute sits between the comment and the function, so the
        // comment is not associated
        let source = "// about attr\n#[inline]\nfn tuned() {}\n";
        assert_eq!(doc_for(source, "function_item"), None);
    }

    #[test]
    fn test_comment_before_previous_definition_not_stolen() {
        let source = "// belongs to a\nfn a() {}\nfn b() {}\n";
        let tree = rust_tree(source);
        let root = tree.root_node();
        let second_fn = root.child(root.child_count() - 1).unwrap();
        assert_eq!(second_fn.kind(), "function_item");
        assert_eq!(leading_comments(&second_fn, source, RUST_COMMENTS), None);
    }

    #[test]
    fn test_doc_comment_delimiters_preserved() {
        assert_eq!(
            doc_for("/// Docs with slashes.\nfn d() {}\n", "function_item"),
            Some("/// Docs with slashes.".to_string())
        );
    }

    #[test]
    fn test_no_trailing_newline_and_no_injected_blank_lines() {
        // Comment nodes that carry their line terminator must not leak it
        // into the joined text
        let source = "/// a\n/// b\nfn f() {}\n";
        assert_eq!(
            doc_for(source, "function_item"),
            Some("/// a\n/// b".to_string())
        );
    }
}
