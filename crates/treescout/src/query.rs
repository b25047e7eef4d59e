//! Match iteration over compiled patterns.
//!
//! Each call walks a fresh cursor over the tree (restartable, no shared
//! iteration state) and hands the caller one [`CaptureSet`] per match, in
//! the order tree-sitter finds matches during its depth-first traversal —
//! document order of the pattern roots, with alternative top-level clauses
//! interleaving by position rather than clause order.

use tree_sitter::{Node, Query, QueryCursor, StreamingIterator};

/// One pattern match: a transient mapping from capture label to node.
///
/// Labels bound to optional sub-patterns that did not match are simply
/// absent. A quantified capture may bind several nodes to the same label;
/// consumers needing all of them iterate [`entries`](CaptureSet::entries).
pub struct CaptureSet<'query, 'tree> {
    entries: Vec<(&'query str, Node<'tree>)>,
}

impl<'query, 'tree> CaptureSet<'query, 'tree> {
    /// First node bound to a label, if any.
    pub fn node(&self, label: &str) -> Option<Node<'tree>> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, n)| *n)
    }

    /// Source text of the first node bound to a label.
    pub fn text<'s>(&self, label: &str, source: &'s str) -> Option<&'s str> {
        self.node(label)
            .and_then(|n| n.utf8_text(source.as_bytes()).ok())
    }

    pub fn has(&self, label: &str) -> bool {
        self.entries.iter().any(|(l, _)| *l == label)
    }

    /// All (label, node) pairs of this match.
    pub fn entries(&self) -> &[(&'query str, Node<'tree>)] {
        &self.entries
    }
}

/// Run `query` against `node` (a whole tree's root or any subtree) and call
/// `f` once per match.
///
/// Finite (bounded by tree size) and restartable: every call builds a fresh
/// cursor, so repeated runs over the same tree yield identical sequences.
pub fn for_each_match<'query, 'tree, F>(
    query: &'query Query,
    node: Node<'tree>,
    source: &str,
    mut f: F,
) where
    F: FnMut(CaptureSet<'query, 'tree>),
{
    let names = query.capture_names();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, node, source.as_bytes());
    while let Some(m) = matches.next() {
        let entries = m
            .captures
            .iter()
            .map(|capture| (names[capture.index as usize], capture.node))
            .collect();
        f(CaptureSet { entries });
    }
}
