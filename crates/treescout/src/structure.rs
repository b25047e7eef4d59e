//! Structure extraction: the nested per-file view of imports, types,
//! traits, implementation blocks, and free functions.
//!
//! Runs a profile's `structure` pattern once and assembles the model by
//! tree containment, not by match index: a quantified field sub-capture may
//! arrive spread across several matches of the same struct, and all of them
//! accumulate into one type declaration. Absent optional sub-captures
//! degrade to empty sequences, never errors.

use std::collections::{HashMap, HashSet};

use tree_sitter::{Language, Node, Tree};

use crate::cache::PatternCache;
use crate::profile::LanguageProfile;
use crate::query::for_each_match;
use crate::{ExtractError, Result, Span};

/// A typed field of a type declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct FieldDecl {
    pub name: String,
    pub type_spelling: String,
}

/// A named parameter with its type spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Param {
    pub name: String,
    pub type_spelling: String,
}

/// A type (struct/class/record) declaration with its typed fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct TypeDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
}

/// A method signature inside a trait/interface declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct MethodSig {
    pub name: String,
    pub params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

/// A trait/interface declaration with its method signatures.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct TraitDecl {
    pub name: String,
    pub methods: Vec<MethodSig>,
}

/// A concrete method inside an implementation block.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MethodDecl {
    pub name: String,
    pub params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    pub body_range: Span,
}

/// An implementation block linking a type to an optional trait and its
/// concrete methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ImplBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trait_name: Option<String>,
    pub type_name: String,
    pub methods: Vec<MethodDecl>,
}

/// A free function.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    pub body_range: Span,
}

/// The per-file structure model. All ranges reference the input tree; the
/// model holds no live handles into parser state.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct StructureModel {
    pub imports: Vec<String>,
    pub types: Vec<TypeDecl>,
    pub traits: Vec<TraitDecl>,
    pub impls: Vec<ImplBlock>,
    pub functions: Vec<FunctionDecl>,
}

/// Build the [`StructureModel`] for a file using the profile's `structure`
/// pattern.
///
/// Fails with [`ExtractError::MissingPattern`] when the profile has no
/// structure pattern.
pub fn extract(
    profile: &LanguageProfile,
    grammar: &Language,
    tree: &Tree,
    source: &str,
    cache: &PatternCache,
) -> Result<StructureModel> {
    let pattern = profile
        .structure
        .ok_or_else(|| ExtractError::MissingPattern {
            language: profile.language_id.to_string(),
            slot: "structure",
        })?;
    let query = cache.get_or_compile(profile.language_id, grammar, pattern)?;

    // Pool every captured node by label, deduplicated by node identity.
    // Quantified captures repeat across matches; containment-based assembly
    // below makes the per-match grouping irrelevant.
    let mut pool: HashMap<&str, Vec<Node>> = HashMap::new();
    let mut seen: HashSet<(&str, usize)> = HashSet::new();
    for_each_match(&query, tree.root_node(), source, |set| {
        for (label, node) in set.entries().iter().copied() {
            if seen.insert((label, node.id())) {
                pool.entry(label).or_default().push(node);
            }
        }
    });

    let assembler = Assembler { source, pool };
    Ok(assembler.assemble())
}

struct Assembler<'q, 'tree> {
    source: &'q str,
    pool: HashMap<&'q str, Vec<Node<'tree>>>,
}

impl<'q, 'tree> Assembler<'q, 'tree> {
    fn assemble(mut self) -> StructureModel {
        let typed_params = self.typed_params();

        let mut model = StructureModel {
            imports: self
                .take("use-path")
                .iter()
                .map(|n| self.text(n))
                .collect(),
            ..StructureModel::default()
        };

        // Declarations first, so members can attach by ancestor lookup.
        // Each index maps the declaration node's id to its model position.
        let mut type_index = HashMap::new();
        for name in self.take("struct-name") {
            let Some(item) = name.parent() else { continue };
            if !type_index.contains_key(&item.id()) {
                type_index.insert(item.id(), model.types.len());
                model.types.push(TypeDecl {
                    name: self.text(&name),
                    fields: Vec::new(),
                });
            }
        }

        let mut trait_index = HashMap::new();
        for name in self.take("trait-name") {
            let Some(item) = name.parent() else { continue };
            if !trait_index.contains_key(&item.id()) {
                trait_index.insert(item.id(), model.traits.len());
                model.traits.push(TraitDecl {
                    name: self.text(&name),
                    methods: Vec::new(),
                });
            }
        }

        let impl_traits = self.take("impl-trait-name");
        let mut impl_index = HashMap::new();
        for name in self.take("impl-type-name") {
            let Some(item) = name.parent() else { continue };
            if !impl_index.contains_key(&item.id()) {
                let trait_name = sibling_under(&impl_traits, &item).map(|n| self.text(&n));
                impl_index.insert(item.id(), model.impls.len());
                model.impls.push(ImplBlock {
                    trait_name,
                    type_name: self.text(&name),
                    methods: Vec::new(),
                });
            }
        }

        // Fields attach to the nearest indexed type declaration
        let field_types = self.take("struct-field-type");
        for name in self.take("struct-field-name") {
            let Some(decl) = name.parent() else { continue };
            let Some(ty) = sibling_under(&field_types, &decl) else {
                continue;
            };
            if let Some(idx) = ancestor_index(&decl, &type_index) {
                model.types[idx].fields.push(FieldDecl {
                    name: self.text(&name),
                    type_spelling: self.text(&ty),
                });
            }
        }

        // Trait method signatures
        let sig_params = self.take("trait-method-params");
        let sig_returns = self.take("trait-method-return-type");
        for name in self.take("trait-method-name") {
            let Some(sig) = name.parent() else { continue };
            let Some(idx) = ancestor_index(&sig, &trait_index) else {
                continue;
            };
            model.traits[idx].methods.push(MethodSig {
                name: self.text(&name),
                params: params_within(&typed_params, sibling_under(&sig_params, &sig)),
                return_type: sibling_under(&sig_returns, &sig).map(|n| self.text(&n)),
            });
        }

        // Concrete methods inside impl blocks
        let method_params = self.take("impl-method-params");
        let method_returns = self.take("impl-method-return-type");
        let method_bodies = self.take("impl-method-body");
        for name in self.take("impl-method-name") {
            let Some(func) = name.parent() else { continue };
            let Some(idx) = ancestor_index(&func, &impl_index) else {
                continue;
            };
            let Some(body) = sibling_under(&method_bodies, &func) else {
                continue;
            };
            model.impls[idx].methods.push(MethodDecl {
                name: self.text(&name),
                params: params_within(&typed_params, sibling_under(&method_params, &func)),
                return_type: sibling_under(&method_returns, &func).map(|n| self.text(&n)),
                body_range: Span::from_node(&body),
            });
        }

        // Free functions: skip anything contained in an indexed impl or
        // trait declaration (those already surfaced as methods)
        let fn_params = self.take("function-params");
        let fn_returns = self.take("function-return-type");
        let fn_bodies = self.take("function-body");
        for name in self.take("function-name") {
            let Some(func) = name.parent() else { continue };
            if ancestor_index(&func, &impl_index).is_some()
                || ancestor_index(&func, &trait_index).is_some()
            {
                continue;
            }
            let Some(body) = sibling_under(&fn_bodies, &func) else {
                continue;
            };
            model.functions.push(FunctionDecl {
                name: self.text(&name),
                params: params_within(&typed_params, sibling_under(&fn_params, &func)),
                return_type: sibling_under(&fn_returns, &func).map(|n| self.text(&n)),
                body_range: Span::from_node(&body),
            });
        }

        model
    }

    /// Captured nodes for a label, in document order.
    fn take(&mut self, label: &str) -> Vec<Node<'tree>> {
        let mut nodes = self.pool.remove(label).unwrap_or_default();
        nodes.sort_by_key(|n| n.start_byte());
        nodes
    }

    fn text(&self, node: &Node) -> String {
        node.utf8_text(self.source.as_bytes())
            .unwrap_or_default()
            .to_string()
    }

    /// Pair `param-name`/`param-type` captures that share a parameter node.
    fn typed_params(&mut self) -> Vec<(Node<'tree>, Param)> {
        let types = self.take("param-type");
        self.take("param-name")
            .into_iter()
            .filter_map(|name| {
                let parameter = name.parent()?;
                let ty = sibling_under(&types, &parameter)?;
                Some((
                    parameter,
                    Param {
                        name: self.text(&name),
                        type_spelling: self.text(&ty),
                    },
                ))
            })
            .collect()
    }
}

/// The captured node (if any) whose parent is exactly `parent`.
fn sibling_under<'tree>(candidates: &[Node<'tree>], parent: &Node<'tree>) -> Option<Node<'tree>> {
    candidates
        .iter()
        .find(|n| n.parent().map(|p| p.id()) == Some(parent.id()))
        .copied()
}

/// Walk ancestors of `node` until one appears in `index`.
fn ancestor_index(node: &Node, index: &HashMap<usize, usize>) -> Option<usize> {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if let Some(&idx) = index.get(&ancestor.id()) {
            return Some(idx);
        }
        current = ancestor.parent();
    }
    None
}

/// Typed parameters whose parameter node falls inside `list` by byte range.
fn params_within(typed_params: &[(Node, Param)], list: Option<Node>) -> Vec<Param> {
    let Some(list) = list else {
        return Vec::new();
    };
    let range = list.byte_range();
    typed_params
        .iter()
        .filter(|(node, _)| node.start_byte() >= range.start && node.end_byte() <= range.end)
        .map(|(_, param)| param.clone())
        .collect()
}
