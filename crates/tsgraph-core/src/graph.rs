//! The namespace: an arena-backed, mutable declaration graph
//!
//! Declarations and type nodes are stored in flat arenas and addressed by
//! [`DeclId`] / [`TypeId`]. Every pass of the conversion pipeline mutates
//! the same `Namespace` in place; the declaration arena only grows until
//! the pruner tombstones dead slots, so ids handed out earlier stay valid
//! for the whole pipeline run.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::decl::{DeclKind, Method, TypeDeclaration};
use crate::types::{NamedType, TypeNode};

/// Stable handle to a declaration slot. Survives pruning; a pruned slot
/// reads back as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclId(u32);

impl DeclId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a type node in the type arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Namespace {
    types: Vec<TypeNode>,
    decls: Vec<Option<TypeDeclaration>>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    // --- type arena ---

    pub fn add_type(&mut self, node: TypeNode) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(node);
        id
    }

    /// Convenience: an unresolved named reference without arguments.
    pub fn named(&mut self, name: impl Into<String>) -> TypeId {
        self.add_type(TypeNode::Named(NamedType::new(name)))
    }

    /// Convenience: an unresolved named reference with generic arguments.
    pub fn named_with_args(&mut self, name: impl Into<String>, args: Vec<TypeId>) -> TypeId {
        self.add_type(TypeNode::Named(NamedType::with_args(name, args)))
    }

    pub fn type_node(&self, id: TypeId) -> &TypeNode {
        &self.types[id.index()]
    }

    pub fn type_node_mut(&mut self, id: TypeId) -> &mut TypeNode {
        &mut self.types[id.index()]
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    // --- declaration arena ---

    pub fn add_decl(&mut self, decl: TypeDeclaration) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(Some(decl));
        id
    }

    pub fn decl(&self, id: DeclId) -> Option<&TypeDeclaration> {
        self.decls.get(id.index()).and_then(|slot| slot.as_ref())
    }

    pub fn decl_mut(&mut self, id: DeclId) -> Option<&mut TypeDeclaration> {
        self.decls.get_mut(id.index()).and_then(|slot| slot.as_mut())
    }

    /// Tombstone a declaration slot. The id stays allocated so other ids
    /// remain stable; only the pruner calls this.
    pub fn remove_decl(&mut self, id: DeclId) -> Option<TypeDeclaration> {
        self.decls.get_mut(id.index()).and_then(|slot| slot.take())
    }

    /// Live declaration ids in insertion order.
    pub fn decl_ids(&self) -> Vec<DeclId> {
        self.decls
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| DeclId(i as u32))
            .collect()
    }

    pub fn live_count(&self) -> usize {
        self.decls.iter().filter(|slot| slot.is_some()).count()
    }

    // --- lookup (linear scans over insertion order) ---

    /// First live declaration with the given name.
    pub fn find_decl_by_name(&self, name: &str) -> Option<DeclId> {
        self.decls
            .iter()
            .enumerate()
            .find(|(_, slot)| slot.as_ref().is_some_and(|d| d.name == name))
            .map(|(i, _)| DeclId(i as u32))
    }

    /// All live declarations with the given name, in insertion order.
    pub fn find_decls_by_name(&self, name: &str) -> Vec<DeclId> {
        self.decls
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.as_ref().is_some_and(|d| d.name == name))
            .map(|(i, _)| DeclId(i as u32))
            .collect()
    }

    /// All live declarations matching a name and generic arity. This is
    /// the collision query the disambiguator reuses.
    pub fn find_decls_matching(&self, name: &str, arity: usize) -> Vec<DeclId> {
        self.decls
            .iter()
            .enumerate()
            .filter(|(_, slot)| {
                slot.as_ref()
                    .is_some_and(|d| d.name == name && d.generics.len() == arity)
            })
            .map(|(i, _)| DeclId(i as u32))
            .collect()
    }

    // --- traversal ---

    /// The type references held directly by a declaration: implements list,
    /// field types, method parameter types.
    pub fn decl_type_roots(&self, id: DeclId) -> Vec<TypeId> {
        let mut roots = Vec::new();
        if let Some(decl) = self.decl(id) {
            roots.extend(decl.implements.iter().copied());
            roots.extend(decl.fields.iter().map(|f| f.ty));
            for m in &decl.methods {
                roots.extend(m.params.iter().map(|p| p.ty));
            }
        }
        roots
    }

    /// Every type node reachable from the given roots, in depth-first
    /// pre-order, each visited once. Expands nested generic arguments,
    /// function parameters and array elements.
    pub fn reachable_types(&self, roots: &[TypeId]) -> Vec<TypeId> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut stack: Vec<TypeId> = roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            out.push(id);
            match self.type_node(id) {
                TypeNode::Named(n) => {
                    for &arg in n.args.iter().rev() {
                        stack.push(arg);
                    }
                }
                TypeNode::Function(f) => {
                    for p in f.params.iter().rev() {
                        stack.push(p.ty);
                    }
                }
                TypeNode::Array(elem) => stack.push(*elem),
            }
        }
        out
    }

    /// Every type node reachable from one declaration.
    pub fn decl_reachable_types(&self, id: DeclId) -> Vec<TypeId> {
        self.reachable_types(&self.decl_type_roots(id))
    }

    /// Interface declarations transitively implemented by `id`, in
    /// breadth-first discovery order over the implements lists. The walk
    /// passes through non-interface bases, so a class chain contributes
    /// the interfaces of its ancestors too.
    pub fn transitive_interfaces(&self, id: DeclId) -> Vec<DeclId> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([id]);
        while let Some(cur) = queue.pop_front() {
            if !seen.insert(cur) {
                continue;
            }
            let Some(decl) = self.decl(cur) else { continue };
            for &imp in &decl.implements {
                if let TypeNode::Named(n) = self.type_node(imp) {
                    if let Some(target) = n.target.decl() {
                        let is_interface = self
                            .decl(target)
                            .is_some_and(|d| d.kind == DeclKind::Interface);
                        if is_interface && !out.contains(&target) {
                            out.push(target);
                        }
                        queue.push_back(target);
                    }
                }
            }
        }
        out
    }

    /// Interfaces implemented by both declarations, ordered by `a`'s
    /// discovery order.
    pub fn shared_interfaces(&self, a: DeclId, b: DeclId) -> Vec<DeclId> {
        let of_b: HashSet<DeclId> = self.transitive_interfaces(b).into_iter().collect();
        self.transitive_interfaces(a)
            .into_iter()
            .filter(|i| of_b.contains(i))
            .collect()
    }

    // --- rendering and equality ---

    /// Canonical textual form of a type reference, used for union naming
    /// and diagnostics: `Name`, `Name<Arg, ...>`, `Array<T>`, `Fn(...)`.
    pub fn render(&self, id: TypeId) -> String {
        match self.type_node(id) {
            TypeNode::Named(n) => {
                if n.args.is_empty() {
                    n.name.clone()
                } else {
                    let args: Vec<String> =
                        n.args.iter().map(|&a| self.render(a)).collect();
                    format!("{}<{}>", n.name, args.join(", "))
                }
            }
            TypeNode::Array(elem) => format!("Array<{}>", self.render(*elem)),
            TypeNode::Function(f) => {
                let params: Vec<String> =
                    f.params.iter().map(|p| self.render(p.ty)).collect();
                format!("Fn({})", params.join(", "))
            }
        }
    }

    /// Structural equality of two type references: same shape, same names,
    /// pairwise-equal arguments. Resolution state is not compared; two
    /// references to the same name are equal whether or not both have been
    /// linked yet.
    pub fn types_equal(&self, a: TypeId, b: TypeId) -> bool {
        if a == b {
            return true;
        }
        match (self.type_node(a), self.type_node(b)) {
            (TypeNode::Named(x), TypeNode::Named(y)) => {
                x.name == y.name
                    && x.args.len() == y.args.len()
                    && x.args
                        .iter()
                        .zip(&y.args)
                        .all(|(&p, &q)| self.types_equal(p, q))
            }
            (TypeNode::Array(x), TypeNode::Array(y)) => self.types_equal(*x, *y),
            (TypeNode::Function(x), TypeNode::Function(y)) => {
                x.params.len() == y.params.len()
                    && x.params
                        .iter()
                        .zip(&y.params)
                        .all(|(p, q)| self.types_equal(p.ty, q.ty))
            }
            _ => false,
        }
    }

    /// Two methods are signature-equal iff their parameter type lists are
    /// pairwise equal in order and count. Names are not compared.
    pub fn signatures_equal(&self, a: &Method, b: &Method) -> bool {
        a.params.len() == b.params.len()
            && a.params
                .iter()
                .zip(&b.params)
                .all(|(p, q)| self.types_equal(p.ty, q.ty))
    }

    /// Debug dump of the whole graph.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
