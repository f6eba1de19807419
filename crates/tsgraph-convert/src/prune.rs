//! Dead-type pruner
//!
//! Synthetic declarations (bootstrap pseudo-types, synthesized unions,
//! emitted delegates) are only worth emitting if something still refers
//! to them after translation. Builds the declaration-to-declaration
//! reference graph and tombstones every synthetic declaration that is not
//! reachable from a parser-authored root. Runs last: reachability is
//! judged against the translator's final reference graph.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use tracing::debug;
use tsgraph_core::{DeclId, Namespace, TypeNode};

use crate::ctx::ConvertStats;

pub fn run(ns: &mut Namespace, stats: &mut ConvertStats) {
    let live = ns.decl_ids();

    let mut graph: DiGraph<DeclId, ()> = DiGraph::new();
    let mut index: HashMap<DeclId, NodeIndex> = HashMap::new();
    for &id in &live {
        index.insert(id, graph.add_node(id));
    }
    for &id in &live {
        for tid in ns.decl_reachable_types(id) {
            if let TypeNode::Named(n) = ns.type_node(tid) {
                if let Some(target) = n.target.decl() {
                    if let (Some(&from), Some(&to)) = (index.get(&id), index.get(&target)) {
                        graph.update_edge(from, to, ());
                    }
                }
            }
        }
    }

    let mut reached: HashSet<DeclId> = HashSet::new();
    let mut dfs = Dfs::empty(&graph);
    for &id in &live {
        if ns.decl(id).is_some_and(|d| !d.synthetic) {
            if let Some(&start) = index.get(&id) {
                dfs.move_to(start);
                while let Some(node) = dfs.next(&graph) {
                    reached.insert(graph[node]);
                }
            }
        }
    }

    for &id in &live {
        let prune = ns
            .decl(id)
            .is_some_and(|d| d.synthetic && !reached.contains(&id));
        if prune {
            if let Some(decl) = ns.remove_decl(id) {
                debug!(name = %decl.name, "pruned unreachable synthetic declaration");
                stats.declarations_pruned += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ctx::{ConvertCtx, ConvertStats};
    use crate::{bootstrap, dedup, link, unions};
    use pretty_assertions::assert_eq;
    use tsgraph_core::{Field, TypeDeclaration};

    #[test]
    fn unreferenced_bootstrap_types_are_pruned() {
        let mut ns = Namespace::new();
        bootstrap::run(&mut ns);
        ns.add_decl(TypeDeclaration::class("Root"));

        let mut stats = ConvertStats::default();
        run(&mut ns, &mut stats);

        assert_eq!(stats.declarations_pruned, 4);
        assert!(ns.find_decl_by_name("Root").is_some());
        assert!(ns.find_decl_by_name(bootstrap::NULL_TYPE).is_none());
    }

    #[test]
    fn referenced_synthetics_survive_transitively() {
        let mut ns = Namespace::new();
        bootstrap::run(&mut ns);

        // Root -> VoidType, and VoidType itself implements UndefinedType.
        let v = ns.named(bootstrap::VOID_TYPE);
        let mut root = TypeDeclaration::class("Root");
        root.fields.push(Field::new("nothing", v));
        ns.add_decl(root);

        let mut stats = ConvertStats::default();
        link::run(&mut ns, &mut stats);
        run(&mut ns, &mut stats);

        assert!(ns.find_decl_by_name(bootstrap::VOID_TYPE).is_some());
        assert!(ns.find_decl_by_name(bootstrap::UNDEFINED_TYPE).is_some());
        assert!(ns.find_decl_by_name(bootstrap::NULL_TYPE).is_none());
        assert!(ns.find_decl_by_name(bootstrap::SYMBOL_TYPE).is_none());
    }

    #[test]
    fn unions_orphaned_by_member_dedup_are_pruned() {
        let mut ns = Namespace::new();
        for name in ["A", "B"] {
            ns.add_decl(TypeDeclaration::class(name));
        }

        // Two partial Foo declarations: the canonical one types x as
        // number, the sibling types x as union(A, B). Dedup removes the
        // sibling's x, leaving that union declaration unreferenced.
        let n = ns.named("number");
        let mut foo1 = TypeDeclaration::class("Foo");
        foo1.fields.push(Field::new("x", n));
        ns.add_decl(foo1);

        let op_a = ns.named("A");
        let op_b = ns.named("B");
        let superseded = ns.named_with_args("|", vec![op_a, op_b]);
        let mut foo2 = TypeDeclaration::class("Foo");
        foo2.fields.push(Field::new("x", superseded));
        ns.add_decl(foo2);

        let op_b2 = ns.named("B");
        let op_a2 = ns.named("A");
        let kept = ns.named_with_args("|", vec![op_b2, op_a2]);
        let mut holder = TypeDeclaration::class("Holder");
        holder.fields.push(Field::new("value", kept));
        ns.add_decl(holder);

        let mut ctx = ConvertCtx::new(vec![superseded, kept]);
        link::run(&mut ns, &mut ctx.stats);
        unions::run(&mut ns, &mut ctx).expect("well-formed requests");
        dedup::run(&mut ns, &mut ctx.stats);
        run(&mut ns, &mut ctx.stats);

        assert!(ns.find_decl_by_name("Union_A_B").is_none());
        assert!(ns.find_decl_by_name("Union_B_A").is_some());
        assert_eq!(ctx.stats.declarations_pruned, 1);
    }
}
