//! Translator / cleanser
//!
//! Lowers each declaration and each reachable type reference into a form
//! the target language can express directly. Function-shaped references
//! become named delegate declarations; arrays become `Array<T>`
//! references; TypeScript-only keyword types are redirected onto the
//! bootstrap pseudo-types or the opaque object fallback. Runs after every
//! structural pass; it never re-links and never synthesizes unions.

use tracing::debug;
use tsgraph_core::{Method, NamedType, Namespace, Resolution, TypeDeclaration, TypeNode};

use crate::bootstrap::{NULL_TYPE, UNDEFINED_TYPE, VOID_TYPE};
use crate::ctx::ConvertStats;
use crate::OBJECT_TYPE;

/// Target-side array type the emitter knows how to render.
pub const ARRAY_TYPE: &str = "Array";

pub fn run(ns: &mut Namespace, stats: &mut ConvertStats) {
    lower_functions(ns, stats);
    cleanse_references(ns, stats);
}

/// Every function-shaped reference becomes a named delegate declaration.
/// Emitted delegates are appended behind the declarations being scanned;
/// they are not re-scanned themselves.
fn lower_functions(ns: &mut Namespace, stats: &mut ConvertStats) {
    for decl_id in ns.decl_ids() {
        let owner = match ns.decl(decl_id) {
            Some(d) => d.name.clone(),
            None => continue,
        };
        let mut counter = 0usize;
        for tid in ns.decl_reachable_types(decl_id) {
            let params = match ns.type_node(tid) {
                TypeNode::Function(f) => f.params.clone(),
                _ => continue,
            };
            counter += 1;
            let mut name = format!("{owner}_Fn{counter}");
            while ns.find_decl_by_name(&name).is_some() {
                counter += 1;
                name = format!("{owner}_Fn{counter}");
            }

            let mut delegate = TypeDeclaration::delegate(name.clone()).synthetic();
            delegate.methods.push(Method::new("Invoke", params));
            let delegate_id = ns.add_decl(delegate);

            *ns.type_node_mut(tid) = TypeNode::Named(NamedType {
                name: name.clone(),
                args: Vec::new(),
                target: Resolution::Decl(delegate_id),
            });
            debug!(owner = %owner, delegate = %name, "lowered function shape to delegate");
            stats.delegates_emitted += 1;
        }
    }
}

/// Normalize references the target cannot express, under the owning
/// declaration's generic-parameter context.
fn cleanse_references(ns: &mut Namespace, stats: &mut ConvertStats) {
    for decl_id in ns.decl_ids() {
        let generics = match ns.decl(decl_id) {
            Some(d) => d.generics.clone(),
            None => continue,
        };
        for tid in ns.decl_reachable_types(decl_id) {
            if let TypeNode::Array(elem) = ns.type_node(tid) {
                let elem = *elem;
                *ns.type_node_mut(tid) = TypeNode::Named(NamedType {
                    name: ARRAY_TYPE.to_string(),
                    args: vec![elem],
                    target: Resolution::External,
                });
                stats.references_cleansed += 1;
                continue;
            }

            let name = match ns.type_node(tid) {
                TypeNode::Named(n) => n.name.clone(),
                _ => continue,
            };
            if generics.iter().any(|g| *g == name) {
                continue;
            }
            let replacement = match name.as_str() {
                "any" | "unknown" => Some((OBJECT_TYPE.to_string(), Resolution::External)),
                "void" => Some(redirect(ns, VOID_TYPE)),
                "null" => Some(redirect(ns, NULL_TYPE)),
                "undefined" => Some(redirect(ns, UNDEFINED_TYPE)),
                _ => None,
            };
            if let Some((new_name, target)) = replacement {
                if let TypeNode::Named(n) = ns.type_node_mut(tid) {
                    n.name = new_name;
                    n.args.clear();
                    n.target = target;
                }
                stats.references_cleansed += 1;
            }
        }
    }
}

/// Point a keyword reference at its bootstrap pseudo-type; if the
/// bootstrap declaration is absent the reference degrades to the opaque
/// object fallback.
fn redirect(ns: &Namespace, to: &str) -> (String, Resolution) {
    match ns.find_decl_by_name(to) {
        Some(decl) => (to.to_string(), Resolution::Decl(decl)),
        None => (OBJECT_TYPE.to_string(), Resolution::External),
    }
}
