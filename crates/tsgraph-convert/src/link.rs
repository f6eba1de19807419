//! Reference linker
//!
//! Binds every unresolved named reference reachable from any declaration
//! to the declaration it denotes, or marks it external when the name has
//! no declaration in the namespace (not an error; opaque types are
//! legitimate). Idempotent: only `Unresolved` slots are ever written, so
//! re-running is a no-op. All declarations are registered before linking
//! starts, so results do not depend on visit order.

use tracing::trace;
use tsgraph_core::{Namespace, Resolution, TypeNode};

use crate::ctx::ConvertStats;

pub fn run(ns: &mut Namespace, stats: &mut ConvertStats) {
    for decl_id in ns.decl_ids() {
        for tid in ns.decl_reachable_types(decl_id) {
            let name = match ns.type_node(tid) {
                TypeNode::Named(n) if n.target.is_unresolved() => n.name.clone(),
                _ => continue,
            };
            let target = match ns.find_decl_by_name(&name) {
                Some(decl) => {
                    stats.references_resolved += 1;
                    Resolution::Decl(decl)
                }
                None => {
                    stats.references_external += 1;
                    Resolution::External
                }
            };
            trace!(name = %name, ?target, "linked reference");
            if let TypeNode::Named(n) = ns.type_node_mut(tid) {
                n.target = target;
            }
        }
    }
}
