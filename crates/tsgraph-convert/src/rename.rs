//! Overload disambiguator
//!
//! Delegate declarations collide by name when the source declared several
//! overloads of one function; the target language needs a distinct named
//! delegate per signature. Collisions are detected with the same
//! name-plus-generic-arity lookup the linker resolves against, reused
//! here for counting rather than resolution.
//!
//! The suffix starts at the observed collision count (three `f`s become
//! `f_3`, `f_2`, `f`) and is bumped until the candidate name is free, so
//! renames never collide with a pre-existing suffixed declaration.

use tracing::debug;
use tsgraph_core::{DeclKind, Namespace};

use crate::ctx::ConvertStats;

pub fn run(ns: &mut Namespace, stats: &mut ConvertStats) {
    for id in ns.decl_ids() {
        let (name, arity) = match ns.decl(id) {
            Some(d) if d.kind == DeclKind::Delegate => (d.name.clone(), d.generics.len()),
            _ => continue,
        };

        let collisions = ns
            .find_decls_matching(&name, arity)
            .into_iter()
            .filter(|&c| ns.decl(c).is_some_and(|d| d.kind == DeclKind::Delegate))
            .count();
        if collisions <= 1 {
            continue;
        }

        let mut n = collisions;
        let mut candidate = format!("{name}_{n}");
        while ns.find_decl_by_name(&candidate).is_some() {
            n += 1;
            candidate = format!("{name}_{n}");
        }
        debug!(from = %name, to = %candidate, "renamed colliding delegate");
        if let Some(decl) = ns.decl_mut(id) {
            decl.name = candidate;
        }
        stats.declarations_renamed += 1;
    }
}
