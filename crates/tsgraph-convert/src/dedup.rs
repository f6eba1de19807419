//! Duplicate member eliminator
//!
//! The parser may emit several partial declarations for one logical type;
//! the emitter renders them as partials of a single class, so members must
//! not repeat across the set. Each declaration in namespace order acts as
//! canonical for its name-siblings: its fields shadow sibling fields and
//! methods of the same name, its methods shadow sibling fields and remove
//! sibling methods only on an exact signature match. Same-name methods
//! with different signatures are legitimate overloads and survive.

use tracing::debug;
use tsgraph_core::{DeclId, Method, Namespace};

use crate::ctx::ConvertStats;

pub fn run(ns: &mut Namespace, stats: &mut ConvertStats) {
    for id in ns.decl_ids() {
        let Some(decl) = ns.decl(id) else { continue };
        let name = decl.name.clone();
        let siblings: Vec<DeclId> = ns
            .find_decls_by_name(&name)
            .into_iter()
            .filter(|&s| s != id)
            .collect();
        if siblings.is_empty() {
            continue;
        }

        let field_names: Vec<String> = decl.fields.iter().map(|f| f.name.clone()).collect();
        let methods: Vec<Method> = decl.methods.clone();

        for sib in siblings {
            scrub_sibling(ns, &name, &field_names, &methods, sib, stats);
        }
    }
}

fn scrub_sibling(
    ns: &mut Namespace,
    canonical_name: &str,
    field_names: &[String],
    methods: &[Method],
    sib: DeclId,
    stats: &mut ConvertStats,
) {
    let Some(sdecl) = ns.decl(sib) else { return };

    let keep_fields: Vec<bool> = sdecl
        .fields
        .iter()
        .map(|f| {
            !field_names.contains(&f.name) && !methods.iter().any(|m| m.name == f.name)
        })
        .collect();
    let keep_methods: Vec<bool> = sdecl
        .methods
        .iter()
        .map(|m| {
            if field_names.contains(&m.name) {
                return false;
            }
            !methods
                .iter()
                .any(|cm| cm.name == m.name && ns.signatures_equal(cm, m))
        })
        .collect();

    let removed = keep_fields.iter().filter(|&&k| !k).count()
        + keep_methods.iter().filter(|&&k| !k).count();
    if removed == 0 {
        return;
    }

    if let Some(sdecl) = ns.decl_mut(sib) {
        let fields = std::mem::take(&mut sdecl.fields);
        sdecl.fields = fields
            .into_iter()
            .zip(keep_fields)
            .filter_map(|(f, keep)| keep.then_some(f))
            .collect();
        let methods = std::mem::take(&mut sdecl.methods);
        sdecl.methods = methods
            .into_iter()
            .zip(keep_methods)
            .filter_map(|(m, keep)| keep.then_some(m))
            .collect();
    }
    debug!(name = canonical_name, removed, "scrubbed shadowed members from sibling");
    stats.members_removed += removed;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use tsgraph_core::{Field, Parameter, TypeDeclaration};

    fn field_names(ns: &Namespace, id: DeclId) -> Vec<String> {
        ns.decl(id)
            .map(|d| d.fields.iter().map(|f| f.name.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn canonical_fields_shadow_sibling_fields() {
        let mut ns = Namespace::new();
        let nx = ns.named("number");
        let mut first = TypeDeclaration::class("Foo");
        first.fields.push(Field::new("x", nx));
        let first = ns.add_decl(first);

        let nx2 = ns.named("number");
        let sy = ns.named("string");
        let mut second = TypeDeclaration::class("Foo");
        second.fields.push(Field::new("x", nx2));
        second.fields.push(Field::new("y", sy));
        let second = ns.add_decl(second);

        let mut stats = ConvertStats::default();
        run(&mut ns, &mut stats);

        // Across the partial declarations, x and y each survive once.
        assert_eq!(field_names(&ns, first), vec!["x"]);
        assert_eq!(field_names(&ns, second), vec!["y"]);
        assert_eq!(stats.members_removed, 1);
    }

    #[test]
    fn methods_shadow_sibling_fields_of_the_same_name() {
        let mut ns = Namespace::new();
        let s = ns.named("string");
        let mut first = TypeDeclaration::class("Foo");
        first
            .methods
            .push(Method::new("value", vec![Parameter::new("v", s)]));
        ns.add_decl(first);

        let n = ns.named("number");
        let mut second = TypeDeclaration::class("Foo");
        second.fields.push(Field::new("value", n));
        let second = ns.add_decl(second);

        let mut stats = ConvertStats::default();
        run(&mut ns, &mut stats);

        assert!(field_names(&ns, second).is_empty());
    }

    #[test]
    fn distinct_signatures_survive_as_overloads() {
        let mut ns = Namespace::new();
        let s = ns.named("string");
        let mut first = TypeDeclaration::class("Foo");
        first
            .methods
            .push(Method::new("get", vec![Parameter::new("key", s)]));
        let first = ns.add_decl(first);

        let n = ns.named("number");
        let mut second = TypeDeclaration::class("Foo");
        second
            .methods
            .push(Method::new("get", vec![Parameter::new("index", n)]));
        let second = ns.add_decl(second);

        let mut stats = ConvertStats::default();
        run(&mut ns, &mut stats);

        // One overload per distinct signature remains.
        assert_eq!(ns.decl(first).map(|d| d.methods.len()), Some(1));
        assert_eq!(ns.decl(second).map(|d| d.methods.len()), Some(1));
        assert_eq!(stats.members_removed, 0);
    }

    #[test]
    fn matching_signatures_are_removed_from_the_sibling() {
        let mut ns = Namespace::new();
        let s1 = ns.named("string");
        let mut first = TypeDeclaration::class("Foo");
        first
            .methods
            .push(Method::new("get", vec![Parameter::new("key", s1)]));
        let first = ns.add_decl(first);

        let s2 = ns.named("string");
        let mut second = TypeDeclaration::class("Foo");
        second
            .methods
            .push(Method::new("get", vec![Parameter::new("k", s2)]));
        let second = ns.add_decl(second);

        let mut stats = ConvertStats::default();
        run(&mut ns, &mut stats);

        assert_eq!(ns.decl(first).map(|d| d.methods.len()), Some(1));
        assert_eq!(ns.decl(second).map(|d| d.methods.len()), Some(0));
    }

    #[test]
    fn unrelated_declarations_are_untouched() {
        let mut ns = Namespace::new();
        let n = ns.named("number");
        let mut foo = TypeDeclaration::class("Foo");
        foo.fields.push(Field::new("x", n));
        let foo = ns.add_decl(foo);

        let n2 = ns.named("number");
        let mut bar = TypeDeclaration::class("Bar");
        bar.fields.push(Field::new("x", n2));
        let bar = ns.add_decl(bar);

        let mut stats = ConvertStats::default();
        run(&mut ns, &mut stats);

        assert_eq!(field_names(&ns, foo), vec!["x"]);
        assert_eq!(field_names(&ns, bar), vec!["x"]);
    }

    const DECL_NAMES: [&str; 2] = ["Foo", "Bar"];
    const MEMBER_NAMES: [&str; 3] = ["a", "b", "c"];
    const TYPE_NAMES: [&str; 2] = ["number", "string"];

    fn arb_namespace() -> impl Strategy<Value = Namespace> {
        let member = (0..MEMBER_NAMES.len(), any::<bool>(), 0..TYPE_NAMES.len());
        let decl = (0..DECL_NAMES.len(), proptest::collection::vec(member, 0..5));
        proptest::collection::vec(decl, 1..6).prop_map(|decls| {
            let mut ns = Namespace::new();
            for (name_idx, members) in decls {
                let mut d = TypeDeclaration::class(DECL_NAMES[name_idx]);
                for (member_idx, is_method, ty_idx) in members {
                    let ty = ns.named(TYPE_NAMES[ty_idx]);
                    if is_method {
                        d.methods.push(Method::new(
                            MEMBER_NAMES[member_idx],
                            vec![Parameter::new("p", ty)],
                        ));
                    } else {
                        d.fields.push(Field::new(MEMBER_NAMES[member_idx], ty));
                    }
                }
                ns.add_decl(d);
            }
            ns
        })
    }

    proptest! {
        /// Running the eliminator a second time changes nothing.
        #[test]
        fn second_run_is_a_fixed_point(mut ns in arb_namespace()) {
            let mut stats = ConvertStats::default();
            run(&mut ns, &mut stats);

            let snapshot = ns.to_json().expect("graph serializes");
            let mut second = ConvertStats::default();
            run(&mut ns, &mut second);

            prop_assert_eq!(second.members_removed, 0);
            prop_assert_eq!(ns.to_json().expect("graph serializes"), snapshot);
        }
    }
}
