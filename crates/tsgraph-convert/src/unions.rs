//! Union synthesizer
//!
//! Materializes one named declaration per requested two-operand union: it
//! implements the interfaces shared by both operands plus a `Union<A, B>`
//! marker the translator uses to recognize union-ness later. Canonical
//! names are derived from the operands' rendered names in request order,
//! so `(A, B)` and `(B, A)` are distinct declarations on purpose; repeated
//! requests with the same rendered name reuse the existing declaration.

use tracing::debug;
use tsgraph_core::{
    DeclId, GraphError, NamedType, Namespace, Resolution, TypeDeclaration, TypeId, TypeNode,
};

use crate::ctx::{ConvertCtx, ConvertStats};
use crate::error::ConvertError;
use crate::OBJECT_TYPE;

/// Marker interface name. There is no declaration behind it; the emitter
/// maps it onto the target runtime's union marker.
pub const UNION_MARKER: &str = "Union";

const UNION_PREFIX: &str = "Union_";

pub fn run(ns: &mut Namespace, ctx: &mut ConvertCtx) -> Result<(), ConvertError> {
    let requests = ctx.unions.clone();
    for request in requests {
        synthesize(ns, request, &mut ctx.stats)?;
    }
    Ok(())
}

fn synthesize(
    ns: &mut Namespace,
    request: TypeId,
    stats: &mut ConvertStats,
) -> Result<(), ConvertError> {
    let (a, b) = match ns.type_node(request) {
        TypeNode::Named(n) if n.args.len() == 2 => (n.args[0], n.args[1]),
        _ => {
            return Err(ConvertError::MalformedUnionRequest {
                type_id: request,
                reason: format!(
                    "expected a named reference with two operands, got `{}`",
                    ns.render(request)
                ),
            })
        }
    };

    let (Some(decl_a), Some(decl_b)) = (operand_decl(ns, a), operand_decl(ns, b)) else {
        // An opaque operand makes the whole union opaque.
        debug!(request = %ns.render(request), "operand unresolved, collapsing union to object");
        if let TypeNode::Named(n) = ns.type_node_mut(request) {
            n.name = OBJECT_TYPE.to_string();
            n.args.clear();
            n.target = Resolution::External;
        }
        stats.unions_collapsed += 1;
        return Ok(());
    };

    let canonical = format!("{}{}_{}", UNION_PREFIX, ns.render(a), ns.render(b));

    let decl_id = match ns.find_decl_by_name(&canonical) {
        Some(existing) => {
            stats.unions_reused += 1;
            existing
        }
        None => {
            let shared = ns.shared_interfaces(decl_a, decl_b);
            let marker = ns.add_type(TypeNode::Named(NamedType {
                name: UNION_MARKER.to_string(),
                args: vec![a, b],
                target: Resolution::External,
            }));
            let mut implements = vec![marker];
            for iface in shared {
                let name = ns
                    .decl(iface)
                    .ok_or(GraphError::DeclNotFound(iface))?
                    .name
                    .clone();
                implements.push(ns.add_type(TypeNode::Named(NamedType {
                    name,
                    args: Vec::new(),
                    target: Resolution::Decl(iface),
                })));
            }
            let mut decl = TypeDeclaration::class(canonical.clone()).synthetic();
            decl.implements = implements;
            debug!(name = %canonical, interfaces = decl.implements.len(), "synthesized union declaration");
            stats.unions_synthesized += 1;
            ns.add_decl(decl)
        }
    };

    // Rewrite the request in place: the operands are now encoded in the
    // canonical name and the implements list, not as live arguments.
    if let TypeNode::Named(n) = ns.type_node_mut(request) {
        n.name = canonical;
        n.args.clear();
        n.target = Resolution::Decl(decl_id);
    }
    Ok(())
}

fn operand_decl(ns: &Namespace, operand: TypeId) -> Option<DeclId> {
    match ns.type_node(operand) {
        TypeNode::Named(n) => n.target.decl(),
        _ => None,
    }
}
