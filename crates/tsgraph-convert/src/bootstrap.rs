//! Injects the built-in pseudo-type declarations
//!
//! Runs before anything else so the linker can resolve references to the
//! absent-value types and the primitive wrapper. Purely additive.

use tracing::debug;
use tsgraph_core::{Field, Method, Namespace, Parameter, TypeDeclaration};

pub const NULL_TYPE: &str = "NullType";
pub const UNDEFINED_TYPE: &str = "UndefinedType";
pub const VOID_TYPE: &str = "VoidType";
pub const SYMBOL_TYPE: &str = "Symbol";

pub fn run(ns: &mut Namespace) {
    // Bottom type.
    ns.add_decl(TypeDeclaration::class(NULL_TYPE).synthetic());

    // Absent-value type with its singleton constant, typed as itself.
    let undef_self = ns.named(UNDEFINED_TYPE);
    let mut undefined = TypeDeclaration::class(UNDEFINED_TYPE).synthetic();
    undefined.fields.push(Field {
        name: "Undefined".to_string(),
        ty: undef_self,
        readonly: true,
        is_static: true,
        template: Some("undefined".to_string()),
    });
    ns.add_decl(undefined);

    // void is-a undefined.
    let undef_ref = ns.named(UNDEFINED_TYPE);
    let mut void_decl = TypeDeclaration::class(VOID_TYPE).synthetic();
    void_decl.implements.push(undef_ref);
    ns.add_decl(void_decl);

    // Primitive wrapper with two constructor overloads.
    let string_ref = ns.named("string");
    let mut symbol = TypeDeclaration::class(SYMBOL_TYPE).synthetic();
    symbol.methods.push(Method::new(
        "constructor",
        vec![Parameter::new("value", string_ref)],
    ));
    symbol.methods.push(Method::new("constructor", vec![]));
    ns.add_decl(symbol);

    debug!("seeded built-in pseudo-types");
}
