//! Core declaration graph and type model for tsgraph
//!
//! A [`Namespace`] owns every type declaration and every type reference of
//! one compilation unit. Declarations and type nodes live in flat arenas
//! addressed by [`DeclId`] and [`TypeId`], so cross-references are plain
//! indices instead of shared pointers and rewriting a reference in place is
//! a slot mutation.

pub mod decl;
pub mod error;
pub mod graph;
pub mod types;

pub use decl::{DeclKind, Field, Method, Parameter, TypeDeclaration};
pub use error::GraphError;
pub use graph::{DeclId, Namespace, TypeId};
pub use types::{FunctionType, NamedType, Resolution, TypeNode};
