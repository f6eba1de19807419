//! Declaration-level shapes: classes, interfaces, delegates and their members

use serde::{Deserialize, Serialize};

use crate::graph::TypeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclKind {
    Class,
    Interface,
    /// A named function shape. Overloaded delegates collide by name and are
    /// renamed apart by the disambiguator.
    Delegate,
}

/// A named type declaration.
///
/// Identity is by name until the disambiguator runs; several declarations
/// may legitimately share a name before then (partial declarations emitted
/// by the parser for the same logical type).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    pub kind: DeclKind,
    /// Generic parameter names, in declaration order. Always present; the
    /// parser boundary contract guarantees a (possibly empty) list.
    pub generics: Vec<String>,
    /// References to implemented interfaces (and extended base types).
    pub implements: Vec<TypeId>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    /// Set on declarations this pipeline invented (bootstrap pseudo-types,
    /// synthesized unions, emitted delegates). Only synthetic declarations
    /// are candidates for pruning.
    pub synthetic: bool,
}

impl TypeDeclaration {
    pub fn new(name: impl Into<String>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            kind,
            generics: Vec::new(),
            implements: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            synthetic: false,
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, DeclKind::Class)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, DeclKind::Interface)
    }

    pub fn delegate(name: impl Into<String>) -> Self {
        Self::new(name, DeclKind::Delegate)
    }

    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    pub fn with_generics(mut self, params: Vec<String>) -> Self {
        self.generics = params;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: TypeId,
    pub readonly: bool,
    pub is_static: bool,
    /// Literal template value for singleton constant fields, emitted
    /// verbatim by the target emitter (e.g. `undefined`).
    pub template: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            readonly: false,
            is_static: false,
            template: None,
        }
    }
}

/// A method or delegate signature. Only the parameter list is significant
/// for signature equality; names and parameter names are not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub params: Vec<Parameter>,
}

impl Method {
    pub fn new(name: impl Into<String>, params: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeId,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}
