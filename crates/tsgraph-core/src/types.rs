//! Type references as a closed sum

use serde::{Deserialize, Serialize};

use crate::decl::Parameter;
use crate::graph::{DeclId, TypeId};

/// Where a named reference points after linking.
///
/// `Unresolved` is the parser's initial state. The linker either binds the
/// name to a declaration (`Decl`) or marks it `External`: an opaque name
/// the graph has no declaration for, such as a primitive. Once a reference
/// is `Decl(_)` it is never re-pointed at a different declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Unresolved,
    External,
    Decl(DeclId),
}

impl Resolution {
    pub fn is_unresolved(self) -> bool {
        matches!(self, Resolution::Unresolved)
    }

    /// The bound declaration, if any.
    pub fn decl(self) -> Option<DeclId> {
        match self {
            Resolution::Decl(id) => Some(id),
            _ => None,
        }
    }
}

/// A name plus generic arguments, e.g. `Promise<string>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedType {
    pub name: String,
    pub args: Vec<TypeId>,
    pub target: Resolution,
}

impl NamedType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            target: Resolution::Unresolved,
        }
    }

    pub fn with_args(name: impl Into<String>, args: Vec<TypeId>) -> Self {
        Self {
            name: name.into(),
            args,
            target: Resolution::Unresolved,
        }
    }
}

/// An anonymous function shape, e.g. `(value: string) => void`.
///
/// Like declared methods, only the parameter list is significant; the
/// translator lowers these into named delegate declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionType {
    pub params: Vec<Parameter>,
}

/// A single type reference in the graph.
///
/// The sum is closed on purpose: every pass matches exhaustively, so a new
/// variant forces every pass to be revisited by the compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeNode {
    /// The dominant variant: a named reference with generic arguments.
    Named(NamedType),
    /// Anonymous function shape, lowered to a delegate by the translator.
    Function(FunctionType),
    /// Array of an element type, normalized to `Array<T>` by the translator.
    Array(TypeId),
}

impl TypeNode {
    pub fn as_named(&self) -> Option<&NamedType> {
        match self {
            TypeNode::Named(n) => Some(n),
            _ => None,
        }
    }
}
