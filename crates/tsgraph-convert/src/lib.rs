//! Whole-program transformation pipeline over a [`tsgraph_core::Namespace`]
//!
//! The pipeline takes the declaration forest an external parser produced
//! and rewrites it, in place, into a deduplicated, fully linked graph an
//! emitter can render directly: built-in pseudo-types are injected, every
//! named reference is bound or marked opaque, union-typed positions become
//! nominal union declarations, colliding delegate overloads are renamed
//! apart, duplicate members across partial declarations are merged, and
//! shapes the target language cannot express are lowered. Passes run
//! strictly in sequence; ordering is a correctness requirement enforced by
//! [`Pipeline::validate`].

pub mod bootstrap;
pub mod ctx;
pub mod dedup;
pub mod error;
pub mod link;
pub mod pipeline;
pub mod prune;
pub mod rename;
pub mod translate;
pub mod unions;

pub use ctx::{ConvertCtx, ConvertStats};
pub use error::ConvertError;
pub use pipeline::{Pass, Pipeline};

/// The opaque any-object type the target falls back to when a shape
/// cannot be expressed nominally.
pub const OBJECT_TYPE: &str = "object";
