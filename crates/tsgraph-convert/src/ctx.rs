//! Explicit pipeline context threaded through the passes

use serde::Serialize;
use tsgraph_core::TypeId;

/// State carried across passes. The union request list comes from the
/// external parser; statistics accumulate as passes run. Passes receive
/// this explicitly instead of mutating ambient converter state.
#[derive(Debug, Clone, Default)]
pub struct ConvertCtx {
    /// Union requests in request order. Each id points at a `Named` node
    /// whose two generic arguments are the union operands.
    pub unions: Vec<TypeId>,
    pub stats: ConvertStats,
}

impl ConvertCtx {
    pub fn new(unions: Vec<TypeId>) -> Self {
        Self {
            unions,
            stats: ConvertStats::default(),
        }
    }
}

/// Per-run statistics, reported by [`crate::Pipeline::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConvertStats {
    pub references_resolved: usize,
    pub references_external: usize,
    pub unions_synthesized: usize,
    pub unions_reused: usize,
    pub unions_collapsed: usize,
    pub declarations_renamed: usize,
    pub members_removed: usize,
    pub delegates_emitted: usize,
    pub references_cleansed: usize,
    pub declarations_pruned: usize,
}
