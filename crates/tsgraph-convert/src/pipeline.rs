//! Enum-driven pass pipeline
//!
//! Pass ordering is a hard correctness requirement, not a performance
//! choice: the bootstrap types must exist before linking, linking must
//! precede union synthesis, the name set must be stable before renaming
//! and member dedup, and pruning judges the translator's final reference
//! graph. [`Pipeline::validate`] rejects any schedule that violates these
//! constraints before a single pass touches the graph.

use serde::{Deserialize, Serialize};
use tracing::info;
use tsgraph_core::Namespace;

use crate::ctx::{ConvertCtx, ConvertStats};
use crate::error::ConvertError;
use crate::{bootstrap, dedup, link, prune, rename, translate, unions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pass {
    Bootstrap,
    LinkReferences,
    SynthesizeUnions,
    DisambiguateOverloads,
    EliminateDuplicateMembers,
    Translate,
    PruneDeadTypes,
}

impl Pass {
    pub fn name(self) -> &'static str {
        match self {
            Pass::Bootstrap => "bootstrap",
            Pass::LinkReferences => "link-references",
            Pass::SynthesizeUnions => "synthesize-unions",
            Pass::DisambiguateOverloads => "disambiguate-overloads",
            Pass::EliminateDuplicateMembers => "eliminate-duplicate-members",
            Pass::Translate => "translate",
            Pass::PruneDeadTypes => "prune-dead-types",
        }
    }
}

/// Pairs (before, after): whenever `after` is scheduled, `before` must be
/// scheduled earlier.
const ORDERING: [(Pass, Pass); 7] = [
    (Pass::Bootstrap, Pass::LinkReferences),
    (Pass::LinkReferences, Pass::SynthesizeUnions),
    (Pass::SynthesizeUnions, Pass::DisambiguateOverloads),
    (Pass::SynthesizeUnions, Pass::EliminateDuplicateMembers),
    (Pass::DisambiguateOverloads, Pass::Translate),
    (Pass::EliminateDuplicateMembers, Pass::Translate),
    (Pass::Translate, Pass::PruneDeadTypes),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    passes: Vec<Pass>,
}

impl Pipeline {
    pub fn new(passes: Vec<Pass>) -> Self {
        Self { passes }
    }

    /// The canonical full schedule.
    pub fn standard() -> Self {
        Self::new(vec![
            Pass::Bootstrap,
            Pass::LinkReferences,
            Pass::SynthesizeUnions,
            Pass::DisambiguateOverloads,
            Pass::EliminateDuplicateMembers,
            Pass::Translate,
            Pass::PruneDeadTypes,
        ])
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    pub fn validate(&self) -> Result<(), ConvertError> {
        for (i, pass) in self.passes.iter().enumerate() {
            if self.passes[..i].contains(pass) {
                return Err(ConvertError::InvalidPipeline(format!(
                    "pass {} is scheduled twice",
                    pass.name()
                )));
            }
        }

        let position = |p: Pass| self.passes.iter().position(|&q| q == p);
        for (before, after) in ORDERING {
            let Some(after_at) = position(after) else { continue };
            match position(before) {
                Some(before_at) if before_at < after_at => {}
                _ => {
                    return Err(ConvertError::InvalidPipeline(format!(
                        "{} requires {} to run earlier",
                        after.name(),
                        before.name()
                    )))
                }
            }
        }

        if let Some(at) = position(Pass::PruneDeadTypes) {
            if at + 1 != self.passes.len() {
                return Err(ConvertError::InvalidPipeline(
                    "prune-dead-types must be the final pass".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Run every scheduled pass, in order, over the shared namespace.
    /// Fail-fast: the first pass error aborts the run and leaves the
    /// graph in an unspecified intermediate state.
    pub fn run(
        &self,
        ns: &mut Namespace,
        ctx: &mut ConvertCtx,
    ) -> Result<ConvertStats, ConvertError> {
        self.validate()?;
        for &pass in &self.passes {
            info!(pass = pass.name(), declarations = ns.live_count(), "running pass");
            match pass {
                Pass::Bootstrap => bootstrap::run(ns),
                Pass::LinkReferences => link::run(ns, &mut ctx.stats),
                Pass::SynthesizeUnions => unions::run(ns, ctx)?,
                Pass::DisambiguateOverloads => rename::run(ns, &mut ctx.stats),
                Pass::EliminateDuplicateMembers => dedup::run(ns, &mut ctx.stats),
                Pass::Translate => translate::run(ns, &mut ctx.stats),
                Pass::PruneDeadTypes => prune::run(ns, &mut ctx.stats),
            }
        }
        Ok(ctx.stats.clone())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_schedule_validates() {
        assert!(Pipeline::standard().validate().is_ok());
    }

    #[test]
    fn duplicate_pass_is_rejected() {
        let pipeline = Pipeline::new(vec![Pass::Bootstrap, Pass::Bootstrap]);
        assert!(matches!(
            pipeline.validate(),
            Err(ConvertError::InvalidPipeline(_))
        ));
    }

    #[test]
    fn linking_requires_bootstrap_first() {
        let pipeline = Pipeline::new(vec![Pass::LinkReferences]);
        assert!(pipeline.validate().is_err());

        let pipeline = Pipeline::new(vec![Pass::LinkReferences, Pass::Bootstrap]);
        assert!(pipeline.validate().is_err());

        let pipeline = Pipeline::new(vec![Pass::Bootstrap, Pass::LinkReferences]);
        assert!(pipeline.validate().is_ok());
    }

    #[test]
    fn unions_must_follow_linking() {
        let pipeline = Pipeline::new(vec![Pass::Bootstrap, Pass::SynthesizeUnions]);
        assert!(pipeline.validate().is_err());
    }

    #[test]
    fn prune_must_be_last() {
        let mut passes = Pipeline::standard().passes().to_vec();
        let prune_at = passes
            .iter()
            .position(|&p| p == Pass::PruneDeadTypes)
            .expect("standard schedules prune");
        passes.swap(prune_at, prune_at - 1);
        assert!(Pipeline::new(passes).validate().is_err());
    }

    #[test]
    fn run_rejects_an_invalid_schedule_before_touching_the_graph() {
        let mut ns = Namespace::new();
        let mut ctx = ConvertCtx::default();
        let pipeline = Pipeline::new(vec![Pass::LinkReferences]);
        assert!(pipeline.run(&mut ns, &mut ctx).is_err());
        assert_eq!(ns.live_count(), 0);
    }
}
