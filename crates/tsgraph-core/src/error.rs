use thiserror::Error;

use crate::graph::DeclId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("declaration {0:?} does not exist or has been pruned")]
    DeclNotFound(DeclId),
}
