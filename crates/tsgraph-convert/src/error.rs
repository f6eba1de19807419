use thiserror::Error;

use tsgraph_core::{GraphError, TypeId};

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("invalid pipeline: {0}")]
    InvalidPipeline(String),

    #[error("malformed union request {type_id:?}: {reason}")]
    MalformedUnionRequest { type_id: TypeId, reason: String },

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}
