//! Pipeline error types.

use thiserror::Error;

use cadence_core::AgentError;
use cadence_notion::NotionError;

/// Errors that can occur while running the pipeline.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// An agent stage failed
    #[error("stage {stage} failed: {source}")]
    Agent {
        /// Name of the stage that failed
        stage: &'static str,
        /// Underlying agent error
        source: AgentError,
    },

    /// A store operation failed
    #[error("store operation {op} failed: {source}")]
    Store {
        /// Name of the operation that failed
        op: &'static str,
        /// Underlying store error
        source: NotionError,
    },

    /// The pipeline configuration was incomplete
    #[error("configuration error: {0}")]
    Config(String),
}

impl WorkflowError {
    pub(crate) fn stage(stage: &'static str) -> impl FnOnce(AgentError) -> Self {
        move |source| Self::Agent { stage, source }
    }

    pub(crate) fn store(op: &'static str) -> impl FnOnce(NotionError) -> Self {
        move |source| Self::Store { op, source }
    }
}
