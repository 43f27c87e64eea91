//! Error types for the flow and session layers.
//!
//! [`FlowError`] distinguishes the ways one prompt wrapper can fail so that
//! logs stay useful; the session collapses all of them into one user-facing
//! notification.

use pipeline::{ExecutionId, ExecutionStatus, HistoryError, LlmError};
use thiserror::Error;

/// Failure of a single prompt-wrapper call.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The provider call itself failed.
    #[error("{flow}: provider call failed: {source}")]
    Provider {
        flow: &'static str,
        #[source]
        source: LlmError,
    },

    /// The provider answered with no text.
    #[error("{flow}: provider returned no output")]
    EmptyOutput { flow: &'static str },

    /// The reply contains no JSON object.
    #[error("{flow}: reply contains no JSON object")]
    MalformedOutput { flow: &'static str },

    /// The JSON object does not match the output schema.
    #[error("{flow}: reply does not match the output schema: {source}")]
    SchemaMismatch {
        flow: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The object matched the schema but failed a semantic check.
    #[error("{flow}: reply failed validation: {reason}")]
    InvalidOutput { flow: &'static str, reason: String },
}

impl FlowError {
    /// Name of the flow that failed.
    pub fn flow(&self) -> &'static str {
        match self {
            Self::Provider { flow, .. }
            | Self::EmptyOutput { flow }
            | Self::MalformedOutput { flow }
            | Self::SchemaMismatch { flow, .. }
            | Self::InvalidOutput { flow, .. } => *flow,
        }
    }
}

/// Why a submission did not produce a completed execution.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The prompt was empty or whitespace-only; nothing was called.
    #[error("Prompt is empty")]
    EmptyPrompt,

    /// Another submission is still pending; nothing was called.
    #[error("A submission is already in flight")]
    AlreadyInFlight,

    /// generate-pipeline failed. No execution record was created.
    #[error("Pipeline generation failed: {0}")]
    Generation(#[source] FlowError),

    /// The new record could not be added to the history.
    #[error("Could not record execution: {0}")]
    Recording(#[source] HistoryError),

    /// execute-pipeline failed (or its result could not be recorded). The
    /// record `id` has been marked failed.
    #[error("Pipeline execution {id} failed: {reason}")]
    Execution { id: ExecutionId, reason: ExecutionFailure },

    /// The submission task panicked or was cancelled before it finished.
    #[error("Submission was interrupted")]
    Interrupted,
}

impl SubmissionError {
    /// The record this failure left behind, if one was created.
    pub fn execution_id(&self) -> Option<ExecutionId> {
        match self {
            Self::Execution { id, .. } => Some(*id),
            _ => None,
        }
    }
}

/// What went wrong after the execution record was created.
#[derive(Debug, Error)]
pub enum ExecutionFailure {
    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Failure of a session operation on an existing record.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No record with this identifier is in the history.
    #[error("Unknown execution {id}")]
    UnknownExecution { id: ExecutionId },

    /// Summaries and analyses need a completed record.
    #[error("Execution {id} is {status}, not completed")]
    NotCompleted {
        id: ExecutionId,
        status: ExecutionStatus,
    },

    /// The summarize or analyze flow failed.
    #[error(transparent)]
    Flow(#[from] FlowError),

    /// The reasoning steps could not be serialized for the analysis prompt.
    #[error("Could not encode reasoning steps: {0}")]
    Encoding(#[from] serde_json::Error),
}
