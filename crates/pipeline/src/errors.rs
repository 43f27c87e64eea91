//! Domain error types.
//!
//! [`LlmError`] is the error half of the [`crate::LlmProvider`] port: every
//! provider adapter maps its transport and API failures onto it, so callers
//! never see `reqwest` or vendor-specific error shapes.
//!
//! [`HistoryError`] covers rejected mutations of the execution history.
//!
//! None of these errors is retried anywhere in the system.

use thiserror::Error;

use crate::{ExecutionId, ExecutionStatus};

// ---------------------------------------------------------------------------
// Provider errors
// ---------------------------------------------------------------------------

/// Failure of a single call to a language-model provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LlmError {
    /// The provider could not be reached (DNS, TLS, connection reset, ...).
    #[error("Provider unreachable: {message}")]
    Unreachable {
        /// Transport-level description of the failure.
        message: String,
    },

    /// The provider rejected the credentials (HTTP 401 / 403).
    #[error("Provider rejected credentials: {message}")]
    Authentication {
        /// Response body or reason returned by the provider.
        message: String,
    },

    /// The provider answered with a non-success status.
    #[error("Provider API error {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body, for logs.
        body: String,
    },

    /// The provider answered with a body that is not the documented envelope.
    #[error("Invalid provider response: {message}")]
    InvalidResponse {
        /// Description of what could not be decoded.
        message: String,
    },

    /// The provider is not configured (missing API key, unknown provider name).
    ///
    /// Produced at start-up; no request is ever sent with an invalid config.
    #[error("Provider configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// History errors
// ---------------------------------------------------------------------------

/// A rejected mutation of the execution history.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// No record with this identifier exists.
    #[error("Unknown execution {id}")]
    UnknownExecution {
        /// The identifier that was looked up.
        id: ExecutionId,
    },

    /// A record with this identifier is already in the history.
    #[error("Execution {id} already exists")]
    DuplicateExecution {
        /// The identifier that collided.
        id: ExecutionId,
    },

    /// The requested status change is not `running -> completed` or
    /// `running -> failed`.
    #[error("Execution {id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// The record being updated.
        id: ExecutionId,
        /// Status the record currently has.
        from: ExecutionStatus,
        /// Status the caller asked for.
        to: ExecutionStatus,
    },
}
