//! ReasonFlow prompt wrappers, LLM gateway, and submission orchestrator.
//!
//! This crate provides the four schema-validated prompt wrappers
//! (generate-pipeline, execute-pipeline, summarize-chain, analyze-errors), the
//! [`LlmGateway`] that turns each wrapper into one provider call plus an
//! explicit parse/validate step, and the [`ReasoningSession`] that chains
//! generate → execute and keeps the execution history up to date.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Flows sequence calls between the domain types in
//! the [`pipeline`] crate and the [`pipeline::LlmProvider`] port. They contain
//! no transport code.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`prompt`] | `PromptFlow` contract and JSON extraction |
//! | [`prompts`] | The four wrappers and their input/output types |
//! | [`gateway`] | `LlmGateway`, `ReasoningFlows` |
//! | [`session`] | `ReasoningSession` |
//! | [`notifications`] | `Notification` and the fixed user-facing texts |
//! | [`errors`] | `FlowError`, `SubmissionError`, `SessionError` |

pub mod errors;
pub mod gateway;
pub mod notifications;
pub mod prompt;
pub mod prompts;
pub mod session;

pub use errors::{ExecutionFailure, FlowError, SessionError, SubmissionError};
pub use gateway::{LlmGateway, ReasoningFlows, DEFAULT_MAX_OUTPUT_TOKENS};
pub use notifications::{Notification, ERROR_DESCRIPTION, ERROR_TITLE, FAILED_CONCLUSION};
pub use prompt::{extract_json_object, PromptFlow};
pub use session::ReasoningSession;
