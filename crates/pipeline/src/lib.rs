//! Core domain for ReasonFlow.
//!
//! This crate contains every domain concept used throughout the workspace: the
//! execution record and its lifecycle, the in-memory history that owns those
//! records, the reasoning-step payloads, and the [`LlmProvider`] port that
//! infrastructure crates implement.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`ExecutionId`, `ModelName`) |
//! | [`types`] | Value types (`PipelineDefinition`, `ReasoningStep`, `TokenCount`, `Timestamp`) |
//! | [`execution`] | `PipelineExecution` and its status transitions |
//! | [`history`] | `ExecutionHistory`, the newest-first state container |
//! | [`provider`] | `LlmProvider` port and its request/response types |
//! | [`errors`] | `LlmError`, `HistoryError` |

pub mod errors;
pub mod execution;
pub mod history;
pub mod identifiers;
pub mod provider;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{HistoryError, LlmError};
pub use execution::{ExecutionStatus, PipelineExecution};
pub use history::ExecutionHistory;
pub use identifiers::{ExecutionId, ModelName};
pub use provider::{CompletionRequest, CompletionResponse, LlmProvider, ResponseFormat};
pub use types::{PipelineDefinition, ReasoningStep, Timestamp, TokenCount};
