//! Shared value types for the reasoning-pipeline domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! the actual payloads that flow between the user, the model, and the history:
//! the opaque pipeline definition, the reasoning steps the model reports, token
//! usage, and timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Pipeline definition
// ---------------------------------------------------------------------------

/// A pipeline definition as produced by the generate-pipeline flow.
///
/// The text is nominally JSON but is **never parsed or validated** here. It is
/// stored on the execution record and handed to the execute-pipeline flow
/// byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineDefinition(String);

impl PipelineDefinition {
    /// Wraps raw definition text unchanged.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the definition text exactly as received.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PipelineDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Reasoning steps
// ---------------------------------------------------------------------------

/// One step of the chain of thought reported by the model.
///
/// Steps are independent record values with no cross-references. The order of
/// a sequence of steps is its array order; `step` is the model's own label and
/// is only required to be positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasoningStep {
    /// Positive step label (1-based in well-formed output).
    pub step: u32,

    /// Short heading for the step.
    pub title: String,

    /// What the model was thinking at this step.
    pub thought: String,

    /// What the model observed as the result of the step.
    pub observation: String,

    /// Tool the model claims to have used, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,

    /// Input the model claims to have passed to [`Self::tool`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_input: Option<String>,
}

impl ReasoningStep {
    /// Returns the tool name and input when both are present and non-blank.
    pub fn tool_usage(&self) -> Option<(&str, &str)> {
        match (self.tool.as_deref(), self.tool_input.as_deref()) {
            (Some(tool), Some(input)) if !tool.trim().is_empty() && !input.trim().is_empty() => {
                Some((tool, input))
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Token accounting
// ---------------------------------------------------------------------------

/// Number of tokens consumed in an LLM API call, as reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenCount(u64);

impl TokenCount {
    /// Creates a [`TokenCount`] from a raw integer.
    pub fn new(count: u64) -> Self {
        Self(count)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns `true` if this count is zero.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Whole seconds elapsed from `self` until `later`; zero if `later` is
    /// earlier.
    pub fn seconds_until(self, later: Timestamp) -> u64 {
        u64::try_from((later.0 - self.0).num_seconds()).unwrap_or(0)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
