//! The language-model provider port.
//!
//! [`LlmProvider`] is the only boundary between the domain and an external
//! model. Infrastructure crates implement it; the orchestration layer calls it
//! through the gateway and never sees HTTP.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{LlmError, ModelName, TokenCount};

/// Shape of the text the caller expects back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free text.
    #[default]
    Text,
    /// A single JSON object. Providers that support a JSON mode enable it.
    Json,
}

/// One single-turn completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// System instruction, if any.
    pub system: Option<String>,

    /// The rendered user prompt.
    pub prompt: String,

    /// Upper bound on generated tokens.
    pub max_output_tokens: u32,

    /// Whether the provider should constrain the reply to JSON.
    pub response_format: ResponseFormat,
}

/// The provider's answer to a [`CompletionRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Concatenated text output. May be empty if the model produced nothing.
    pub text: String,

    /// Prompt tokens billed for the call.
    pub input_tokens: TokenCount,

    /// Tokens the model generated.
    pub output_tokens: TokenCount,

    /// Provider-reported reason the generation stopped, when available.
    pub stop_reason: Option<String>,
}

/// A language-model provider reachable with one request/response call.
///
/// Implementations issue exactly one request per call: no retry, no streaming.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short provider label used in logs (e.g. `"anthropic"`).
    fn name(&self) -> &str;

    /// The model requests are sent to.
    fn model(&self) -> &ModelName;

    /// Sends `request` and returns the provider's answer.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
