//! Anthropic Messages API adapter.

use async_trait::async_trait;
use pipeline::{CompletionRequest, CompletionResponse, LlmError, LlmProvider, ModelName, TokenCount};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::http::{build_client, normalize_base_url, send_json};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const API_VERSION: &str = "2023-06-01";

/// [`LlmProvider`] backed by `POST /v1/messages`.
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: ModelName,
}

impl AnthropicProvider {
    /// Creates a provider for the default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Configuration {
                message: "Anthropic API key is empty".to_string(),
            });
        }
        let model = ModelName::new(DEFAULT_MODEL).ok_or_else(|| LlmError::Configuration {
            message: "default Anthropic model name is empty".to_string(),
        })?;
        Ok(Self {
            client: build_client()?,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
        })
    }

    /// Points the provider at a different endpoint (proxies, tests).
    pub fn with_base_url(mut self, url: impl AsRef<str>) -> Self {
        self.base_url = normalize_base_url(url.as_ref());
        self
    }

    pub fn with_model(mut self, model: ModelName) -> Self {
        self.model = model;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Default)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &ModelName {
        &self.model
    }

    #[instrument(name = "anthropic.complete", skip_all, fields(model = %self.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        // The Messages API has no JSON mode; the schema travels in the system
        // instruction instead.
        let body = MessagesRequest {
            model: self.model.as_str(),
            max_tokens: request.max_output_tokens,
            system: request.system.as_deref(),
            messages: [Message {
                role: "user",
                content: &request.prompt,
            }],
        };

        let http = self
            .client
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body);

        let response: MessagesResponse = send_json(self.name(), http).await?;

        let text = response
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("");

        Ok(CompletionResponse {
            text,
            input_tokens: TokenCount::new(response.usage.input_tokens),
            output_tokens: TokenCount::new(response.usage.output_tokens),
            stop_reason: response.stop_reason,
        })
    }
}
