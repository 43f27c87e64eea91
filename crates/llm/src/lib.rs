//! ReasonFlow LLM provider adapters.
//!
//! Implements [`pipeline::LlmProvider`] for Anthropic's Messages API and
//! Google's Gemini `generateContent` API. Each call is a single HTTP request:
//! there is no retry, no back-off, and no client-side timeout.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Request formatting, response parsing and HTTP status
//! mapping live here. The `flows` crate sees only [`pipeline::LlmProvider`].

pub mod anthropic;
pub mod config;
pub mod gemini;
mod http;

use std::sync::Arc;

use pipeline::{LlmError, LlmProvider};
use tracing::info;

pub use anthropic::AnthropicProvider;
pub use config::{ProviderConfig, ProviderKind, ProviderOverrides};
pub use gemini::GeminiProvider;

/// Builds the provider described by `config`.
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let provider: Arc<dyn LlmProvider> = match config.kind {
        ProviderKind::Anthropic => {
            let mut provider = AnthropicProvider::new(config.api_key.clone())?;
            if let Some(model) = &config.model {
                provider = provider.with_model(model.clone());
            }
            if let Some(url) = &config.base_url {
                provider = provider.with_base_url(url);
            }
            Arc::new(provider)
        }
        ProviderKind::Gemini => {
            let mut provider = GeminiProvider::new(config.api_key.clone())?;
            if let Some(model) = &config.model {
                provider = provider.with_model(model.clone());
            }
            if let Some(url) = &config.base_url {
                provider = provider.with_base_url(url);
            }
            Arc::new(provider)
        }
    };

    info!(
        provider = provider.name(),
        model = %provider.model(),
        "LLM provider configured"
    );
    Ok(provider)
}
