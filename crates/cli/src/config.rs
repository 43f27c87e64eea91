//! Global command-line settings shared by every subcommand.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use flows::{LlmGateway, ReasoningSession, DEFAULT_MAX_OUTPUT_TOKENS};
use llm::{build_provider, ProviderConfig, ProviderKind, ProviderOverrides};
use pipeline::{ExecutionHistory, ModelName};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Args)]
pub struct Settings {
    /// LLM provider (defaults to REASONFLOW_PROVIDER, then whichever API key is set)
    #[arg(long, global = true, value_parser = parse_provider)]
    pub provider: Option<ProviderKind>,

    /// Model name (defaults to REASONFLOW_MODEL, then the provider default)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Provider endpoint override (defaults to REASONFLOW_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output token limit for every flow call
    #[arg(
        long,
        global = true,
        env = "REASONFLOW_MAX_OUTPUT_TOKENS",
        default_value_t = DEFAULT_MAX_OUTPUT_TOKENS
    )]
    pub max_output_tokens: u32,

    /// Log output format on stderr
    #[arg(
        long,
        global = true,
        value_enum,
        env = "REASONFLOW_LOG_FORMAT",
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// OTLP gRPC endpoint for trace export (disabled when unset)
    #[arg(long, global = true, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

fn parse_provider(raw: &str) -> Result<ProviderKind, String> {
    raw.parse().map_err(|e: pipeline::LlmError| e.to_string())
}

impl Settings {
    fn overrides(&self) -> ProviderOverrides {
        ProviderOverrides {
            kind: self.provider,
            model: self.model.clone().and_then(ModelName::new),
            base_url: self.base_url.clone(),
        }
    }

    /// Resolves the provider and builds a session over `history`.
    pub fn build_session(&self, history: ExecutionHistory) -> Result<Arc<ReasoningSession>> {
        let config = ProviderConfig::from_env(self.overrides())
            .context("failed to resolve LLM provider configuration")?;
        let provider = build_provider(&config).context("failed to build LLM provider")?;
        let gateway = LlmGateway::new(provider).with_max_output_tokens(self.max_output_tokens);
        Ok(Arc::new(ReasoningSession::with_history(
            Arc::new(gateway),
            history,
        )))
    }
}
