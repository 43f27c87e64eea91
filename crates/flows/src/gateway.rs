//! The LLM gateway: the one place that calls an [`LlmProvider`].
//!
//! For every flow the gateway renders the template, sends it with a system
//! instruction carrying the output schema, and then narrows, deserializes and
//! validates the reply. Exactly one provider call is made per flow invocation;
//! nothing is retried.

use std::sync::Arc;

use async_trait::async_trait;
use pipeline::{CompletionRequest, LlmProvider, ResponseFormat};
use tracing::{debug, info, instrument, warn};

use crate::prompt::output_instruction;
use crate::prompts::{
    AnalyzeErrors, AnalyzeErrorsInput, ChainSummary, ExecutePipeline, ExecutePipelineInput,
    ExecutePipelineOutput, GeneratePipeline, GeneratePipelineInput, GeneratePipelineOutput,
    ReasoningAnalysis, SummarizeChain, SummarizeChainInput,
};
use crate::{extract_json_object, FlowError, PromptFlow};

/// Default cap on generated tokens per flow call.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;

/// The four prompt wrappers as one seam.
///
/// [`LlmGateway`] is the production implementation. The session depends only
/// on this trait, so tests can substitute canned responses per wrapper.
#[async_trait]
pub trait ReasoningFlows: Send + Sync {
    /// Plans a pipeline definition for a task description.
    async fn generate_pipeline(
        &self,
        input: GeneratePipelineInput,
    ) -> Result<GeneratePipelineOutput, FlowError>;

    /// Plays a pipeline definition out into steps and a conclusion.
    async fn execute_pipeline(
        &self,
        input: ExecutePipelineInput,
    ) -> Result<ExecutePipelineOutput, FlowError>;

    /// Condenses a finished reasoning chain.
    async fn summarize_chain(&self, input: SummarizeChainInput) -> Result<ChainSummary, FlowError>;

    /// Reviews reasoning steps for mistakes.
    async fn analyze_errors(&self, input: AnalyzeErrorsInput) -> Result<ReasoningAnalysis, FlowError>;
}

/// Runs [`PromptFlow`]s against a provider.
#[derive(Clone)]
pub struct LlmGateway {
    provider: Arc<dyn LlmProvider>,
    max_output_tokens: u32,
}

impl LlmGateway {
    /// Wraps `provider` with the default output token cap.
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    /// Overrides the cap on generated tokens per call.
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Runs flow `F` once.
    #[instrument(
        name = "flow",
        skip_all,
        fields(flow = F::NAME, provider = self.provider.name(), model = %self.provider.model())
    )]
    pub async fn run<F: PromptFlow>(&self, input: &F::Input) -> Result<F::Output, FlowError> {
        let request = CompletionRequest {
            system: Some(output_instruction(&F::output_schema())),
            prompt: F::render(input),
            max_output_tokens: self.max_output_tokens,
            response_format: ResponseFormat::Json,
        };

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|source| FlowError::Provider {
                flow: F::NAME,
                source,
            })?;

        info!(
            input_tokens = response.input_tokens.as_u64(),
            output_tokens = response.output_tokens.as_u64(),
            stop_reason = response.stop_reason.as_deref().unwrap_or("unknown"),
            "Provider call completed"
        );

        parse_reply::<F>(&response.text)
    }
}

/// Turns raw reply text into a validated flow output.
pub(crate) fn parse_reply<F: PromptFlow>(text: &str) -> Result<F::Output, FlowError> {
    if text.trim().is_empty() {
        warn!(flow = F::NAME, "Provider returned an empty reply");
        return Err(FlowError::EmptyOutput { flow: F::NAME });
    }

    let json = extract_json_object(text).ok_or_else(|| {
        debug!(flow = F::NAME, reply = text, "No JSON object in reply");
        FlowError::MalformedOutput { flow: F::NAME }
    })?;

    let output: F::Output =
        serde_json::from_str(json).map_err(|source| FlowError::SchemaMismatch {
            flow: F::NAME,
            source,
        })?;

    F::validate(&output).map_err(|reason| FlowError::InvalidOutput {
        flow: F::NAME,
        reason,
    })?;

    Ok(output)
}

#[async_trait]
impl ReasoningFlows for LlmGateway {
    async fn generate_pipeline(
        &self,
        input: GeneratePipelineInput,
    ) -> Result<GeneratePipelineOutput, FlowError> {
        self.run::<GeneratePipeline>(&input).await
    }

    async fn execute_pipeline(
        &self,
        input: ExecutePipelineInput,
    ) -> Result<ExecutePipelineOutput, FlowError> {
        self.run::<ExecutePipeline>(&input).await
    }

    async fn summarize_chain(&self, input: SummarizeChainInput) -> Result<ChainSummary, FlowError> {
        self.run::<SummarizeChain>(&input).await
    }

    async fn analyze_errors(&self, input: AnalyzeErrorsInput) -> Result<ReasoningAnalysis, FlowError> {
        self.run::<AnalyzeErrors>(&input).await
    }
}
