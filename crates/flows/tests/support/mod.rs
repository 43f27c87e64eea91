//! Test doubles shared by the flow and session integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use flows::prompts::{
    AnalyzeErrorsInput, ChainSummary, ExecutePipelineInput, ExecutePipelineOutput,
    GeneratePipelineInput, GeneratePipelineOutput, ReasoningAnalysis, SummarizeChainInput,
};
use flows::{FlowError, ReasoningFlows};
use pipeline::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, ModelName, PipelineDefinition,
    ReasoningStep, TokenCount,
};
use tokio::sync::Notify;

// ---------------------------------------------------------------------------
// Flow-level fake
// ---------------------------------------------------------------------------

/// Pauses a fake call until the test releases it.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

impl Gate {
    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

/// Canned responses per wrapper, with every input recorded.
#[derive(Default)]
pub struct FakeFlows {
    generate: Mutex<VecDeque<Result<GeneratePipelineOutput, FlowError>>>,
    execute: Mutex<VecDeque<Result<ExecutePipelineOutput, FlowError>>>,
    summarize: Mutex<VecDeque<Result<ChainSummary, FlowError>>>,
    analyze: Mutex<VecDeque<Result<ReasoningAnalysis, FlowError>>>,

    pub generate_inputs: Mutex<Vec<GeneratePipelineInput>>,
    pub execute_inputs: Mutex<Vec<ExecutePipelineInput>>,
    pub summarize_inputs: Mutex<Vec<SummarizeChainInput>>,
    pub analyze_inputs: Mutex<Vec<AnalyzeErrorsInput>>,

    pub generate_gate: Option<Gate>,
    pub execute_gate: Option<Gate>,
}

impl FakeFlows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gate_generate(mut self) -> Self {
        self.generate_gate = Some(Gate::default());
        self
    }

    pub fn gate_execute(mut self) -> Self {
        self.execute_gate = Some(Gate::default());
        self
    }

    pub fn push_generate(&self, result: Result<GeneratePipelineOutput, FlowError>) {
        self.generate.lock().unwrap().push_back(result);
    }

    pub fn push_execute(&self, result: Result<ExecutePipelineOutput, FlowError>) {
        self.execute.lock().unwrap().push_back(result);
    }

    pub fn push_summarize(&self, result: Result<ChainSummary, FlowError>) {
        self.summarize.lock().unwrap().push_back(result);
    }

    pub fn push_analyze(&self, result: Result<ReasoningAnalysis, FlowError>) {
        self.analyze.lock().unwrap().push_back(result);
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_inputs.lock().unwrap().len()
    }

    pub fn execute_calls(&self) -> usize {
        self.execute_inputs.lock().unwrap().len()
    }
}

fn next<T>(queue: &Mutex<VecDeque<Result<T, FlowError>>>, flow: &'static str) -> Result<T, FlowError> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or(Err(FlowError::EmptyOutput { flow }))
}

#[async_trait]
impl ReasoningFlows for FakeFlows {
    async fn generate_pipeline(
        &self,
        input: GeneratePipelineInput,
    ) -> Result<GeneratePipelineOutput, FlowError> {
        self.generate_inputs.lock().unwrap().push(input);
        if let Some(gate) = &self.generate_gate {
            gate.pass().await;
        }
        next(&self.generate, "generate-pipeline")
    }

    async fn execute_pipeline(
        &self,
        input: ExecutePipelineInput,
    ) -> Result<ExecutePipelineOutput, FlowError> {
        self.execute_inputs.lock().unwrap().push(input);
        if let Some(gate) = &self.execute_gate {
            gate.pass().await;
        }
        next(&self.execute, "execute-pipeline")
    }

    async fn summarize_chain(&self, input: SummarizeChainInput) -> Result<ChainSummary, FlowError> {
        self.summarize_inputs.lock().unwrap().push(input);
        next(&self.summarize, "summarize-chain")
    }

    async fn analyze_errors(&self, input: AnalyzeErrorsInput) -> Result<ReasoningAnalysis, FlowError> {
        self.analyze_inputs.lock().unwrap().push(input);
        next(&self.analyze, "analyze-errors")
    }
}

// ---------------------------------------------------------------------------
// Provider-level fake
// ---------------------------------------------------------------------------

/// Replies with canned text in order and records every request.
pub struct ScriptedProvider {
    model: ModelName,
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            model: ModelName::new("scripted-model").unwrap(),
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &ModelName {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request);
        let text = self.replies.lock().unwrap().pop_front().unwrap_or(Ok(String::new()))?;
        Ok(CompletionResponse {
            text,
            input_tokens: TokenCount::new(12),
            output_tokens: TokenCount::new(34),
            stop_reason: Some("end_turn".to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub const HAIKU_PROMPT: &str = "Write a haiku about rain.";
pub const HAIKU_DEFINITION: &str = "{\"steps\":[{\"action\":\"Draft a haiku\",\"input\":\"rain\"}]}";
pub const HAIKU_CONCLUSION: &str = "Soft rain falls at dusk...";

pub fn haiku_steps() -> Vec<ReasoningStep> {
    vec![ReasoningStep {
        step: 1,
        title: "Draft".to_string(),
        thought: "Five, seven, five syllables about rain.".to_string(),
        observation: "The draft scans correctly.".to_string(),
        tool: None,
        tool_input: None,
    }]
}

pub fn generated(definition: &str) -> GeneratePipelineOutput {
    GeneratePipelineOutput {
        pipeline_definition: PipelineDefinition::new(definition),
    }
}

pub fn executed(steps: Vec<ReasoningStep>, conclusion: &str) -> ExecutePipelineOutput {
    ExecutePipelineOutput {
        reasoning_steps: steps,
        final_conclusion: conclusion.to_string(),
    }
}
