//! generate-pipeline: user task description → pipeline definition text.

use pipeline::PipelineDefinition;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::PromptFlow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratePipelineInput {
    /// A description of the desired reasoning pipeline.
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePipelineOutput {
    /// JSON text describing the pipeline. Kept as the model wrote it.
    pub pipeline_definition: PipelineDefinition,
}

/// Asks the model to plan a reasoning pipeline for a task.
pub struct GeneratePipeline;

impl PromptFlow for GeneratePipeline {
    const NAME: &'static str = "generate-pipeline";
    type Input = GeneratePipelineInput;
    type Output = GeneratePipelineOutput;

    fn render(input: &Self::Input) -> String {
        format!(
            "You are an expert pipeline generator. Please create a pipeline definition based on \
             the following description: {}. The pipeline definition should be a JSON string.\n",
            input.prompt
        )
    }

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "pipelineDefinition": {
                    "type": "string",
                    "description": "A JSON string representing the generated pipeline definition."
                }
            },
            "required": ["pipelineDefinition"]
        })
    }
}
