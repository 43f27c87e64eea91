//! execute-pipeline: prompt + pipeline definition → reasoning steps and a
//! conclusion.
//!
//! The definition is forwarded to the model verbatim. Nothing here interprets
//! it or checks that the returned steps follow it; the model is trusted to
//! play the plan out.

use pipeline::{PipelineDefinition, ReasoningStep};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::PromptFlow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutePipelineInput {
    /// The user prompt.
    pub prompt: String,
    /// The definition produced by generate-pipeline, untouched.
    pub pipeline_definition: PipelineDefinition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutePipelineOutput {
    /// The steps the model took to reach the conclusion.
    pub reasoning_steps: Vec<ReasoningStep>,
    /// The final conclusion.
    pub final_conclusion: String,
}

/// Asks the model to carry out a pipeline definition and report its steps.
pub struct ExecutePipeline;

impl PromptFlow for ExecutePipeline {
    const NAME: &'static str = "execute-pipeline";
    type Input = ExecutePipelineInput;
    type Output = ExecutePipelineOutput;

    fn render(input: &Self::Input) -> String {
        format!(
            "You are an AI assistant that executes a reasoning pipeline to answer a user's prompt.\n\
             The user's prompt is: {prompt}\n\
             \n\
             The reasoning pipeline you must follow is defined by this JSON:\n\
             {definition}\n\
             \n\
             Execute the steps in the pipeline. For each step, provide a thought, an observation, \
             and if applicable, the tool used and its input.\n\
             Your final output should be a JSON object containing the reasoning steps and the \
             final conclusion.\n",
            prompt = input.prompt,
            definition = input.pipeline_definition.as_str(),
        )
    }

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "reasoningSteps": {
                    "type": "array",
                    "description": "The steps the model took to reach the conclusion.",
                    "items": {
                        "type": "object",
                        "properties": {
                            "step": { "type": "integer", "minimum": 1 },
                            "title": { "type": "string" },
                            "thought": { "type": "string" },
                            "observation": { "type": "string" },
                            "tool": { "type": "string" },
                            "toolInput": { "type": "string" }
                        },
                        "required": ["step", "title", "thought", "observation"]
                    }
                },
                "finalConclusion": {
                    "type": "string",
                    "description": "The final conclusion."
                }
            },
            "required": ["reasoningSteps", "finalConclusion"]
        })
    }

    fn validate(output: &Self::Output) -> Result<(), String> {
        match output.reasoning_steps.iter().position(|s| s.step == 0) {
            Some(index) => Err(format!("reasoning step at position {index} has step index 0")),
            None => Ok(()),
        }
    }
}
