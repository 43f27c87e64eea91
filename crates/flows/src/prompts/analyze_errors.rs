//! analyze-errors: reasoning steps → suspected errors and suggestions.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::PromptFlow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeErrorsInput {
    /// The captured reasoning steps to analyze, as text.
    pub reasoning_steps: String,
}

/// Potential problems the model found in a reasoning chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningAnalysis {
    /// Potential errors or inconsistencies found in the steps.
    pub errors: Vec<String>,
    /// Suggestions for improving the reasoning pipeline.
    pub suggestions: Vec<String>,
}

pub struct AnalyzeErrors;

impl PromptFlow for AnalyzeErrors {
    const NAME: &'static str = "analyze-errors";
    type Input = AnalyzeErrorsInput;
    type Output = ReasoningAnalysis;

    fn render(input: &Self::Input) -> String {
        format!(
            "You are an AI expert in analyzing reasoning pipelines for errors and inconsistencies. \
             Analyze the following reasoning steps and identify potential errors or \
             inconsistencies in the logic. Provide suggestions for improving the reasoning \
             pipeline.\n\nReasoning Steps:\n{}\n",
            input.reasoning_steps
        )
    }

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "errors": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "A list of potential errors or inconsistencies found in the reasoning steps."
                },
                "suggestions": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Suggestions for improving the reasoning pipeline."
                }
            },
            "required": ["errors", "suggestions"]
        })
    }
}
