//! summarize-chain: reasoning steps + conclusion → concise summary.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::PromptFlow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeChainInput {
    /// The individual reasoning steps, one line each.
    pub reasoning_steps: Vec<String>,
    /// The final conclusion reached by the pipeline.
    pub final_conclusion: String,
}

/// A concise summary of a reasoning chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSummary {
    /// The summary text.
    pub summary: String,
}

/// Asks the model for a short summary of a finished reasoning chain.
pub struct SummarizeChain;

impl PromptFlow for SummarizeChain {
    const NAME: &'static str = "summarize-chain";
    type Input = SummarizeChainInput;
    type Output = ChainSummary;

    fn render(input: &Self::Input) -> String {
        let mut text = String::from(
            "Summarize the following reasoning steps and final conclusion in a concise manner:\n\n\
             Reasoning Steps:\n",
        );
        for step in &input.reasoning_steps {
            text.push_str("\n- ");
            text.push_str(step);
        }
        text.push_str("\n\nFinal Conclusion: ");
        text.push_str(&input.final_conclusion);
        text
    }

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "summary": {
                    "type": "string",
                    "description": "A concise summary of the reasoning steps and the final conclusion."
                }
            },
            "required": ["summary"]
        })
    }
}
