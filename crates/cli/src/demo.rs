//! Sample records for `interactive --demo-history`.

use chrono::{Duration, Utc};
use pipeline::{
    ExecutionHistory, ExecutionId, HistoryError, PipelineDefinition, PipelineExecution,
    ReasoningStep, Timestamp,
};

const REVENUE_DEFINITION: &str = r#"{
  "steps": [
    {
      "action": "Find fiscal year 2023 revenue for NVIDIA.",
      "input": "NVIDIA"
    },
    {
      "action": "Format the result.",
      "input": "Result of step 1"
    }
  ]
}"#;

const SUNRISE_DEFINITION: &str = r#"{
  "steps": [
    {
      "action": "Brainstorm themes for an uplifting sunrise poem.",
      "input": "sunrise, hope, new beginnings"
    },
    {
      "action": "Draft poem using themes.",
      "input": "Result of step 1"
    },
    {
      "action": "Refine poem for flow and imagery.",
      "input": "Result of step 2"
    }
  ]
}"#;

fn step(n: u32, title: &str, thought: &str, observation: &str) -> ReasoningStep {
    ReasoningStep {
        step: n,
        title: title.to_string(),
        thought: thought.to_string(),
        observation: observation.to_string(),
        tool: None,
        tool_input: None,
    }
}

/// Two completed records, one hour and one day old, newest first.
pub fn history() -> Result<ExecutionHistory, HistoryError> {
    let now = Utc::now();

    let revenue = PipelineExecution::completed(
        ExecutionId::new_random(),
        "What was the approximate revenue of NVIDIA in their 2023 fiscal year?",
        PipelineDefinition::new(REVENUE_DEFINITION),
        vec![
            step(
                1,
                "Initial Thought",
                "I need to find a specific financial data point: NVIDIA's revenue for fiscal year 2023. This requires a search.",
                "The plan is to use a search tool to find financial reports or news articles with this information.",
            ),
            ReasoningStep {
                tool: Some("Search".to_string()),
                tool_input: Some("NVIDIA revenue fiscal year 2023".to_string()),
                ..step(
                    2,
                    "Execute Search",
                    "I will use a search engine to get the revenue data.",
                    "Search results point to official financial statements and reports. Multiple sources state the revenue was approximately $27 billion.",
                )
            },
            step(
                3,
                "Synthesize & Verify",
                "The figure of ~$27 billion appears consistent across reliable sources. I will now formulate the final answer.",
                "No conflicting information was found. The conclusion is ready.",
            ),
        ],
        "NVIDIA's revenue for its 2023 fiscal year was approximately $27 billion.",
        Timestamp::from_utc(now - Duration::hours(1)),
    );

    let sunrise = PipelineExecution::completed(
        ExecutionId::new_random(),
        "Write a short, uplifting poem about the sunrise.",
        PipelineDefinition::new(SUNRISE_DEFINITION),
        vec![
            step(
                1,
                "Analyze Request",
                "The user wants a short, uplifting poem about the sunrise. Key concepts are \"short\", \"uplifting\", and \"sunrise\".",
                "I should focus on imagery of light, warmth, and the theme of new opportunities.",
            ),
            step(
                2,
                "Drafting",
                "I will now generate a few lines combining the ideas of light overcoming darkness and the start of a new day.",
                "The initial draft is complete. It has the right tone.",
            ),
        ],
        "A canvas painted gold and red,\nA new day's promise lies ahead.\nThe shadows flee, the darkness wanes,\nAs morning's gentle light remains.",
        Timestamp::from_utc(now - Duration::days(1)),
    );

    ExecutionHistory::with_records(vec![revenue, sunrise])
}
