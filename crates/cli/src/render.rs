//! Plain-text rendering of executions, history, and post-run reports.
//!
//! Every function returns a `String`; printing is left to the caller.

use flows::prompts::{ChainSummary, ReasoningAnalysis};
use pipeline::{ExecutionId, ExecutionStatus, PipelineExecution, Timestamp};

const PROMPT_PREVIEW_CHARS: usize = 60;

/// Renders one execution as a vertical timeline of cards.
pub fn render_timeline(execution: &PipelineExecution) -> String {
    let mut lines = vec![
        heading("Initial Prompt"),
        indent(execution.prompt()),
    ];

    for step in execution.reasoning_steps() {
        lines.push(String::new());
        lines.push(heading(&format!("Step {}: {}", step.step, step.title)));
        lines.push("Thought".to_string());
        lines.push(indent(&step.thought));
        if let Some((tool, input)) = step.tool_usage() {
            lines.push(format!("Tool Used: {tool}"));
            lines.push(indent(input));
        }
        lines.push("Observation".to_string());
        lines.push(indent(&step.observation));
    }

    lines.push(String::new());
    match execution.status() {
        ExecutionStatus::Running => lines.push("Generating...".to_string()),
        ExecutionStatus::Completed => {
            lines.push(heading("Final Conclusion"));
            lines.push(indent(execution.final_conclusion()));
        }
        ExecutionStatus::Failed => {
            lines.push(heading("Failed"));
            lines.push(indent(execution.final_conclusion()));
        }
    }

    lines.join("\n")
}

/// Renders the history list, newest first, marking the active record.
pub fn render_history(
    executions: &[PipelineExecution],
    active: Option<ExecutionId>,
    now: Timestamp,
) -> String {
    if executions.is_empty() {
        return "No executions yet.".to_string();
    }

    executions
        .iter()
        .enumerate()
        .map(|(index, execution)| {
            let marker = if Some(execution.id()) == active { '>' } else { ' ' };
            format!(
                "{marker} {:>2}. [{:<9}] {} ({})",
                index + 1,
                execution.status().to_string(),
                preview(execution.prompt()),
                relative_age(execution.timestamp().seconds_until(now)),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_summary(summary: &ChainSummary) -> String {
    format!("{}\n{}", heading("Summary"), indent(&summary.summary))
}

pub fn render_analysis(analysis: &ReasoningAnalysis) -> String {
    let mut lines = vec![heading("Potential Errors")];
    lines.extend(bullets(&analysis.errors));
    lines.push(String::new());
    lines.push(heading("Suggestions"));
    lines.extend(bullets(&analysis.suggestions));
    lines.join("\n")
}

/// Human wording for an age in seconds, following the usual
/// "N minutes ago" / "about N hours ago" buckets.
pub fn relative_age(seconds: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;
    const MONTH: u64 = 30 * DAY;
    const YEAR: u64 = 365 * DAY;

    let rounded = |unit: u64| (seconds + unit / 2) / unit;

    let phrase = match seconds {
        s if s < 30 => "less than a minute".to_string(),
        s if s < 90 => "1 minute".to_string(),
        s if s < 45 * MINUTE => format!("{} minutes", rounded(MINUTE)),
        s if s < 90 * MINUTE => "about 1 hour".to_string(),
        s if s < DAY => format!("about {} hours", rounded(HOUR)),
        s if s < 42 * HOUR => "1 day".to_string(),
        s if s < MONTH => format!("{} days", rounded(DAY)),
        s if s < 45 * DAY => "about 1 month".to_string(),
        s if s < YEAR => format!("{} months", rounded(MONTH)),
        _ => match rounded(YEAR) {
            1 => "about 1 year".to_string(),
            n => format!("about {n} years"),
        },
    };
    format!("{phrase} ago")
}

fn heading(title: &str) -> String {
    format!("== {title} ==")
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bullets(items: &[String]) -> Vec<String> {
    if items.is_empty() {
        return vec!["  (none)".to_string()];
    }
    items.iter().map(|item| format!("  - {item}")).collect()
}

fn preview(prompt: &str) -> String {
    let first_line = prompt.lines().next().unwrap_or_default();
    if first_line.chars().count() <= PROMPT_PREVIEW_CHARS && first_line.len() == prompt.len() {
        return first_line.to_string();
    }
    let truncated: String = first_line.chars().take(PROMPT_PREVIEW_CHARS).collect();
    format!("{truncated}...")
}
