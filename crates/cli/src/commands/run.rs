//! `reasonflow run`: one submission, printed once it settles.

use anyhow::{Context, Result};
use clap::Args;
use flows::{SubmissionError, ERROR_DESCRIPTION, ERROR_TITLE};
use pipeline::{ExecutionHistory, PipelineExecution};
use tracing::info;

use crate::config::Settings;
use crate::render::{render_analysis, render_summary, render_timeline};

#[derive(Debug, Args)]
pub struct RunArgs {
    /// The question or task to reason about
    pub prompt: String,

    /// Summarize the reasoning chain after it completes
    #[arg(long)]
    pub summarize: bool,

    /// Look for errors in the reasoning chain after it completes
    #[arg(long)]
    pub analyze: bool,

    /// Print the execution record as JSON instead of the timeline
    #[arg(long)]
    pub json: bool,
}

pub async fn handle_run(args: RunArgs, settings: &Settings) -> Result<()> {
    let session = settings.build_session(ExecutionHistory::new())?;

    let id = match session.submit(&args.prompt).await {
        Ok(id) => id,
        Err(err) => {
            // A failed execute still leaves a record worth showing.
            if let Some(id) = err.execution_id() {
                if let Some(record) = session.execution(id).await {
                    print_record(&record, args.json)?;
                }
            }
            if !matches!(
                err,
                SubmissionError::EmptyPrompt | SubmissionError::AlreadyInFlight
            ) {
                eprintln!("{ERROR_TITLE}: {ERROR_DESCRIPTION}");
            }
            return Err(err).context("submission failed");
        }
    };

    let record = session
        .execution(id)
        .await
        .context("completed execution missing from history")?;
    info!(execution_id = %id.short(), steps = record.reasoning_steps().len(), "Execution completed");
    print_record(&record, args.json)?;

    if args.summarize {
        let summary = session.summarize(id).await.context("summarize failed")?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!("\n{}", render_summary(&summary));
        }
    }

    if args.analyze {
        let analysis = session.analyze(id).await.context("analysis failed")?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        } else {
            println!("\n{}", render_analysis(&analysis));
        }
    }

    Ok(())
}

fn print_record(record: &PipelineExecution, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("{}", render_timeline(record));
    }
    Ok(())
}
