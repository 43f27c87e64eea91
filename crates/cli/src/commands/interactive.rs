//! `reasonflow interactive`: a line-oriented session over one history.
//!
//! Free text is submitted on a background task so history can be browsed
//! while a submission is pending. Results arrive through the session's
//! notification channel and are printed as they land.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use flows::{Notification, ReasoningSession, SubmissionError};
use pipeline::{ExecutionHistory, Timestamp};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;

use crate::config::Settings;
use crate::demo;
use crate::render::{render_analysis, render_history, render_summary, render_timeline};

const HELP: &str = "\
Type a prompt to generate and execute a reasoning pipeline.

  :history      list executions, newest first
  :show <n>     select execution n and print it
  :new          clear the selection
  :summarize    summarize the selected execution
  :analyze      look for errors in the selected execution
  :help         show this help
  :quit         exit";

#[derive(Debug, Args)]
pub struct InteractiveArgs {
    /// Start with two sample executions in history
    #[arg(long)]
    pub demo_history: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Submit(String),
    History,
    Show(usize),
    New,
    Summarize,
    Analyze,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

fn parse_line(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }
    let Some(command) = line.strip_prefix(':') else {
        return ReplCommand::Submit(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("history" | "h"), None) => ReplCommand::History,
        (Some("show" | "s"), Some(n)) => match n.parse::<usize>() {
            Ok(n) if n > 0 => ReplCommand::Show(n),
            _ => ReplCommand::Invalid(format!("not a history position: {n}")),
        },
        (Some("show" | "s"), None) => ReplCommand::Invalid("usage: :show <n>".to_string()),
        (Some("new"), None) => ReplCommand::New,
        (Some("summarize"), None) => ReplCommand::Summarize,
        (Some("analyze"), None) => ReplCommand::Analyze,
        (Some("help" | "?"), None) => ReplCommand::Help,
        (Some("quit" | "q" | "exit"), None) => ReplCommand::Quit,
        _ => ReplCommand::Invalid(format!("unknown command: {line} (try :help)")),
    }
}

pub async fn handle_interactive(args: InteractiveArgs, settings: &Settings) -> Result<()> {
    let history = if args.demo_history {
        demo::history().context("failed to build demo history")?
    } else {
        ExecutionHistory::new()
    };
    let session = settings.build_session(history)?;
    let printer = tokio::spawn(print_notifications(
        Arc::clone(&session),
        session.subscribe(),
    ));

    println!("{HELP}\n");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match parse_line(&line) {
            ReplCommand::Submit(prompt) => submit_in_background(&session, prompt),
            ReplCommand::History => {
                let executions = session.executions().await;
                let active = session.active().await.map(|e| e.id());
                println!("{}", render_history(&executions, active, Timestamp::now()));
            }
            ReplCommand::Show(n) => show(&session, n).await,
            ReplCommand::New => {
                session.clear_selection().await;
                println!("Selection cleared. Enter a new prompt.");
            }
            ReplCommand::Summarize => summarize_active(&session).await,
            ReplCommand::Analyze => analyze_active(&session).await,
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => break,
            ReplCommand::Empty => {}
            ReplCommand::Invalid(message) => println!("{message}"),
        }
    }

    if session.is_busy() {
        warn!("Exiting with a submission still in flight");
    }
    printer.abort();
    Ok(())
}

fn submit_in_background(session: &Arc<ReasoningSession>, prompt: String) {
    let session = Arc::clone(session);
    tokio::spawn(async move {
        match session.submit(&prompt).await {
            Ok(_) => {}
            Err(err @ (SubmissionError::EmptyPrompt | SubmissionError::AlreadyInFlight)) => {
                println!("{err}");
            }
            // Already reported through the notification channel.
            Err(err) => warn!(error = %err, "Submission failed"),
        }
    });
}

async fn show(session: &ReasoningSession, position: usize) {
    let executions = session.executions().await;
    let Some(execution) = executions.get(position - 1) else {
        println!("No execution at position {position}.");
        return;
    };
    if let Err(err) = session.select(execution.id()).await {
        println!("{err}");
        return;
    }
    println!("{}", render_timeline(execution));
}

async fn summarize_active(session: &ReasoningSession) {
    let Some(active) = session.active().await else {
        println!("No execution selected.");
        return;
    };
    match session.summarize(active.id()).await {
        Ok(summary) => println!("{}", render_summary(&summary)),
        Err(err) => println!("Could not summarize: {err}"),
    }
}

async fn analyze_active(session: &ReasoningSession) {
    let Some(active) = session.active().await else {
        println!("No execution selected.");
        return;
    };
    match session.analyze(active.id()).await {
        Ok(analysis) => println!("{}", render_analysis(&analysis)),
        Err(err) => println!("Could not analyze: {err}"),
    }
}

async fn print_notifications(
    session: Arc<ReasoningSession>,
    mut notifications: broadcast::Receiver<Notification>,
) {
    loop {
        match notifications.recv().await {
            Ok(Notification::ExecutionStarted { id }) => {
                println!("[{}] Generating...", id.short());
            }
            Ok(Notification::ExecutionCompleted { id } | Notification::ExecutionFailed { id }) => {
                if let Some(execution) = session.execution(id).await {
                    println!("{}\n", render_timeline(&execution));
                }
            }
            Ok(Notification::Error { title, description }) => {
                eprintln!("{title}: {description}");
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Notification printer fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
