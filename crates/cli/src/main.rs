//! ReasonFlow CLI entry point.
//!
//! Composition root for the workspace:
//!
//! 1. **Load configuration**: `.env` via `dotenvy`, then flags and environment
//!    variables via `clap`.
//! 2. **Wire observability**: `tracing-subscriber` with a pretty or JSON layer
//!    on stderr and, when an endpoint is given, an OpenTelemetry OTLP exporter.
//! 3. **Construct infrastructure**: resolve the LLM provider, wrap it in the
//!    flow gateway, and hand that to a [`flows::ReasoningSession`].
//! 4. **Dispatch**: one-shot `run` or the `interactive` session.

mod commands;
mod config;
mod demo;
mod render;
mod telemetry;

use anyhow::Result;
use clap::Parser;

use commands::{handle_command, Commands};
use config::Settings;

#[derive(Debug, Parser)]
#[command(name = "reasonflow", version)]
#[command(about = "Generate and execute LLM reasoning pipelines", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let _telemetry = telemetry::init(
        cli.settings.log_format,
        cli.settings.otlp_endpoint.as_deref(),
    )?;

    handle_command(cli.command, &cli.settings).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::InteractiveArgs;
    use crate::config::LogFormat;
    use clap::CommandFactory;
    use llm::ProviderKind;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_accepts_flags_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "reasonflow",
            "run",
            "Write a haiku about rain.",
            "--summarize",
            "--json",
            "--provider",
            "gemini",
            "--max-output-tokens",
            "1024",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.settings.provider, Some(ProviderKind::Gemini));
        assert_eq!(cli.settings.max_output_tokens, 1024);
        assert_eq!(cli.settings.log_format, LogFormat::Json);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.prompt, "Write a haiku about rain.");
        assert!(args.summarize && args.json && !args.analyze);
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!(Cli::try_parse_from(["reasonflow", "--provider", "openai", "interactive"]).is_err());
    }

    #[test]
    fn interactive_demo_flag() {
        let cli = Cli::try_parse_from(["reasonflow", "interactive", "--demo-history"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Interactive(InteractiveArgs { demo_history: true })
        ));
    }
}
