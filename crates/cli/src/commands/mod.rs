//! Subcommands and their handlers.

mod interactive;
mod run;

pub use interactive::InteractiveArgs;
pub use run::RunArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Settings;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate and execute one reasoning pipeline, then exit
    Run(RunArgs),
    /// Start an interactive session with browsable history
    Interactive(InteractiveArgs),
}

pub async fn handle_command(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Run(args) => run::handle_run(args, settings).await,
        Commands::Interactive(args) => interactive::handle_interactive(args, settings).await,
    }
}
