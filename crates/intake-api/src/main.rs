//! intake CLI entry point.
//!
//! Binary name: `intake`
//!
//! Parses CLI arguments, loads configuration and the form schema, then
//! dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,intake=debug",
        _ => "trace",
    };
    if let Err(e) = intake_observe::tracing_setup::init_tracing(filter, cli.otel) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "intake", &mut std::io::stdout());
        return Ok(());
    }

    let result = run(&cli).await;
    intake_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let state = AppState::init(&cli.config, cli.schema.as_deref()).await?;

    match &cli.command {
        Commands::Render => cli::render::render_form(&state, cli.json),

        Commands::Fill => cli::fill::fill_form(&state, cli.json).await,

        Commands::Submit { answers, dry_run } => {
            cli::submit::submit_answers(&state, answers, *dry_run, cli.json, cli.quiet).await
        }

        Commands::Validate { answers } => {
            cli::submit::validate_answers(&state, answers, cli.json).await
        }

        Commands::Completions { .. } => Ok(()),
    }
}
