//! CLI command definitions for the `intake` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod answers;
pub mod fill;
pub mod output;
pub mod render;
pub mod submit;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Render, fill in and submit schema-driven intake forms.
#[derive(Parser)]
#[command(name = "intake", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file.
    #[arg(long, global = true, env = "INTAKE_CONFIG", default_value = "intake.toml")]
    pub config: PathBuf,

    /// Schema location (file path or http(s) URL). Overrides the config file.
    #[arg(long, global = true, env = "INTAKE_SCHEMA")]
    pub schema: Option<String>,

    /// Export tracing spans to stdout through OpenTelemetry.
    #[arg(long, global = true, hide = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the rendered form: sections, fields and inputs.
    Render,

    /// Fill in the form interactively and submit it.
    Fill,

    /// Submit answers from a JSON file.
    Submit {
        /// JSON object mapping field ids to a string or a list of strings.
        answers: PathBuf,

        /// Validate and print the payload without sending it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate answers from a JSON file without submitting.
    Validate {
        /// JSON object mapping field ids to a string or a list of strings.
        answers: PathBuf,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
