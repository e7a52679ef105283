//! `intake submit` and `intake validate`: answers from a JSON file.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Result, anyhow, bail};
use console::style;
use serde_json::json;

use intake_core::engine::{FormEngine, SubmitError};
use intake_core::render::RenderedTree;
use intake_core::submit::SubmissionClient;
use intake_types::error::ValidationError;

use super::answers::{apply_answers, load_answers};
use super::output::{errors_json, print_payload, print_validation_errors, spinner};
use crate::state::AppState;

/// Run a submission, showing a spinner while the transport call is pending.
pub async fn submit_with_progress<C: SubmissionClient>(
    engine: &mut FormEngine,
    client: &C,
    show_progress: bool,
) -> Result<(), SubmitError> {
    let ticket = engine.begin_submit()?;
    let progress = show_progress.then(|| spinner("Submitting..."));
    let outcome = client.submit(&ticket.payload).await;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }
    engine.finish_submit(ticket, outcome)
}

pub async fn submit_answers(
    state: &AppState,
    answers: &Path,
    dry_run: bool,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let answers = load_answers(answers).await?;
    let mut engine = state.engine();
    let skipped = apply_answers(&mut engine, &answers)?;
    let tree = engine.tree().clone();

    if dry_run {
        let report = engine.validate();
        if !report.is_valid() {
            return invalid(&tree, report.errors(), json);
        }
        let payload = engine.payload();
        if json {
            let out = json!({ "valid": true, "payload": payload, "skipped": skipped });
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else if !quiet {
            println!();
            println!(
                "  {} Answers are valid; this payload would be sent:",
                style("✓").green().bold()
            );
            println!();
            print_payload(&tree, &payload);
            println!();
        }
        return Ok(());
    }

    let client = state.client()?;
    let payload = engine.payload();
    match submit_with_progress(&mut engine, &client, !json && !quiet).await {
        Ok(()) => {
            if json {
                let out = json!({
                    "submitted": true,
                    "client": client.name(),
                    "payload": payload,
                    "skipped": skipped,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else if !quiet {
                println!();
                println!(
                    "  {} Form submitted successfully!",
                    style("✓").green().bold()
                );
                println!();
            }
            Ok(())
        }
        Err(SubmitError::Invalid(report)) => invalid(&tree, report.errors(), json),
        Err(SubmitError::Failed(err)) => {
            if json {
                let out = json!({ "submitted": false, "message": err.user_message() });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                eprintln!();
                eprintln!("  {} {}", style("✗").red().bold(), err.user_message());
                eprintln!();
            }
            Err(anyhow!(err))
        }
        Err(err @ SubmitError::InFlight) => Err(err.into()),
    }
}

pub async fn validate_answers(state: &AppState, answers: &Path, json: bool) -> Result<()> {
    let answers = load_answers(answers).await?;
    let mut engine = state.engine();
    let skipped = apply_answers(&mut engine, &answers)?;
    let report = engine.validate();

    if !report.is_valid() {
        return invalid(engine.tree(), report.errors(), json);
    }

    if json {
        let out = json!({ "valid": true, "skipped": skipped });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!();
        println!("  {} All answers are valid", style("✓").green().bold());
        for id in &skipped {
            println!(
                "    {} {} ignored (field is hidden)",
                style("•").dim(),
                style(id).dim()
            );
        }
        println!();
    }
    Ok(())
}

/// Report validation errors and fail the command.
fn invalid(tree: &RenderedTree, errors: &BTreeMap<String, ValidationError>, json: bool) -> Result<()> {
    if json {
        let out = json!({ "valid": false, "errors": errors_json(errors) });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_validation_errors(tree, errors);
    }
    bail!("{} field(s) failed validation", errors.len())
}
