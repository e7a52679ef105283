//! `intake fill`: interactive form filling.
//!
//! Walks the form section by section, prompting for every visible field.
//! Dependent fields are asked as soon as their controller shows them, even
//! when they come earlier in the form. After a failed validation only the
//! offending fields are asked again; after a failed submission the answers
//! are kept and the user may retry. The reset action clears every answer and
//! starts the walk over.

use anyhow::{Result, anyhow};
use console::style;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use serde_json::json;
use tokio::sync::broadcast;

use intake_core::engine::{FormEngine, SubmitError};
use intake_core::event::FormEvent;
use intake_core::render::{
    FieldIndex, InputKind, NO_SELECTION_LABEL, NO_SELECTION_VALUE, RenderedField, RenderedTree,
};
use intake_types::value::FieldValue;

use super::output::print_validation_errors;
use super::submit::submit_with_progress;
use crate::state::AppState;

/// Choice offered for an optional radio group left unanswered.
const NO_ANSWER_LABEL: &str = "(no answer)";

pub async fn fill_form(state: &AppState, json: bool) -> Result<()> {
    let client = state.client()?;
    let mut engine = state.engine();
    let mut events = engine.events().subscribe();
    let tree = engine.tree().clone();

    println!();
    println!("  {}", style(&tree.title).bold().cyan());
    if !tree.description.is_empty() {
        println!("  {}", style(&tree.description).dim());
    }
    println!("  {}", style("Fields marked * are required.").dim());

    walk_form(&mut engine, &tree, &mut events)?;

    loop {
        println!();
        let action = Select::new()
            .with_prompt("What next?")
            .items(&[tree.submit_label.as_str(), tree.reset_label.as_str(), "Quit"])
            .default(0)
            .interact()?;
        match action {
            0 => {}
            1 => {
                if Confirm::new()
                    .with_prompt("Clear every answer and start over?")
                    .default(false)
                    .interact()?
                {
                    engine.reset();
                    announce_visibility(&tree, &mut events);
                    walk_form(&mut engine, &tree, &mut events)?;
                }
                continue;
            }
            _ => {
                println!("  {}", style("Not submitted.").dim());
                return Ok(());
            }
        }

        let payload = engine.payload();
        match submit_with_progress(&mut engine, &client, true).await {
            Ok(()) => {
                if json {
                    let out = json!({ "submitted": true, "payload": payload });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                } else {
                    println!();
                    println!(
                        "  {} Form submitted successfully!",
                        style("✓").green().bold()
                    );
                    println!();
                }
                return Ok(());
            }
            Err(SubmitError::Invalid(report)) => {
                print_validation_errors(&tree, report.errors());
                for field in tree.fields() {
                    if engine.error(&field.id).is_some() {
                        ask(&mut engine, field)?;
                        announce_visibility(&tree, &mut events);
                    }
                }
            }
            Err(SubmitError::Failed(err)) => {
                println!();
                println!("  {} {}", style("✗").red().bold(), err.user_message());
                let retry = Confirm::new()
                    .with_prompt("Try again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    return Err(anyhow!(err));
                }
            }
            Err(err @ SubmitError::InFlight) => return Err(err.into()),
        }
    }
}

/// Prompt for every visible field in form order, then for any field an
/// answer showed after it had been passed over.
fn walk_form(
    engine: &mut FormEngine,
    tree: &RenderedTree,
    events: &mut broadcast::Receiver<FormEvent>,
) -> Result<()> {
    let mut asked = vec![false; tree.fields().len()];
    for section in tree.sections() {
        println!();
        println!(
            "  {} {}",
            section.icon.glyph(),
            style(&section.title).bold().underlined()
        );
        for &index in &section.fields {
            if !engine.states()[index].visible {
                continue;
            }
            ask(engine, tree.field(index))?;
            asked[index] = true;
            announce_visibility(tree, events);
        }
    }

    while let Some(index) = next_unasked(engine, &asked) {
        ask(engine, tree.field(index))?;
        asked[index] = true;
        announce_visibility(tree, events);
    }
    Ok(())
}

/// First visible field that has not been asked yet.
fn next_unasked(engine: &FormEngine, asked: &[bool]) -> Option<FieldIndex> {
    engine
        .states()
        .iter()
        .zip(asked)
        .position(|(state, &done)| state.visible && !done)
}

/// Prompt for one field and store the answer.
fn ask(engine: &mut FormEngine, field: &RenderedField) -> Result<()> {
    if let Some(err) = engine.error(&field.id) {
        println!("  {} {}", style("!").red().bold(), style(err).red());
    }
    let current = engine.value(&field.id).cloned().unwrap_or_else(|| field.empty_value());
    let value = prompt_value(field, &current)?;
    engine.set_value(&field.id, value)?;
    Ok(())
}

fn prompt_value(field: &RenderedField, current: &FieldValue) -> Result<FieldValue> {
    let mut prompt = field.label.clone();
    if field.required {
        prompt.push_str(" *");
    }

    match &field.input {
        InputKind::Line(_) | InputKind::MultiLine => {
            if let Some(placeholder) = &field.placeholder {
                prompt = format!("{prompt} {}", style(format!("({placeholder})")).dim());
            }
            let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
            if let FieldValue::Single(text) = current {
                if !text.is_empty() {
                    input = input.with_initial_text(text.clone());
                }
            }
            Ok(FieldValue::Single(input.interact_text()?))
        }
        InputKind::Select { options } | InputKind::Radio { options } => {
            let first = match field.input {
                InputKind::Select { .. } => NO_SELECTION_LABEL,
                _ => NO_ANSWER_LABEL,
            };
            let items: Vec<&str> = std::iter::once(first)
                .chain(options.iter().map(|o| o.label.as_str()))
                .collect();
            let default = options
                .iter()
                .position(|o| FieldValue::Single(o.value.clone()) == *current)
                .map_or(0, |i| i + 1);

            let choice = Select::new()
                .with_prompt(prompt)
                .items(&items)
                .default(default)
                .interact()?;
            Ok(FieldValue::Single(match choice {
                0 => NO_SELECTION_VALUE.to_string(),
                i => options[i - 1].value.clone(),
            }))
        }
        InputKind::Checkbox { options } => {
            let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
            let checked: Vec<bool> = match current {
                FieldValue::Multi(selected) => {
                    options.iter().map(|o| selected.contains(&o.value)).collect()
                }
                FieldValue::Single(_) => vec![false; options.len()],
            };

            let picked = MultiSelect::new()
                .with_prompt(prompt)
                .items(&labels)
                .defaults(&checked)
                .interact()?;
            Ok(FieldValue::Multi(
                picked.into_iter().map(|i| options[i].value.clone()).collect(),
            ))
        }
    }
}

/// Print fields that were just shown or hidden by the last edit.
fn announce_visibility(tree: &RenderedTree, events: &mut broadcast::Receiver<FormEvent>) {
    while let Ok(event) = events.try_recv() {
        if let FormEvent::FieldVisibilityChanged { field_id, visible } = event {
            let label = tree
                .field_by_id(&field_id)
                .map(|f| f.label.as_str())
                .unwrap_or(field_id.as_str());
            if visible {
                println!("    {} {}", style("+").green(), style(label).dim());
            } else {
                println!("    {} {}", style("-").yellow(), style(label).dim());
            }
        }
    }
}
