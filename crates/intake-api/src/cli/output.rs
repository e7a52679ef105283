//! Shared terminal output helpers.

use std::collections::BTreeMap;
use std::time::Duration;

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use intake_core::render::RenderedTree;
use intake_types::error::ValidationError;
use intake_types::value::Payload;

pub fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Validation errors keyed by field id, labelled from the tree.
pub fn print_validation_errors(tree: &RenderedTree, errors: &BTreeMap<String, ValidationError>) {
    println!();
    println!(
        "  {} {} field(s) need attention",
        style("✗").red().bold(),
        errors.len()
    );
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Field").fg(Color::White),
        Cell::new("Problem").fg(Color::White),
    ]);

    // Form order reads better than id order.
    for field in tree.fields() {
        if let Some(err) = errors.get(&field.id) {
            table.add_row(vec![
                Cell::new(&field.label),
                Cell::new(err.to_string()).fg(Color::Red),
            ]);
        }
    }
    println!("{table}");
    println!();
}

pub fn print_payload(tree: &RenderedTree, payload: &Payload) {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Field").fg(Color::White),
        Cell::new("Value").fg(Color::White),
    ]);

    for field in tree.fields() {
        if let Some(value) = payload.get(&field.id) {
            table.add_row(vec![Cell::new(&field.label), Cell::new(value)]);
        }
    }
    println!("{table}");
}

/// Validation errors as a JSON object of field id to message.
pub fn errors_json(errors: &BTreeMap<String, ValidationError>) -> serde_json::Value {
    errors
        .iter()
        .map(|(id, err)| (id.clone(), serde_json::Value::String(err.to_string())))
        .collect::<serde_json::Map<_, _>>()
        .into()
}
