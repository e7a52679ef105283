//! `intake render`: show the rendered form.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use serde_json::json;

use intake_core::render::{InputKind, NO_SELECTION_LABEL, RenderedField, RenderedTree};

use crate::state::AppState;

pub fn render_form(state: &AppState, json: bool) -> Result<()> {
    let engine = state.engine();
    let tree = engine.tree();

    if json {
        println!("{}", serde_json::to_string_pretty(&tree_json(tree))?);
        return Ok(());
    }

    println!();
    println!("  {}", style(&tree.title).bold().cyan());
    if !tree.description.is_empty() {
        println!("  {}", style(&tree.description).dim());
    }
    println!("  {}", style(format!("from {}", state.location)).dim());

    for section in tree.sections() {
        println!();
        println!(
            "  {} {}",
            section.icon.glyph(),
            style(&section.title).bold()
        );

        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL_CONDENSED);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Field").fg(Color::White),
            Cell::new("Id").fg(Color::White),
            Cell::new("Input").fg(Color::White),
            Cell::new("Shown").fg(Color::White),
        ]);

        for field in tree.section_fields(section) {
            let label = if field.required {
                format!("{} *", field.label)
            } else {
                field.label.clone()
            };
            let shown = match &field.dependency {
                Some(dep) => Cell::new(format!("when {} = {}", dep.field_id, dep.required_value))
                    .fg(Color::Yellow),
                None => Cell::new("always").fg(Color::Green),
            };
            table.add_row(vec![
                Cell::new(label),
                Cell::new(&field.id).fg(Color::DarkGrey),
                Cell::new(describe_input(field)),
                shown,
            ]);
        }
        println!("{table}");
    }

    println!();
    println!(
        "  [{}]  [{}]",
        style(&tree.submit_label).green().bold(),
        style(&tree.reset_label).dim()
    );
    println!();
    Ok(())
}

/// Input kind plus its choices, e.g. `radio: Email | Phone`.
fn describe_input(field: &RenderedField) -> String {
    let labels = |first: Option<&str>| {
        first
            .into_iter()
            .chain(field.input.options().iter().map(|o| o.label.as_str()))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    match &field.input {
        InputKind::Line(_) | InputKind::MultiLine => match &field.placeholder {
            Some(placeholder) => format!("{} ({placeholder})", field.input.name()),
            None => field.input.name().to_string(),
        },
        InputKind::Select { .. } => format!("select: {}", labels(Some(NO_SELECTION_LABEL))),
        InputKind::Radio { .. } | InputKind::Checkbox { .. } => {
            format!("{}: {}", field.input.name(), labels(None))
        }
    }
}

fn tree_json(tree: &RenderedTree) -> serde_json::Value {
    let sections: Vec<_> = tree
        .sections()
        .iter()
        .map(|section| {
            let fields: Vec<_> = tree
                .section_fields(section)
                .map(|field| {
                    json!({
                        "id": field.id,
                        "label": field.label,
                        "input": field.input.name(),
                        "required": field.required,
                        "placeholder": field.placeholder,
                        "fullWidth": field.full_width(),
                        "visible": field.initially_visible(),
                        "options": field.input.options(),
                        "dependsOn": field.dependency,
                    })
                })
                .collect();
            json!({
                "title": section.title,
                "icon": section.icon.name(),
                "fields": fields,
            })
        })
        .collect();

    json!({
        "title": tree.title,
        "description": tree.description,
        "submitLabel": tree.submit_label,
        "resetLabel": tree.reset_label,
        "sections": sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::render::render;
    use intake_types::schema::FormSchema;

    fn tree() -> RenderedTree {
        let schema: FormSchema = serde_json::from_str(
            r#"{ "formTitle": "Intake", "sections": [{ "title": "Personal Information", "fields": [
                { "id": "name", "label": "Name", "required": true, "placeholder": "Full name" },
                { "id": "method", "label": "Method", "type": "select",
                  "options": [{ "value": "email", "label": "Email" },
                              { "value": "phone", "label": "Phone" }] },
                { "id": "altPhone", "label": "Phone", "type": "tel",
                  "dependsOn": { "id": "method", "value": "phone" } }
            ]}]}"#,
        )
        .unwrap();
        render(&schema)
    }

    #[test]
    fn select_lists_sentinel_first() {
        let tree = tree();
        let method = tree.field_by_id("method").unwrap();
        assert_eq!(describe_input(method), "select: Select an option... | Email | Phone");
        let name = tree.field_by_id("name").unwrap();
        assert_eq!(describe_input(name), "text (Full name)");
    }

    #[test]
    fn json_view_carries_icons_and_visibility() {
        let value = tree_json(&tree());
        assert_eq!(value["title"], "Intake");
        assert_eq!(value["submitLabel"], "Submit");
        let section = &value["sections"][0];
        assert_eq!(section["icon"], "user");
        assert_eq!(section["fields"][2]["visible"], false);
        assert_eq!(section["fields"][2]["dependsOn"]["id"], "method");
    }
}
