//! Render engine: turns a `FormSchema` into a [`RenderedTree`].
//!
//! Rendering is total and never fails. Unknown field types fall back to a
//! plain text input, and a choice field without options renders an empty
//! choice list. Re-rendering always builds a brand new tree.

pub mod icon;
pub mod tree;

pub use icon::SectionIcon;
pub use tree::{
    FieldIndex, InputKind, LineKind, NO_SELECTION_LABEL, NO_SELECTION_VALUE, RenderedField,
    RenderedSection, RenderedTree,
};

use std::collections::HashMap;

use intake_types::schema::{Field, FieldType, FormSchema};

/// Render a schema into a fresh tree.
pub fn render(schema: &FormSchema) -> RenderedTree {
    let mut sections = Vec::with_capacity(schema.sections.len());
    let mut fields = Vec::new();
    let mut index = HashMap::new();

    for (section_index, section) in schema.sections.iter().enumerate() {
        let mut section_fields = Vec::with_capacity(section.fields.len());
        for field in &section.fields {
            let field_index = fields.len();
            if index.insert(field.id.clone(), field_index).is_some() {
                tracing::warn!(field_id = %field.id, "duplicate field id; later field wins lookups");
            }
            fields.push(render_field(field, section_index));
            section_fields.push(field_index);
        }

        sections.push(RenderedSection {
            index: section_index,
            title: section.title.clone(),
            icon: SectionIcon::for_title(&section.title),
            fields: section_fields,
        });
    }

    let mut dependents: HashMap<FieldIndex, Vec<FieldIndex>> = HashMap::new();
    for (field_index, field) in fields.iter().enumerate() {
        let Some(dep) = &field.dependency else {
            continue;
        };
        match index.get(&dep.field_id) {
            Some(&controller) => dependents.entry(controller).or_default().push(field_index),
            None => tracing::warn!(
                field_id = %field.id,
                controller = %dep.field_id,
                "dependency on unknown field; field stays hidden"
            ),
        }
    }

    tracing::debug!(
        sections = sections.len(),
        fields = fields.len(),
        controllers = dependents.len(),
        "rendered form"
    );

    RenderedTree {
        title: schema.title.clone(),
        description: schema.description.clone(),
        submit_label: schema.submit_label.clone(),
        reset_label: schema.reset_label.clone(),
        sections,
        fields,
        index,
        dependents,
    }
}

fn render_field(field: &Field, section: usize) -> RenderedField {
    let options = || field.options.clone().unwrap_or_default();
    let input = match &field.field_type {
        FieldType::Text => InputKind::Line(LineKind::Text),
        FieldType::Email => InputKind::Line(LineKind::Email),
        FieldType::Tel => InputKind::Line(LineKind::Tel),
        FieldType::Date => InputKind::Line(LineKind::Date),
        FieldType::Textarea => InputKind::MultiLine,
        FieldType::Select => InputKind::Select { options: options() },
        FieldType::Radio => InputKind::Radio { options: options() },
        FieldType::Checkbox => InputKind::Checkbox { options: options() },
        FieldType::Other(name) => {
            tracing::debug!(field_id = %field.id, field_type = %name, "unknown field type, rendering as text");
            InputKind::Line(LineKind::Text)
        }
    };

    RenderedField {
        id: field.id.clone(),
        label: field.label.clone(),
        required: field.required,
        placeholder: field.placeholder.clone(),
        input,
        dependency: field.depends_on.clone(),
        section,
    }
}
