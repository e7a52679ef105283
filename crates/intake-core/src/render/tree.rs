//! Rendered form tree.
//!
//! The tree is the structural, read-only result of rendering a schema. Fields
//! live in a flat arena addressed by [`FieldIndex`]; sections refer to their
//! fields by index, and the controller → dependents multimap is precomputed
//! so that a controller edit touches only its own dependents.

use std::collections::HashMap;

use intake_types::schema::{DependsOn, FieldOption};
use intake_types::value::FieldValue;

use super::icon::SectionIcon;

/// Position of a field in the tree's field arena.
pub type FieldIndex = usize;

/// Label of the empty "no selection" entry of a select input.
pub const NO_SELECTION_LABEL: &str = "Select an option...";

/// Value of the "no selection" entry of a select input.
pub const NO_SELECTION_VALUE: &str = "";

/// The rendered form.
#[derive(Debug, Clone)]
pub struct RenderedTree {
    pub title: String,
    pub description: String,
    pub submit_label: String,
    pub reset_label: String,
    pub(crate) sections: Vec<RenderedSection>,
    pub(crate) fields: Vec<RenderedField>,
    pub(crate) index: HashMap<String, FieldIndex>,
    pub(crate) dependents: HashMap<FieldIndex, Vec<FieldIndex>>,
}

impl RenderedTree {
    pub fn sections(&self) -> &[RenderedSection] {
        &self.sections
    }

    /// All fields in display order.
    pub fn fields(&self) -> &[RenderedField] {
        &self.fields
    }

    pub fn field(&self, index: FieldIndex) -> &RenderedField {
        &self.fields[index]
    }

    pub fn index_of(&self, field_id: &str) -> Option<FieldIndex> {
        self.index.get(field_id).copied()
    }

    pub fn field_by_id(&self, field_id: &str) -> Option<&RenderedField> {
        self.index_of(field_id).map(|i| &self.fields[i])
    }

    /// Fields whose visibility is controlled by the given field.
    pub fn dependents_of(&self, controller: FieldIndex) -> &[FieldIndex] {
        self.dependents
            .get(&controller)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_controller(&self, index: FieldIndex) -> bool {
        self.dependents.contains_key(&index)
    }

    pub fn section_fields<'a>(
        &'a self,
        section: &'a RenderedSection,
    ) -> impl Iterator<Item = &'a RenderedField> + 'a {
        section.fields.iter().map(|&i| &self.fields[i])
    }
}

/// A rendered section: header plus the indices of its fields.
#[derive(Debug, Clone)]
pub struct RenderedSection {
    /// Position of the section in the form.
    pub index: usize,
    pub title: String,
    pub icon: SectionIcon,
    pub fields: Vec<FieldIndex>,
}

/// A rendered field.
#[derive(Debug, Clone)]
pub struct RenderedField {
    pub id: String,
    pub label: String,
    /// Group-level for radio and checkbox inputs; options are never marked.
    pub required: bool,
    pub placeholder: Option<String>,
    pub input: InputKind,
    pub dependency: Option<DependsOn>,
    /// Index of the owning section.
    pub section: usize,
}

impl RenderedField {
    /// Fields with a dependency start hidden.
    pub fn initially_visible(&self) -> bool {
        self.dependency.is_none()
    }

    pub fn full_width(&self) -> bool {
        matches!(self.input, InputKind::MultiLine)
    }

    /// The value a fresh or freshly hidden field holds.
    pub fn empty_value(&self) -> FieldValue {
        match self.input {
            InputKind::Checkbox { .. } => FieldValue::Multi(Vec::new()),
            InputKind::Line(_)
            | InputKind::MultiLine
            | InputKind::Select { .. }
            | InputKind::Radio { .. } => FieldValue::Single(String::new()),
        }
    }
}

/// Input representation of a field, selected by its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// Single-line, single-value input.
    Line(LineKind),
    /// Multi-line, single-value input.
    MultiLine,
    /// Single value from `options` or the "no selection" sentinel.
    Select { options: Vec<FieldOption> },
    /// Single value from `options`, mutually exclusive.
    Radio { options: Vec<FieldOption> },
    /// Any subset of `options`.
    Checkbox { options: Vec<FieldOption> },
}

impl InputKind {
    pub fn options(&self) -> &[FieldOption] {
        match self {
            InputKind::Select { options }
            | InputKind::Radio { options }
            | InputKind::Checkbox { options } => options,
            InputKind::Line(_) | InputKind::MultiLine => &[],
        }
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options().iter().any(|o| o.value == value)
    }

    pub fn is_multi_value(&self) -> bool {
        matches!(self, InputKind::Checkbox { .. })
    }

    /// Short name used in logs and tables.
    pub fn name(&self) -> &'static str {
        match self {
            InputKind::Line(kind) => kind.name(),
            InputKind::MultiLine => "textarea",
            InputKind::Select { .. } => "select",
            InputKind::Radio { .. } => "radio",
            InputKind::Checkbox { .. } => "checkbox",
        }
    }
}

/// Flavour of a single-line input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Text,
    Email,
    Tel,
    Date,
}

impl LineKind {
    pub fn name(self) -> &'static str {
        match self {
            LineKind::Text => "text",
            LineKind::Email => "email",
            LineKind::Tel => "tel",
            LineKind::Date => "date",
        }
    }
}
