//! Per-field runtime state.

use intake_types::error::ValidationError;
use intake_types::value::FieldValue;

use crate::render::{RenderedField, RenderedTree};

/// Runtime state of one field. Owned exclusively by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    pub field_id: String,
    pub visible: bool,
    pub value: FieldValue,
    /// Inline error from the last submit attempt, if any.
    pub error: Option<ValidationError>,
}

impl FieldState {
    /// Initial state: visible iff the field has no dependency, empty value,
    /// no error.
    pub fn initial(field: &RenderedField) -> Self {
        Self {
            field_id: field.id.clone(),
            visible: field.initially_visible(),
            value: field.empty_value(),
            error: None,
        }
    }

    /// Hide the field, dropping its value and error.
    pub(crate) fn hide(&mut self, field: &RenderedField) {
        self.visible = false;
        self.value = field.empty_value();
        self.error = None;
    }
}

/// Fresh state for every field of the tree, in arena order.
pub fn initial_states(tree: &RenderedTree) -> Vec<FieldState> {
    tree.fields().iter().map(FieldState::initial).collect()
}
