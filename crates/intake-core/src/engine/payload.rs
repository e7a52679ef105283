//! Submission payload assembly.

use intake_types::value::Payload;

use crate::render::RenderedTree;

use super::state::FieldState;

/// Every visible field with a non-empty value, flattened to a string.
///
/// Hidden fields and empty values (including whitespace-only strings and
/// empty selections) are left out entirely.
pub fn build_payload(tree: &RenderedTree, states: &[FieldState]) -> Payload {
    let mut payload = Payload::new();
    for (field, state) in tree.fields().iter().zip(states) {
        if state.visible && !state.value.is_empty() {
            payload.insert(field.id.clone(), state.value.as_joined());
        }
    }
    payload
}
