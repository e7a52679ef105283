//! Dependent-field visibility transitions.
//!
//! When a controller field changes, each of its direct dependents becomes
//! visible iff the controller's value equals the dependent's required value.
//! Hiding a field clears its value and error. Transitions are evaluated one
//! level deep: hiding (and so clearing) a controller does not re-evaluate the
//! controller's own dependents.

use crate::render::{FieldIndex, RenderedTree};

use super::state::FieldState;

/// A visibility change applied to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub field: FieldIndex,
    pub visible: bool,
}

/// Re-evaluate the direct dependents of `controller` against its current
/// value. Returns the fields whose visibility actually changed.
pub fn apply_controller_change(
    tree: &RenderedTree,
    states: &mut [FieldState],
    controller: FieldIndex,
) -> Vec<Transition> {
    let controller_value = states[controller].value.as_joined();
    let mut transitions = Vec::new();

    for &dependent in tree.dependents_of(controller) {
        let field = tree.field(dependent);
        let Some(dep) = &field.dependency else {
            continue;
        };
        let should_show = controller_value == dep.required_value;
        let state = &mut states[dependent];
        let was_visible = state.visible;

        if should_show {
            state.visible = true;
        } else {
            state.hide(field);
        }

        if was_visible != should_show {
            tracing::debug!(
                field_id = %field.id,
                controller = %dep.field_id,
                visible = should_show,
                "field visibility changed"
            );
            transitions.push(Transition {
                field: dependent,
                visible: should_show,
            });
        }
    }

    transitions
}
