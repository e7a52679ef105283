//! FormEngine: the single owner of all field state for one rendered form.
//!
//! Every mutation (edits, visibility transitions, validation errors, resets)
//! goes through `&mut self`. Submission is split into `begin_submit` and
//! `finish_submit` so that the transport call can run without borrowing the
//! engine; `submit` chains the two for callers that simply await it.

use std::sync::Arc;

use thiserror::Error;

use intake_types::error::{SubmissionError, ValidationError};
use intake_types::schema::FormSchema;
use intake_types::value::{FieldValue, Payload};

use crate::event::{EventBus, FormEvent};
use crate::render::{FieldIndex, InputKind, NO_SELECTION_VALUE, RenderedTree, render};
use crate::submit::SubmissionClient;

use super::payload::build_payload;
use super::state::{FieldState, initial_states};
use super::validate::{ValidationReport, validate};
use super::visibility::apply_controller_change;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Rejected edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field '{0}' is hidden")]
    Hidden(String),

    #[error("field '{field_id}' is a {input} input and cannot hold this value")]
    KindMismatch { field_id: String, input: &'static str },

    #[error("'{value}' is not an option of field '{field_id}'")]
    NotAnOption { field_id: String, value: String },
}

/// Reasons a submit attempt did not complete successfully.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// A submission is already pending; this attempt was ignored.
    #[error("a submission is already in flight")]
    InFlight,

    /// Validation failed; errors are shown on their fields.
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(ValidationReport),

    /// The submission collaborator reported failure.
    #[error("submission failed: {0}")]
    Failed(#[from] SubmissionError),
}

/// A validated payload handed out by [`FormEngine::begin_submit`].
///
/// Must be returned through [`FormEngine::finish_submit`] to clear the
/// in-flight flag.
#[derive(Debug)]
pub struct SubmissionTicket {
    generation: u64,
    pub payload: Payload,
}

// ---------------------------------------------------------------------------
// FormEngine
// ---------------------------------------------------------------------------

/// Owned engine instance for one form.
#[derive(Debug)]
pub struct FormEngine {
    tree: Arc<RenderedTree>,
    states: Vec<FieldState>,
    in_flight: bool,
    /// Bumped on re-render so that a ticket from a discarded tree cannot
    /// reset the new one.
    generation: u64,
    events: EventBus,
}

impl FormEngine {
    /// Take ownership of a rendered tree and initialise all field state.
    ///
    /// Publishes `RenderReady`.
    pub fn new(tree: RenderedTree, events: EventBus) -> Self {
        let tree = Arc::new(tree);
        let states = initial_states(&tree);
        events.publish(FormEvent::RenderReady { tree: tree.clone() });
        Self {
            tree,
            states,
            in_flight: false,
            generation: 0,
            events,
        }
    }

    /// Render `schema` and build an engine over the result.
    pub fn from_schema(schema: &FormSchema, events: EventBus) -> Self {
        Self::new(render(schema), events)
    }

    /// Discard the current tree and all field state, and render `schema`
    /// from scratch.
    pub fn rerender(&mut self, schema: &FormSchema) {
        let tree = Arc::new(render(schema));
        self.states = initial_states(&tree);
        self.tree = tree;
        self.generation += 1;
        tracing::debug!(generation = self.generation, "form re-rendered");
        self.events.publish(FormEvent::RenderReady {
            tree: self.tree.clone(),
        });
    }

    pub fn tree(&self) -> &Arc<RenderedTree> {
        &self.tree
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// All field states in arena order.
    pub fn states(&self) -> &[FieldState] {
        &self.states
    }

    pub fn state(&self, field_id: &str) -> Option<&FieldState> {
        self.tree.index_of(field_id).map(|i| &self.states[i])
    }

    pub fn value(&self, field_id: &str) -> Option<&FieldValue> {
        self.state(field_id).map(|s| &s.value)
    }

    pub fn is_visible(&self, field_id: &str) -> Option<bool> {
        self.state(field_id).map(|s| s.visible)
    }

    pub fn error(&self, field_id: &str) -> Option<ValidationError> {
        self.state(field_id).and_then(|s| s.error)
    }

    /// Whether a submission is pending.
    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Replace a field's value.
    ///
    /// The value must fit the field's input kind: a string for single-value
    /// inputs (one of the options, or empty, for select and radio) and a set
    /// of option values for checkbox groups. Multi values are stored in
    /// option order without duplicates.
    pub fn set_value(
        &mut self,
        field_id: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), EditError> {
        let index = self.editable_index(field_id)?;
        let value = normalize(&self.tree.field(index).input, field_id, value.into())?;
        self.apply_edit(index, value);
        Ok(())
    }

    /// Convenience for single-value inputs.
    pub fn set_text(&mut self, field_id: &str, text: &str) -> Result<(), EditError> {
        self.set_value(field_id, FieldValue::Single(text.to_string()))
    }

    /// Pick one option of a select or radio input. The empty value clears
    /// the choice.
    pub fn choose(&mut self, field_id: &str, option: &str) -> Result<(), EditError> {
        let index = self.editable_index(field_id)?;
        let tree = Arc::clone(&self.tree);
        let input = &tree.field(index).input;
        match input {
            InputKind::Select { .. } | InputKind::Radio { .. } => {
                self.set_value(field_id, FieldValue::Single(option.to_string()))
            }
            InputKind::Line(_) | InputKind::MultiLine | InputKind::Checkbox { .. } => {
                Err(EditError::KindMismatch {
                    field_id: field_id.to_string(),
                    input: input.name(),
                })
            }
        }
    }

    /// Check or uncheck one option of a checkbox group.
    pub fn toggle(&mut self, field_id: &str, option: &str, checked: bool) -> Result<(), EditError> {
        let index = self.editable_index(field_id)?;
        let mut selected = match &self.states[index].value {
            FieldValue::Multi(items) => items.clone(),
            FieldValue::Single(_) => {
                return Err(EditError::KindMismatch {
                    field_id: field_id.to_string(),
                    input: self.tree.field(index).input.name(),
                });
            }
        };

        if !self.tree.field(index).input.has_option(option) {
            return Err(EditError::NotAnOption {
                field_id: field_id.to_string(),
                value: option.to_string(),
            });
        }

        selected.retain(|v| v != option);
        if checked {
            selected.push(option.to_string());
        }
        self.set_value(field_id, FieldValue::Multi(selected))
    }

    /// Reset every field to its initial state (visibility, empty value, no
    /// error). Does not affect a pending submission.
    ///
    /// Publishes `FieldVisibilityChanged` for every field whose visibility
    /// the reset changed.
    pub fn reset(&mut self) {
        let previous = std::mem::replace(&mut self.states, initial_states(&self.tree));
        for (before, after) in previous.iter().zip(&self.states) {
            if before.visible != after.visible {
                self.events.publish(FormEvent::FieldVisibilityChanged {
                    field_id: after.field_id.clone(),
                    visible: after.visible,
                });
            }
        }
        tracing::debug!("form reset");
    }

    fn editable_index(&self, field_id: &str) -> Result<FieldIndex, EditError> {
        let index = self
            .tree
            .index_of(field_id)
            .ok_or_else(|| EditError::UnknownField(field_id.to_string()))?;
        if !self.states[index].visible {
            return Err(EditError::Hidden(field_id.to_string()));
        }
        Ok(index)
    }

    fn apply_edit(&mut self, index: FieldIndex, value: FieldValue) {
        let state = &mut self.states[index];
        state.value = value;
        state.error = None;

        if self.tree.is_controller(index) {
            let transitions = apply_controller_change(&self.tree, &mut self.states, index);
            for t in transitions {
                self.events.publish(FormEvent::FieldVisibilityChanged {
                    field_id: self.tree.field(t.field).id.clone(),
                    visible: t.visible,
                });
            }
        }
    }

    // -----------------------------------------------------------------------
    // Validation and submission
    // -----------------------------------------------------------------------

    /// Validate the current state without touching displayed errors.
    pub fn validate(&self) -> ValidationReport {
        validate(&self.tree, &self.states)
    }

    /// The payload the current state would submit.
    pub fn payload(&self) -> Payload {
        build_payload(&self.tree, &self.states)
    }

    /// Start a submit attempt.
    ///
    /// Ignored with `InFlight` while another submission is pending. Otherwise
    /// errors are recomputed from scratch; on failure they are stored on their
    /// fields, `ValidationFailed` is published and `Invalid` returned. On
    /// success the engine is marked in flight and the payload handed out.
    pub fn begin_submit(&mut self) -> Result<SubmissionTicket, SubmitError> {
        if self.in_flight {
            tracing::debug!("submit ignored: submission already in flight");
            return Err(SubmitError::InFlight);
        }

        let report = self.validate();
        for (field, state) in self.tree.fields().iter().zip(self.states.iter_mut()) {
            state.error = report.error(&field.id);
        }

        if !report.is_valid() {
            tracing::info!(errors = report.len(), "submit blocked by validation");
            self.events.publish(FormEvent::ValidationFailed {
                errors: report.errors().clone(),
            });
            return Err(SubmitError::Invalid(report));
        }

        self.in_flight = true;
        let payload = self.payload();
        tracing::info!(fields = payload.len(), "submission started");
        Ok(SubmissionTicket {
            generation: self.generation,
            payload,
        })
    }

    /// Record the outcome of the transport call for `ticket`.
    ///
    /// Success resets the form and publishes `SubmitSuccess`. Failure leaves
    /// every value in place and publishes `SubmitFailure` with the
    /// user-facing message.
    pub fn finish_submit(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<(), SubmissionError>,
    ) -> Result<(), SubmitError> {
        self.in_flight = false;
        let current = ticket.generation == self.generation;

        match outcome {
            Ok(()) => {
                tracing::info!(fields = ticket.payload.len(), "submission succeeded");
                if current {
                    self.reset();
                } else {
                    tracing::debug!("form was re-rendered during submission; skipping reset");
                }
                self.events.publish(FormEvent::SubmitSuccess);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "submission failed");
                self.events.publish(FormEvent::SubmitFailure {
                    message: err.user_message().to_string(),
                });
                Err(SubmitError::Failed(err))
            }
        }
    }

    /// Validate, submit through `client`, and apply the outcome.
    pub async fn submit<C: SubmissionClient>(&mut self, client: &C) -> Result<(), SubmitError> {
        let ticket = self.begin_submit()?;
        let outcome = client.submit(&ticket.payload).await;
        self.finish_submit(ticket, outcome)
    }
}

/// Check a value against an input kind and bring it into canonical form.
fn normalize(input: &InputKind, field_id: &str, value: FieldValue) -> Result<FieldValue, EditError> {
    let mismatch = || EditError::KindMismatch {
        field_id: field_id.to_string(),
        input: input.name(),
    };
    let not_an_option = |value: &str| EditError::NotAnOption {
        field_id: field_id.to_string(),
        value: value.to_string(),
    };

    match (input, value) {
        (InputKind::Line(_) | InputKind::MultiLine, FieldValue::Single(s)) => {
            Ok(FieldValue::Single(s))
        }
        (InputKind::Select { .. } | InputKind::Radio { .. }, FieldValue::Single(s)) => {
            if s == NO_SELECTION_VALUE || input.has_option(&s) {
                Ok(FieldValue::Single(s))
            } else {
                Err(not_an_option(&s))
            }
        }
        (InputKind::Checkbox { options }, FieldValue::Multi(items)) => {
            if let Some(unknown) = items.iter().find(|v| !input.has_option(v)) {
                return Err(not_an_option(unknown));
            }
            Ok(FieldValue::Multi(
                options
                    .iter()
                    .filter(|o| items.contains(&o.value))
                    .map(|o| o.value.clone())
                    .collect(),
            ))
        }
        (
            InputKind::Line(_)
            | InputKind::MultiLine
            | InputKind::Select { .. }
            | InputKind::Radio { .. },
            FieldValue::Multi(_),
        )
        | (InputKind::Checkbox { .. }, FieldValue::Single(_)) => Err(mismatch()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::broadcast;

    const SCENARIO_SCHEMA: &str = r#"{
        "formTitle": "Youth Intake",
        "sections": [
            { "title": "Personal Information", "fields": [
                { "id": "name", "label": "Name", "type": "text", "required": true },
                { "id": "contactMethod", "label": "Contact", "type": "select",
                  "options": [{ "value": "email", "label": "Email" },
                              { "value": "phone", "label": "Phone" }] },
                { "id": "altPhone", "label": "Phone", "type": "tel", "required": true,
                  "dependsOn": { "id": "contactMethod", "value": "phone" } },
                { "id": "email", "label": "Email", "type": "email" },
                { "id": "interests", "label": "Interests", "type": "checkbox",
                  "options": [{ "value": "music", "label": "Music" },
                              { "value": "sports", "label": "Sports" },
                              { "value": "art", "label": "Art" }] }
            ]}
        ]
    }"#;

    fn engine() -> FormEngine {
        let schema: FormSchema = serde_json::from_str(SCENARIO_SCHEMA).unwrap();
        FormEngine::from_schema(&schema, EventBus::new(64))
    }

    #[derive(Default)]
    struct RecordingClient {
        calls: AtomicUsize,
        fail: bool,
        last: std::sync::Mutex<Option<Payload>>,
    }

    impl SubmissionClient for RecordingClient {
        fn name(&self) -> &str {
            "recording"
        }

        async fn submit(&self, payload: &Payload) -> Result<(), SubmissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(payload.clone());
            if self.fail {
                Err(SubmissionError::Rejected { status: 500 })
            } else {
                Ok(())
            }
        }
    }

    fn drain(rx: &mut broadcast::Receiver<FormEvent>) -> Vec<FormEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn initial_visibility_follows_dependencies() {
        let engine = engine();
        assert_eq!(engine.is_visible("name"), Some(true));
        assert_eq!(engine.is_visible("contactMethod"), Some(true));
        assert_eq!(engine.is_visible("altPhone"), Some(false));
        assert_eq!(engine.is_visible("ghost"), None);
        assert!(!engine.is_submitting());
    }

    #[test]
    fn new_engine_publishes_render_ready() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        let schema: FormSchema = serde_json::from_str(SCENARIO_SCHEMA).unwrap();
        let _engine = FormEngine::from_schema(&schema, bus);
        match rx.try_recv().unwrap() {
            FormEvent::RenderReady { tree } => assert_eq!(tree.title, "Youth Intake"),
            other => panic!("expected RenderReady, got {other:?}"),
        }
    }

    #[test]
    fn controller_edit_publishes_visibility_changes() {
        let mut engine = engine();
        let mut rx = engine.events().subscribe();

        engine.set_text("contactMethod", "phone").unwrap();
        engine.set_text("contactMethod", "email").unwrap();

        let events = drain(&mut rx);
        let changes: Vec<(String, bool)> = events
            .into_iter()
            .filter_map(|e| match e {
                FormEvent::FieldVisibilityChanged { field_id, visible } => Some((field_id, visible)),
                _ => None,
            })
            .collect();
        assert_eq!(
            changes,
            vec![("altPhone".to_string(), true), ("altPhone".to_string(), false)]
        );
    }

    #[test]
    fn edits_to_hidden_fields_are_rejected() {
        let mut engine = engine();
        let err = engine.set_text("altPhone", "555-123-4567").unwrap_err();
        assert_eq!(err, EditError::Hidden("altPhone".to_string()));
    }

    #[test]
    fn edits_are_checked_against_input_kind() {
        let mut engine = engine();
        assert_eq!(
            engine.set_text("ghost", "x").unwrap_err(),
            EditError::UnknownField("ghost".to_string())
        );
        assert!(matches!(
            engine.set_text("contactMethod", "fax").unwrap_err(),
            EditError::NotAnOption { .. }
        ));
        assert!(matches!(
            engine.set_text("interests", "music").unwrap_err(),
            EditError::KindMismatch { input: "checkbox", .. }
        ));
        assert!(matches!(
            engine
                .set_value("name", FieldValue::Multi(vec!["a".to_string()]))
                .unwrap_err(),
            EditError::KindMismatch { input: "text", .. }
        ));
        // The "no selection" sentinel is always accepted by a select.
        engine.set_text("contactMethod", "").unwrap();
    }

    #[test]
    fn choose_accepts_only_choice_inputs() {
        let mut engine = engine();
        engine.choose("contactMethod", "phone").unwrap();
        assert_eq!(engine.value("contactMethod"), Some(&FieldValue::from("phone")));
        assert_eq!(engine.is_visible("altPhone"), Some(true));

        engine.choose("contactMethod", "").unwrap();
        assert_eq!(engine.is_visible("altPhone"), Some(false));

        assert!(matches!(
            engine.choose("name", "Ada").unwrap_err(),
            EditError::KindMismatch { input: "text", .. }
        ));
        assert!(matches!(
            engine.choose("interests", "music").unwrap_err(),
            EditError::KindMismatch { input: "checkbox", .. }
        ));
    }

    #[test]
    fn toggle_keeps_option_order() {
        let mut engine = engine();
        engine.toggle("interests", "art", true).unwrap();
        engine.toggle("interests", "music", true).unwrap();
        engine.toggle("interests", "art", true).unwrap();
        assert_eq!(
            engine.value("interests"),
            Some(&FieldValue::Multi(vec!["music".to_string(), "art".to_string()]))
        );
        engine.toggle("interests", "music", false).unwrap();
        assert_eq!(
            engine.value("interests"),
            Some(&FieldValue::Multi(vec!["art".to_string()]))
        );
        assert!(matches!(
            engine.toggle("interests", "chess", true).unwrap_err(),
            EditError::NotAnOption { .. }
        ));
    }

    #[test]
    fn unchecking_unknown_option_is_rejected() {
        let mut engine = engine();
        engine.toggle("interests", "art", true).unwrap();
        assert_eq!(
            engine.toggle("interests", "chess", false).unwrap_err(),
            EditError::NotAnOption {
                field_id: "interests".to_string(),
                value: "chess".to_string(),
            }
        );
        assert_eq!(
            engine.value("interests"),
            Some(&FieldValue::Multi(vec!["art".to_string()]))
        );
    }

    #[test]
    fn edit_clears_that_fields_error_only() {
        let mut engine = engine();
        engine.set_text("contactMethod", "phone").unwrap();
        assert!(matches!(engine.begin_submit(), Err(SubmitError::Invalid(_))));
        assert_eq!(engine.error("name"), Some(ValidationError::Required));
        assert_eq!(engine.error("altPhone"), Some(ValidationError::Required));

        engine.set_text("name", "Ada").unwrap();
        assert_eq!(engine.error("name"), None);
        assert_eq!(engine.error("altPhone"), Some(ValidationError::Required));
    }

    #[test]
    fn hiding_clears_value_and_error() {
        let mut engine = engine();
        engine.set_text("contactMethod", "phone").unwrap();
        engine.set_text("altPhone", "555").unwrap();
        assert!(engine.begin_submit().is_err());
        assert_eq!(engine.error("altPhone"), Some(ValidationError::Required));

        engine.set_text("contactMethod", "email").unwrap();
        let alt = engine.state("altPhone").unwrap();
        assert!(!alt.visible);
        assert_eq!(alt.value, FieldValue::from(""));
        assert_eq!(alt.error, None);

        // Showing it again does not bring the old value back.
        engine.set_text("contactMethod", "phone").unwrap();
        assert_eq!(engine.value("altPhone"), Some(&FieldValue::from("")));
    }

    #[tokio::test]
    async fn scenario_hidden_dependent_not_required() {
        let mut engine = engine();
        let client = RecordingClient::default();

        engine.set_text("name", "Ada").unwrap();
        engine.set_text("contactMethod", "email").unwrap();
        engine.submit(&client).await.unwrap();
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);

        engine.set_text("name", "Ada").unwrap();
        engine.set_text("contactMethod", "phone").unwrap();
        match engine.submit(&client).await {
            Err(SubmitError::Invalid(report)) => {
                assert_eq!(report.error("altPhone"), Some(ValidationError::Required));
                assert_eq!(report.len(), 1);
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_submit_publishes_errors_and_skips_transport() {
        let mut engine = engine();
        let mut rx = engine.events().subscribe();
        let client = RecordingClient::default();

        assert!(engine.submit(&client).await.is_err());
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
        assert!(!engine.is_submitting());

        let failed = drain(&mut rx).into_iter().find_map(|e| match e {
            FormEvent::ValidationFailed { errors } => Some(errors),
            _ => None,
        });
        let errors = failed.expect("ValidationFailed published");
        assert_eq!(errors.get("name"), Some(&ValidationError::Required));
    }

    #[tokio::test]
    async fn errors_recomputed_on_each_attempt() {
        let mut engine = engine();
        engine.set_text("email", "nope").unwrap();
        assert!(engine.begin_submit().is_err());
        assert_eq!(engine.error("name"), Some(ValidationError::Required));

        engine.set_text("name", "Ada").unwrap();
        let ticket = engine.begin_submit().unwrap();
        assert_eq!(engine.error("name"), None);
        engine.finish_submit(ticket, Ok(())).unwrap();
    }

    #[tokio::test]
    async fn payload_contains_visible_non_empty_fields() {
        let mut engine = engine();
        let client = RecordingClient::default();

        engine.set_text("name", "Ada").unwrap();
        engine.set_text("contactMethod", "phone").unwrap();
        engine.set_text("altPhone", "555-123-4567").unwrap();
        engine.toggle("interests", "sports", true).unwrap();
        engine.toggle("interests", "music", true).unwrap();
        engine.submit(&client).await.unwrap();

        let payload = client.last.lock().unwrap().clone().unwrap();
        assert_eq!(payload.get("name"), Some("Ada"));
        assert_eq!(payload.get("contactMethod"), Some("phone"));
        assert_eq!(payload.get("altPhone"), Some("555-123-4567"));
        assert_eq!(payload.get("interests"), Some("music, sports"));
        assert!(!payload.contains("email"));

        let schema: FormSchema = serde_json::from_str(SCENARIO_SCHEMA).unwrap();
        assert!(payload.keys().all(|k| schema.field(k).is_some()));
    }

    #[tokio::test]
    async fn success_resets_form() {
        let mut engine = engine();
        let mut rx = engine.events().subscribe();
        let client = RecordingClient::default();

        engine.set_text("name", "Ada").unwrap();
        engine.set_text("contactMethod", "phone").unwrap();
        engine.set_text("altPhone", "555-123-4567").unwrap();
        engine.submit(&client).await.unwrap();

        for state in engine.states() {
            let field = engine.tree().field_by_id(&state.field_id).unwrap();
            assert_eq!(state.visible, field.initially_visible());
            assert!(state.value.is_empty());
            assert_eq!(state.error, None);
        }
        assert!(drain(&mut rx)
            .iter()
            .any(|e| matches!(e, FormEvent::SubmitSuccess)));
    }

    #[tokio::test]
    async fn failure_keeps_values_for_retry() {
        let mut engine = engine();
        let mut rx = engine.events().subscribe();
        let client = RecordingClient {
            fail: true,
            ..Default::default()
        };

        engine.set_text("name", "Ada").unwrap();
        let err = engine.submit(&client).await.unwrap_err();
        assert!(matches!(err, SubmitError::Failed(SubmissionError::Rejected { status: 500 })));
        assert_eq!(engine.value("name"), Some(&FieldValue::from("Ada")));
        assert!(!engine.is_submitting());

        let message = drain(&mut rx).into_iter().find_map(|e| match e {
            FormEvent::SubmitFailure { message } => Some(message),
            _ => None,
        });
        assert_eq!(
            message.as_deref(),
            Some(intake_types::error::SUBMISSION_FAILED_MESSAGE)
        );
    }

    #[test]
    fn second_begin_while_in_flight_is_ignored() {
        let mut engine = engine();
        engine.set_text("name", "Ada").unwrap();

        let ticket = engine.begin_submit().unwrap();
        assert!(engine.is_submitting());
        assert!(matches!(engine.begin_submit(), Err(SubmitError::InFlight)));

        // Edits are still accepted while the submission is pending.
        engine.set_text("email", "ada@example.org").unwrap();
        assert_eq!(ticket.payload.get("email"), None);

        engine.finish_submit(ticket, Ok(())).unwrap();
        assert!(!engine.is_submitting());
    }

    #[test]
    fn rerender_discards_state_and_stale_ticket_does_not_reset() {
        let mut engine = engine();
        engine.set_text("name", "Ada").unwrap();
        let ticket = engine.begin_submit().unwrap();

        let schema: FormSchema = serde_json::from_str(SCENARIO_SCHEMA).unwrap();
        engine.rerender(&schema);
        assert_eq!(engine.value("name"), Some(&FieldValue::from("")));

        engine.set_text("name", "Grace").unwrap();
        engine.finish_submit(ticket, Ok(())).unwrap();
        assert_eq!(engine.value("name"), Some(&FieldValue::from("Grace")));
    }

    fn visibility_changes(rx: &mut broadcast::Receiver<FormEvent>) -> Vec<(String, bool)> {
        drain(rx)
            .into_iter()
            .filter_map(|e| match e {
                FormEvent::FieldVisibilityChanged { field_id, visible } => Some((field_id, visible)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut engine = engine();
        engine.set_text("name", "Ada").unwrap();
        engine.set_text("contactMethod", "phone").unwrap();
        engine.reset();
        assert_eq!(engine.value("name"), Some(&FieldValue::from("")));
        assert_eq!(engine.is_visible("altPhone"), Some(false));
    }

    #[test]
    fn reset_announces_dependents_it_hides() {
        let mut engine = engine();
        engine.set_text("contactMethod", "phone").unwrap();
        let mut rx = engine.events().subscribe();

        engine.reset();
        assert_eq!(
            visibility_changes(&mut rx),
            vec![("altPhone".to_string(), false)]
        );

        // Nothing to announce when visibility is already initial.
        engine.reset();
        assert!(visibility_changes(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn successful_submit_announces_hidden_dependents() {
        let mut engine = engine();
        let client = RecordingClient::default();
        engine.set_text("name", "Ada").unwrap();
        engine.set_text("contactMethod", "phone").unwrap();
        engine.set_text("altPhone", "555-123-4567").unwrap();
        let mut rx = engine.events().subscribe();

        engine.submit(&client).await.unwrap();
        assert_eq!(
            visibility_changes(&mut rx),
            vec![("altPhone".to_string(), false)]
        );
        assert_eq!(engine.is_visible("altPhone"), Some(false));
    }
}
