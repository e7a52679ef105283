//! Interaction & validation engine.
//!
//! [`FormEngine`] owns the per-field state of one rendered form: values,
//! visibility and inline errors. It applies edits, keeps dependent fields in
//! sync with their controllers, validates on submit and drives a single
//! non-reentrant submission at a time. [`FormActor`] puts an engine behind
//! a channel for callers that need to edit and submit concurrently.

pub mod actor;
pub mod form;
pub mod payload;
pub mod state;
pub mod validate;
pub mod visibility;

pub use actor::{FormActor, FormHandle, FormSnapshot, HandleError};
pub use form::{EditError, FormEngine, SubmissionTicket, SubmitError};
pub use payload::build_payload;
pub use state::{FieldState, initial_states};
pub use validate::{ValidationReport, validate};
pub use visibility::{Transition, apply_controller_change};
