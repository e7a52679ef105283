//! Presentation signals.
//!
//! The engine never talks to a UI directly. It publishes `FormEvent`s on an
//! [`EventBus`] and whatever presents the form subscribes to them.

pub mod bus;

pub use bus::EventBus;

use std::collections::BTreeMap;
use std::sync::Arc;

use intake_types::error::ValidationError;

use crate::render::RenderedTree;

/// Outbound, fire-and-forget signals for the presentation layer.
#[derive(Debug, Clone)]
pub enum FormEvent {
    /// A tree was rendered and its state initialised.
    RenderReady { tree: Arc<RenderedTree> },

    /// A submit attempt failed validation.
    ValidationFailed {
        errors: BTreeMap<String, ValidationError>,
    },

    /// The submission collaborator accepted the payload; the form was reset.
    SubmitSuccess,

    /// The submission did not go through; the form is left intact.
    SubmitFailure { message: String },

    /// A dependent field was shown or hidden.
    FieldVisibilityChanged { field_id: String, visible: bool },
}
