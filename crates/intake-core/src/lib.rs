//! Form logic for intake.
//!
//! This crate defines the ports (schema source, submission client) that the
//! infrastructure layer implements, the render engine and the interaction
//! engine. It depends only on `intake-types`, never on `intake-infra` or any
//! network or file IO crate.

pub mod engine;
pub mod event;
pub mod render;
pub mod schema;
pub mod submit;
