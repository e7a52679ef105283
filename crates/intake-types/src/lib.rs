//! Shared domain types for the intake form engine.
//!
//! This crate contains the form schema model, runtime field values, the
//! submission payload, configuration types and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod schema;
pub mod value;
