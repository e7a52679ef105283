//! Infrastructure layer for intake.
//!
//! Contains implementations of the ports defined in `intake-core`: file and
//! HTTP schema sources, the HTTP form-processing client and its local
//! simulator, plus the `intake.toml` loader.

pub mod config;
pub mod source;
pub mod submit;

#[cfg(test)]
pub(crate) mod test_server;
