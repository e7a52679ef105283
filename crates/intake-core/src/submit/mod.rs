//! Submission collaborator port.

pub mod box_client;
pub mod client;

pub use box_client::BoxSubmissionClient;
pub use client::SubmissionClient;
