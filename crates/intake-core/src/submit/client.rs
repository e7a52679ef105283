//! SubmissionClient trait definition.
//!
//! The transport to the form-processing endpoint is opaque to the engine: it
//! hands over a payload and gets back success or failure.

use std::future::Future;

use intake_types::error::SubmissionError;
use intake_types::value::Payload;

/// Trait for submission backends (HTTP form endpoints, simulators, mocks).
///
/// Uses native async fn in traits (RPITIT). Implementations live in
/// intake-infra (e.g., `FormspreeClient`, `SimulatedClient`). Timeouts are
/// the implementation's responsibility; the engine never cancels a call.
pub trait SubmissionClient: Send + Sync {
    /// Human-readable backend name (e.g., "formspree", "simulated").
    fn name(&self) -> &str;

    /// Deliver the payload. `Ok(())` means the endpoint accepted it.
    fn submit(&self, payload: &Payload)
    -> impl Future<Output = Result<(), SubmissionError>> + Send;
}
