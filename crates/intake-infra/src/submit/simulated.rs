//! Local stand-in for the form-processing endpoint.

use std::time::Duration;

use intake_core::submit::SubmissionClient;
use intake_types::config::SubmissionConfig;
use intake_types::error::SubmissionError;
use intake_types::value::Payload;

/// Logs the payload, waits a fixed delay and reports success.
#[derive(Debug, Clone)]
pub struct SimulatedClient {
    delay: Duration,
}

impl SimulatedClient {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_config(config: &SubmissionConfig) -> Self {
        Self::new(Duration::from_millis(config.simulate_delay_ms))
    }
}

impl SubmissionClient for SimulatedClient {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn submit(&self, payload: &Payload) -> Result<(), SubmissionError> {
        tracing::info!(
            fields = payload.len(),
            payload = ?payload,
            delay_ms = self.delay.as_millis() as u64,
            "simulating form submission"
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
