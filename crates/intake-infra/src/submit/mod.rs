//! Submission client adapters.

pub mod formspree;
pub mod simulated;

pub use formspree::FormspreeClient;
pub use simulated::SimulatedClient;

use intake_core::submit::BoxSubmissionClient;
use intake_types::config::SubmissionConfig;
use intake_types::error::SubmissionError;

/// Build the configured submission client: the HTTP endpoint when one is set,
/// the local simulator otherwise.
pub fn client_for(config: &SubmissionConfig) -> Result<BoxSubmissionClient, SubmissionError> {
    match &config.endpoint {
        Some(endpoint) => {
            tracing::info!(%endpoint, "submissions go to form endpoint");
            Ok(BoxSubmissionClient::new(FormspreeClient::new(endpoint, config)?))
        }
        None => {
            tracing::info!(
                delay_ms = config.simulate_delay_ms,
                "no endpoint configured, submissions are simulated"
            );
            Ok(BoxSubmissionClient::new(SimulatedClient::from_config(config)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::submit::SubmissionClient;

    #[test]
    fn endpoint_selects_http_client() {
        let config = SubmissionConfig {
            endpoint: Some("https://formspree.io/f/abc".to_string()),
            ..Default::default()
        };
        assert_eq!(client_for(&config).unwrap().name(), "formspree");
    }

    #[test]
    fn no_endpoint_selects_simulator() {
        let config = SubmissionConfig::default();
        assert_eq!(client_for(&config).unwrap().name(), "simulated");
    }
}
