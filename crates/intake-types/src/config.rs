//! Configuration types for the intake form.
//!
//! `IntakeConfig` represents `intake.toml`: where the form schema comes from
//! and how submissions reach the form-processing endpoint.

use serde::{Deserialize, Serialize};

/// Top-level configuration. All fields have defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// File path or `http(s)://` URL of the form schema.
    #[serde(default = "default_schema")]
    pub schema: String,

    #[serde(default)]
    pub submission: SubmissionConfig,
}

fn default_schema() -> String {
    "json/form.json".to_string()
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            submission: SubmissionConfig::default(),
        }
    }
}

/// Settings for the form-processing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Endpoint URL (e.g. `https://formspree.io/f/<id>`). When absent,
    /// submissions are simulated locally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Subject line attached to every submission.
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Field whose value is sent as the reply-to address.
    #[serde(default = "default_reply_to_field")]
    pub reply_to_field: String,

    /// Optional CC addresses attached to every submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Artificial latency of a simulated submission, in milliseconds.
    #[serde(default = "default_simulate_delay_ms")]
    pub simulate_delay_ms: u64,
}

fn default_subject() -> String {
    "New form submission".to_string()
}

fn default_reply_to_field() -> String {
    "email".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_simulate_delay_ms() -> u64 {
    2_000
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            subject: default_subject(),
            reply_to_field: default_reply_to_field(),
            cc: None,
            timeout_secs: default_timeout_secs(),
            simulate_delay_ms: default_simulate_delay_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intake_config_default_values() {
        let config = IntakeConfig::default();
        assert_eq!(config.schema, "json/form.json");
        assert!(config.submission.endpoint.is_none());
        assert_eq!(config.submission.reply_to_field, "email");
        assert_eq!(config.submission.timeout_secs, 30);
        assert_eq!(config.submission.simulate_delay_ms, 2_000);
    }

    #[test]
    fn test_intake_config_deserialize_with_defaults() {
        let config: IntakeConfig = toml::from_str("").unwrap();
        assert_eq!(config, IntakeConfig::default());
    }

    #[test]
    fn test_intake_config_deserialize_with_values() {
        let toml_str = r#"
schema = "https://example.org/forms/youth.json"

[submission]
endpoint = "https://formspree.io/f/abc123"
subject = "New Youth Registration"
cc = "office@example.org"
timeout_secs = 10
"#;
        let config: IntakeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.schema, "https://example.org/forms/youth.json");
        assert_eq!(
            config.submission.endpoint.as_deref(),
            Some("https://formspree.io/f/abc123")
        );
        assert_eq!(config.submission.subject, "New Youth Registration");
        assert_eq!(config.submission.cc.as_deref(), Some("office@example.org"));
        assert_eq!(config.submission.timeout_secs, 10);
        assert_eq!(config.submission.reply_to_field, "email");
    }
}
