//! HTTP client for Formspree-style form-processing endpoints.
//!
//! The payload is POSTed as `application/x-www-form-urlencoded` with
//! `Accept: application/json`. Three metadata entries ride along with the
//! field values: `_subject`, `_replyto` (copied from the configured reply-to
//! field, when the payload has it) and `_cc` when configured.

use std::time::Duration;

use intake_core::submit::SubmissionClient;
use intake_types::config::SubmissionConfig;
use intake_types::error::SubmissionError;
use intake_types::value::Payload;

pub struct FormspreeClient {
    endpoint: String,
    subject: String,
    reply_to_field: String,
    cc: Option<String>,
    http: reqwest::Client,
}

impl FormspreeClient {
    pub fn new(endpoint: impl Into<String>, config: &SubmissionConfig) -> Result<Self, SubmissionError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("intake/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SubmissionError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self::with_client(endpoint, config, http))
    }

    pub fn with_client(
        endpoint: impl Into<String>,
        config: &SubmissionConfig,
        http: reqwest::Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            subject: config.subject.clone(),
            reply_to_field: config.reply_to_field.clone(),
            cc: config.cc.clone(),
            http,
        }
    }

    /// Field values followed by the metadata entries.
    fn form_body<'a>(&'a self, payload: &'a Payload) -> Vec<(&'a str, &'a str)> {
        let mut body: Vec<(&str, &str)> = payload.iter().collect();
        body.push(("_subject", self.subject.as_str()));
        if let Some(reply_to) = payload.get(&self.reply_to_field) {
            body.push(("_replyto", reply_to));
        }
        if let Some(cc) = &self.cc {
            body.push(("_cc", cc.as_str()));
        }
        body
    }
}

impl std::fmt::Debug for FormspreeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormspreeClient")
            .field("endpoint", &self.endpoint)
            .field("subject", &self.subject)
            .finish_non_exhaustive()
    }
}

impl SubmissionClient for FormspreeClient {
    fn name(&self) -> &str {
        "formspree"
    }

    async fn submit(&self, payload: &Payload) -> Result<(), SubmissionError> {
        tracing::debug!(endpoint = %self.endpoint, fields = payload.len(), "posting submission");

        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&self.form_body(payload))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SubmissionError::Timeout
                } else {
                    SubmissionError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "form endpoint rejected submission");
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::info!(status = %status, "form endpoint accepted submission");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::{client as http_client, closed_url, serve_once};

    fn config() -> SubmissionConfig {
        SubmissionConfig {
            cc: Some("office@example.org".to_string()),
            ..Default::default()
        }
    }

    fn payload() -> Payload {
        let mut payload = Payload::new();
        payload.insert("name", "Ada");
        payload.insert("email", "ada@example.org");
        payload
    }

    #[test]
    fn metadata_follows_fields() {
        let client = FormspreeClient::with_client("http://unused", &config(), http_client());
        let payload = payload();
        let body = client.form_body(&payload);
        assert_eq!(
            body,
            vec![
                ("name", "Ada"),
                ("email", "ada@example.org"),
                ("_subject", "New form submission"),
                ("_replyto", "ada@example.org"),
                ("_cc", "office@example.org"),
            ]
        );
    }

    #[test]
    fn reply_to_omitted_without_field() {
        let client =
            FormspreeClient::with_client("http://unused", &SubmissionConfig::default(), http_client());
        let mut payload = Payload::new();
        payload.insert("name", "Ada");
        let body = client.form_body(&payload);
        assert!(body.iter().all(|(k, _)| *k != "_replyto" && *k != "_cc"));
    }

    #[tokio::test]
    async fn posts_urlencoded_form() {
        let (url, request) = serve_once(200, r#"{"ok":true}"#).await;
        let client = FormspreeClient::with_client(url, &config(), http_client());

        client.submit(&payload()).await.unwrap();

        let captured = request.await.unwrap();
        let head = captured.head.to_ascii_lowercase();
        assert!(head.starts_with("post / "));
        assert!(head.contains("accept: application/json"));
        assert!(head.contains("content-type: application/x-www-form-urlencoded"));
        assert!(captured.body.contains("name=Ada"));
        assert!(captured.body.contains("email=ada%40example.org"));
        assert!(captured.body.contains("_subject=New+form+submission"));
        assert!(captured.body.contains("_cc=office%40example.org"));
    }

    #[tokio::test]
    async fn non_success_status_is_rejected() {
        let (url, _request) = serve_once(422, r#"{"error":"bad"}"#).await;
        let client = FormspreeClient::with_client(url, &config(), http_client());
        let err = client.submit(&payload()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Rejected { status: 422 }));
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        let client = FormspreeClient::with_client(closed_url().await, &config(), http_client());
        let err = client.submit(&payload()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Transport(_)));
    }
}
