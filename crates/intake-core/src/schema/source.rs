//! SchemaSource trait definition.

use std::future::Future;

use intake_types::error::SchemaLoadError;

/// Where a form schema comes from (a file, an HTTP endpoint, memory).
///
/// Implementations return the raw document; parsing and the consistency
/// check happen in [`super::load_schema`]. Implementations live in
/// intake-infra (e.g., `FileSchemaSource`, `HttpSchemaSource`).
pub trait SchemaSource: Send + Sync {
    /// Human-readable location for logs and error messages.
    fn describe(&self) -> String;

    /// Fetch the raw schema document.
    fn fetch(&self) -> impl Future<Output = Result<String, SchemaLoadError>> + Send;
}

/// In-memory schema source, mostly useful in tests and for embedded forms.
#[derive(Debug, Clone)]
pub struct StaticSchemaSource {
    document: String,
}

impl StaticSchemaSource {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

impl SchemaSource for StaticSchemaSource {
    fn describe(&self) -> String {
        "<inline>".to_string()
    }

    async fn fetch(&self) -> Result<String, SchemaLoadError> {
        Ok(self.document.clone())
    }
}
