//! Schema source adapters: local file and HTTP(S) URL.

use std::path::PathBuf;

use intake_core::schema::SchemaSource;
use intake_types::error::SchemaLoadError;

/// Reads the schema document from a local file.
#[derive(Debug, Clone)]
pub struct FileSchemaSource {
    path: PathBuf,
}

impl FileSchemaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SchemaSource for FileSchemaSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String, SchemaLoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SchemaLoadError::Unreachable(format!("{}: {e}", self.path.display())))
    }
}

/// Fetches the schema document with an HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpSchemaSource {
    url: String,
    http: reqwest::Client,
}

impl HttpSchemaSource {
    pub fn new(url: impl Into<String>) -> Result<Self, SchemaLoadError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("intake/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SchemaLoadError::Unreachable(format!("failed to create HTTP client: {e}")))?;
        Ok(Self::with_client(url, http))
    }

    pub fn with_client(url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            http,
        }
    }
}

impl SchemaSource for HttpSchemaSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String, SchemaLoadError> {
        tracing::debug!(url = %self.url, "fetching form schema");

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SchemaLoadError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, status = %status, "schema endpoint returned error");
            return Err(SchemaLoadError::Status {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| SchemaLoadError::Unreachable(format!("failed to read response body: {e}")))
    }
}

/// A schema source picked at runtime from a location string.
#[derive(Debug, Clone)]
pub enum AnySchemaSource {
    File(FileSchemaSource),
    Http(HttpSchemaSource),
}

impl SchemaSource for AnySchemaSource {
    fn describe(&self) -> String {
        match self {
            Self::File(s) => s.describe(),
            Self::Http(s) => s.describe(),
        }
    }

    async fn fetch(&self) -> Result<String, SchemaLoadError> {
        match self {
            Self::File(s) => s.fetch().await,
            Self::Http(s) => s.fetch().await,
        }
    }
}

/// `http://` and `https://` locations are fetched over HTTP; anything else
/// is treated as a file path.
pub fn schema_source_for(location: &str) -> Result<AnySchemaSource, SchemaLoadError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(AnySchemaSource::Http(HttpSchemaSource::new(location)?))
    } else {
        Ok(AnySchemaSource::File(FileSchemaSource::new(location)))
    }
}
