//! Application state shared by the CLI commands.

use std::path::Path;

use anyhow::Context;

use intake_core::engine::FormEngine;
use intake_core::event::EventBus;
use intake_core::schema::load_schema;
use intake_core::submit::BoxSubmissionClient;
use intake_infra::config::load_config;
use intake_infra::source::schema_source_for;
use intake_infra::submit::client_for;
use intake_types::config::IntakeConfig;
use intake_types::schema::FormSchema;

/// Loaded configuration and form schema.
pub struct AppState {
    pub config: IntakeConfig,
    pub schema: FormSchema,
    /// Where the schema was loaded from.
    pub location: String,
}

impl AppState {
    /// Load configuration, then fetch and check the form schema.
    ///
    /// A schema that cannot be loaded is fatal: no form is shown.
    pub async fn init(config_path: &Path, schema_override: Option<&str>) -> anyhow::Result<Self> {
        let config = load_config(config_path).await;
        let location = schema_override
            .map(str::to_string)
            .unwrap_or_else(|| config.schema.clone());

        let loaded = match schema_source_for(&location) {
            Ok(source) => load_schema(&source).await,
            Err(err) => Err(err),
        };
        let schema = loaded.with_context(|| {
            format!("Could not load the form from {location}. Check the location and try again")
        })?;

        Ok(Self {
            config,
            schema,
            location,
        })
    }

    /// A fresh engine over the loaded schema.
    pub fn engine(&self) -> FormEngine {
        FormEngine::from_schema(&self.schema, EventBus::default())
    }

    /// The configured submission client.
    pub fn client(&self) -> anyhow::Result<BoxSubmissionClient> {
        Ok(client_for(&self.config.submission)?)
    }
}
