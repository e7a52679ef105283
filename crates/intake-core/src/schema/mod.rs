//! Form schema loading.
//!
//! A schema is fetched from a [`SchemaSource`], parsed from JSON and run
//! through [`check_schema`]. Any failure along the way is a
//! `SchemaLoadError`; no partial schema is ever returned.

pub mod check;
pub mod source;

pub use check::check_schema;
pub use source::{SchemaSource, StaticSchemaSource};

use intake_types::error::SchemaLoadError;
use intake_types::schema::FormSchema;

/// Parse a JSON document into a checked `FormSchema`.
pub fn parse_schema(document: &str) -> Result<FormSchema, SchemaLoadError> {
    let schema: FormSchema =
        serde_json::from_str(document).map_err(|e| SchemaLoadError::Parse(e.to_string()))?;
    check_schema(&schema)?;
    Ok(schema)
}

/// Fetch, parse and check a schema from the given source.
pub async fn load_schema<S: SchemaSource>(source: &S) -> Result<FormSchema, SchemaLoadError> {
    let location = source.describe();
    let document = source.fetch().await.inspect_err(|e| {
        tracing::error!(%location, error = %e, "failed to fetch form schema");
    })?;

    let schema = parse_schema(&document).inspect_err(|e| {
        tracing::error!(%location, error = %e, "failed to load form schema");
    })?;

    tracing::info!(
        %location,
        sections = schema.sections.len(),
        fields = schema.fields().count(),
        "loaded form schema"
    );
    Ok(schema)
}
