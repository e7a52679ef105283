//! Structural consistency checks on a parsed `FormSchema`.
//!
//! A schema that passes these checks is safe to render: every field id is
//! unique, every `dependsOn` points at a real field, no dependency loops back
//! on itself, and options are declared exactly for the choice types.

use std::collections::{HashMap, HashSet};

use intake_types::error::SchemaLoadError;
use intake_types::schema::{FieldType, FormSchema};

/// Validate structural constraints on a `FormSchema`.
///
/// Checks:
/// - All field ids are non-empty and unique across sections
/// - `dependsOn` references an existing field other than the field itself
/// - Dependency chains do not form a cycle
/// - `select`/`radio`/`checkbox` fields declare options
/// - Other known types do not declare options
///
/// Fields with an unrecognized type are exempt from the options rule; they
/// render as text and any options are ignored.
pub fn check_schema(schema: &FormSchema) -> Result<(), SchemaLoadError> {
    let mut seen = HashSet::new();
    for field in schema.fields() {
        if field.id.is_empty() {
            return Err(SchemaLoadError::Inconsistent(format!(
                "field '{}' has an empty id",
                field.label
            )));
        }
        if !seen.insert(field.id.as_str()) {
            return Err(SchemaLoadError::Inconsistent(format!(
                "duplicate field id: '{}'",
                field.id
            )));
        }
    }

    for field in schema.fields() {
        match (&field.field_type, &field.options) {
            (t, None) if t.is_choice() => {
                return Err(SchemaLoadError::Inconsistent(format!(
                    "{} field '{}' declares no options",
                    t, field.id
                )));
            }
            (FieldType::Other(_), _) => {}
            (t, Some(_)) if !t.is_choice() => {
                return Err(SchemaLoadError::Inconsistent(format!(
                    "{} field '{}' must not declare options",
                    t, field.id
                )));
            }
            _ => {}
        }

        if let Some(dep) = &field.depends_on {
            if dep.field_id == field.id {
                return Err(SchemaLoadError::Inconsistent(format!(
                    "field '{}' depends on itself",
                    field.id
                )));
            }
            if !seen.contains(dep.field_id.as_str()) {
                return Err(SchemaLoadError::Inconsistent(format!(
                    "field '{}' depends on unknown field '{}'",
                    field.id, dep.field_id
                )));
            }
        }
    }

    // Each field has at most one controller, so a cycle shows up as a walk
    // up the controller chain that revisits a field.
    let controller_of: HashMap<&str, &str> = schema
        .fields()
        .filter_map(|f| f.depends_on.as_ref().map(|d| (f.id.as_str(), d.field_id.as_str())))
        .collect();

    for start in controller_of.keys() {
        let mut visited = HashSet::from([*start]);
        let mut current = *start;
        while let Some(next) = controller_of.get(current) {
            if !visited.insert(*next) {
                return Err(SchemaLoadError::Inconsistent(format!(
                    "dependency cycle involving field '{next}'"
                )));
            }
            current = *next;
        }
    }

    Ok(())
}
