//! Form schema types.
//!
//! `FormSchema` is the declarative description of an intake form: ordered
//! sections, each holding ordered fields. It is deserialized once from JSON
//! and never mutated afterwards. Both the original key names used by the
//! published form files (`formTitle`, `submitButtonText`, `dependsOn.id`, ...)
//! and the shorter canonical names are accepted.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// The complete form definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Heading shown above the form.
    #[serde(default, rename = "formTitle", alias = "title")]
    pub title: String,
    /// Introductory text below the heading.
    #[serde(default, rename = "formDescription", alias = "description")]
    pub description: String,
    /// Sections in display order.
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Label of the submit button.
    #[serde(
        default = "default_submit_label",
        rename = "submitButtonText",
        alias = "submitLabel"
    )]
    pub submit_label: String,
    /// Label of the reset button.
    #[serde(
        default = "default_reset_label",
        rename = "resetButtonText",
        alias = "resetLabel"
    )]
    pub reset_label: String,
}

fn default_submit_label() -> String {
    "Submit".to_string()
}

fn default_reset_label() -> String {
    "Reset".to_string()
}

impl FormSchema {
    /// Iterate over every field of every section, in display order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    /// Find a field by id.
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields().find(|f| f.id == id)
    }
}

/// A titled group of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Unique id across the whole schema. Sole addressing key for state,
    /// errors and payload.
    pub id: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Choices for `select`, `radio` and `checkbox` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    /// Visibility condition on another field's value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<DependsOn>,
}

/// Declared input type of a field.
///
/// Unrecognized type names are kept verbatim in `Other` so that the schema
/// round-trips; the renderer treats them as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    Text,
    Email,
    Tel,
    Date,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Other(String),
}

impl FieldType {
    /// Whether this type takes its value from a list of options.
    pub fn is_choice(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio | FieldType::Checkbox)
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Tel => "tel",
            FieldType::Date => "date",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Other(name) => name,
        }
    }
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "text" => FieldType::Text,
            "email" => FieldType::Email,
            "tel" => FieldType::Tel,
            "date" => FieldType::Date,
            "textarea" => FieldType::Textarea,
            "select" => FieldType::Select,
            "radio" => FieldType::Radio,
            "checkbox" => FieldType::Checkbox,
            _ => FieldType::Other(s),
        }
    }
}

impl From<FieldType> for String {
    fn from(t: FieldType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable choice of a choice field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

/// Visibility rule: the owning field is shown only while the controller
/// field's value equals `required_value` exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependsOn {
    /// Id of the controller field.
    #[serde(rename = "id", alias = "fieldId")]
    pub field_id: String,
    #[serde(rename = "value", alias = "requiredValue")]
    pub required_value: String,
}
