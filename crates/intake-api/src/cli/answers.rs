//! Answers files: a JSON object mapping field ids to values.
//!
//! ```json
//! { "firstName": "Ada", "contactMethod": "phone", "interests": ["music", "art"] }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};

use intake_core::engine::{EditError, FormEngine};
use intake_types::value::FieldValue;

pub type Answers = BTreeMap<String, FieldValue>;

pub async fn load_answers(path: &Path) -> Result<Answers> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read answers file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse answers file {}", path.display()))
}

/// Apply answers to the engine in form order.
///
/// Answers for hidden fields are retried on later passes, since a controller
/// may be declared after its dependent. Passes repeat until one applies
/// nothing new.
///
/// Returns the ids of answers that were skipped because their field stayed
/// hidden. Unknown ids and values that do not fit a field are errors.
pub fn apply_answers(engine: &mut FormEngine, answers: &Answers) -> Result<Vec<String>> {
    let tree = engine.tree().clone();
    if let Some(unknown) = answers.keys().find(|id| tree.index_of(id).is_none()) {
        bail!("answers file names unknown field '{unknown}'");
    }

    let mut pending: Vec<&str> = tree
        .fields()
        .iter()
        .map(|f| f.id.as_str())
        .filter(|id| answers.contains_key(*id))
        .collect();

    loop {
        let mut hidden = Vec::new();
        for &field_id in &pending {
            match engine.set_value(field_id, answers[field_id].clone()) {
                Ok(()) => {}
                Err(EditError::Hidden(_)) => hidden.push(field_id),
                Err(err) => return Err(err.into()),
            }
        }
        let progressed = hidden.len() < pending.len();
        pending = hidden;
        if pending.is_empty() || !progressed {
            break;
        }
    }

    for field_id in &pending {
        tracing::warn!(field_id = %field_id, "ignoring answer for hidden field");
    }
    Ok(pending.into_iter().map(str::to_string).collect())
}
