//! The checks and suites a run is made of, in execution order:
//! connectivity, teacher CRUD, student CRUD, error handling, persistence.

pub mod connectivity;
pub mod crud;
pub mod errors;
pub mod persistence;

use crate::outcome::{expect_status, StepError, StepResult};
use client::{ResourceApi, ResourceKind};
use serde_json::{Map, Value};
use tracing::info;

pub(crate) fn section(title: &str) {
    println!("\n=== {} ===", title);
    info!("suite: {}", title.to_lowercase());
}

/// The record's `id`, which must be a string.
pub(crate) fn record_id(kind: ResourceKind, record: &Map<String, Value>) -> StepResult<String> {
    record
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| StepError::payload(format!("{} in response has no id", kind.label())))
}

pub(crate) fn as_fields(value: &Value) -> StepResult<&Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| StepError::payload("Expected a JSON object"))
}

/// Keys of `expected` whose value in `record` is absent or different.
pub(crate) fn mismatched_fields(
    expected: &Map<String, Value>,
    record: &Map<String, Value>,
) -> Vec<String> {
    expected
        .iter()
        .filter(|(key, value)| record.get(key.as_str()) != Some(*value))
        .map(|(key, _)| key.clone())
        .collect()
}

/// GET a record by id, requiring HTTP 200 and the same id back.
pub(crate) async fn fetch_record(
    api: &ResourceApi,
    kind: ResourceKind,
    id: &str,
) -> StepResult<Map<String, Value>> {
    let response = expect_status(api.get(kind, id).await?, 200)?;
    let record = response
        .record(kind)
        .cloned()
        .ok_or_else(|| StepError::payload(format!("No {} data in response", kind)))?;

    let found = record_id(kind, &record)?;
    if found != id {
        return Err(StepError::payload(format!(
            "{} data mismatch: requested {}, got {}",
            kind.label(),
            id,
            found
        )));
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_mismatched_fields() {
        let expected = object(json!({"name": "Dr. Sarah Johnson-Smith", "salary": 80000}));
        let record = object(json!({
            "id": "t-1",
            "name": "Dr. Sarah Johnson-Smith",
            "salary": 75000
        }));

        assert_eq!(mismatched_fields(&expected, &record), vec!["salary"]);
        assert!(mismatched_fields(&expected, &expected).is_empty());
    }

    #[test]
    fn test_mismatched_fields_counts_missing_keys() {
        let expected = object(json!({"section": "B"}));
        let record = object(json!({"id": "s-1"}));
        assert_eq!(mismatched_fields(&expected, &record), vec!["section"]);
    }

    #[test]
    fn test_record_id_requires_string() {
        let record = object(json!({"id": 7}));
        assert!(record_id(ResourceKind::Teacher, &record).is_err());

        let record = object(json!({"id": "t-1"}));
        assert_eq!(record_id(ResourceKind::Teacher, &record).unwrap(), "t-1");
    }
}
