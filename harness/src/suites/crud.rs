//! Create, list, read, update and delete for one resource kind.
//!
//! Each step is recorded on its own; a failed step never stops the ones
//! after it. Read and update reuse the id from create, delete works on a
//! separate disposable record so that id stays valid for later suites.

use super::{as_fields, fetch_record, mismatched_fields, record_id, section};
use crate::context::RunContext;
use crate::fixtures::CrudPlan;
use crate::outcome::{expect_status, StepError, StepResult};
use client::{HttpMethod, ResourceApi, ResourceKind, SERVER_FIELDS};
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub async fn run_teacher_suite(ctx: &mut RunContext) {
    run_crud_suite(ctx, ResourceKind::Teacher).await;
}

/// Students are linked to the first teacher created in this run, if any.
pub async fn run_student_suite(ctx: &mut RunContext) {
    run_crud_suite(ctx, ResourceKind::Student).await;
}

pub async fn run_crud_suite(ctx: &mut RunContext, kind: ResourceKind) {
    section(&format!(
        "TESTING {} CRUD OPERATIONS",
        kind.label().to_uppercase()
    ));

    let teacher_ref = match kind {
        ResourceKind::Student => ctx.primary_id(ResourceKind::Teacher),
        ResourceKind::Teacher => None,
    };
    let plan = match CrudPlan::for_kind(kind, teacher_ref.clone()) {
        Ok(plan) => plan,
        Err(e) => {
            ctx.results
                .record_step(&format!("{} fixtures", kind.label()), Err(e.into()));
            return;
        }
    };
    let api = ctx.api.clone();
    let collection = kind.collection_path();
    let item = kind.item_path("{id}");

    let create_label = ResourceApi::route_label(HttpMethod::Post, &collection);
    match create_record(&api, kind, &plan.create).await {
        Ok(record) => match record_id(kind, &record) {
            Ok(id) => {
                ctx.results.record(
                    &create_label,
                    true,
                    &format!("Created {} with ID: {}", kind, id),
                );
                ctx.remember(kind, id);

                let result = check_required_fields(&plan.create, &record);
                ctx.results
                    .record_step(&format!("{} field validation", kind.label()), result);

                if let Some(teacher_id) = &teacher_ref {
                    let result = check_teacher_reference(&record, teacher_id);
                    ctx.results
                        .record_step(&format!("{} teacher reference", kind.label()), result);
                }
            }
            Err(e) => ctx.results.record_step(&create_label, Err(e)),
        },
        Err(e) => ctx.results.record_step(&create_label, Err(e)),
    }

    let result = list_records(&api, kind).await;
    ctx.results
        .record_step(&ResourceApi::route_label(HttpMethod::Get, &collection), result);

    match ctx.primary_id(kind) {
        Some(id) => {
            let result = read_record(&api, kind, &id).await;
            ctx.results
                .record_step(&ResourceApi::route_label(HttpMethod::Get, &item), result);

            let result = update_record(&api, kind, &id, &plan.update).await;
            let updated = result.is_ok();
            ctx.results
                .record_step(&ResourceApi::route_label(HttpMethod::Put, &item), result);

            if updated {
                let result = verify_update_persisted(&api, &plan, &id).await;
                ctx.results
                    .record_step(&format!("{} update persisted", kind.label()), result);
            }
        }
        None => warn!("no {} was created; skipping read and update checks", kind),
    }

    let delete_label = ResourceApi::route_label(HttpMethod::Delete, &item);
    match delete_disposable(&api, kind, &plan.disposable).await {
        Ok(id) => {
            ctx.results
                .record(&delete_label, true, &format!("Deleted {}: {}", kind, id));
            let result = verify_deleted(&api, kind, &id).await;
            ctx.results
                .record_step(&format!("{} deletion verified", kind.label()), result);
        }
        Err(e) => ctx.results.record_step(&delete_label, Err(e)),
    }
}

async fn create_record(
    api: &ResourceApi,
    kind: ResourceKind,
    body: &Value,
) -> StepResult<Map<String, Value>> {
    let response = expect_status(api.create(kind, body).await?, 200)?;
    response
        .record(kind)
        .cloned()
        .ok_or_else(|| StepError::payload(format!("No {} data in response", kind)))
}

/// Every supplied field plus `id`, `createdAt` and `updatedAt` must come back.
fn check_required_fields(supplied: &Value, record: &Map<String, Value>) -> StepResult<String> {
    let supplied = as_fields(supplied)?;
    let missing: Vec<&str> = supplied
        .keys()
        .map(String::as_str)
        .chain(SERVER_FIELDS)
        .filter(|field| !record.contains_key(*field))
        .collect();

    if missing.is_empty() {
        Ok("All required fields present".to_string())
    } else {
        Err(StepError::payload(format!(
            "Missing fields: {}",
            missing.join(", ")
        )))
    }
}

fn check_teacher_reference(record: &Map<String, Value>, teacher_id: &str) -> StepResult<String> {
    match record.get("teacherId").and_then(Value::as_str) {
        Some(found) if found == teacher_id => {
            Ok(format!("Linked to teacher: {}", teacher_id))
        }
        Some(found) => Err(StepError::payload(format!(
            "Expected teacherId {}, got {}",
            teacher_id, found
        ))),
        None => Err(StepError::payload("teacherId missing from response")),
    }
}

async fn list_records(api: &ResourceApi, kind: ResourceKind) -> StepResult<String> {
    let response = expect_status(api.list(kind).await?, 200)?;
    let records = response
        .records(kind)
        .ok_or_else(|| StepError::payload("Invalid response format"))?;
    Ok(format!("Retrieved {} {}", records.len(), kind.plural()))
}

async fn read_record(api: &ResourceApi, kind: ResourceKind, id: &str) -> StepResult<String> {
    fetch_record(api, kind, id).await?;
    Ok(format!("Retrieved {}: {}", kind, id))
}

async fn update_record(
    api: &ResourceApi,
    kind: ResourceKind,
    id: &str,
    changes: &Value,
) -> StepResult<String> {
    let response = expect_status(api.update(kind, id, changes).await?, 200)?;
    let record = response
        .record(kind)
        .ok_or_else(|| StepError::payload(format!("No {} data in response", kind)))?;

    let stale = mismatched_fields(as_fields(changes)?, record);
    if stale.is_empty() {
        Ok(format!("Updated {}: {}", kind, id))
    } else {
        Err(StepError::payload(format!(
            "Update not reflected in response: {}",
            stale.join(", ")
        )))
    }
}

/// Re-reads the record: submitted fields changed, the rest of the
/// create body did not.
async fn verify_update_persisted(api: &ResourceApi, plan: &CrudPlan, id: &str) -> StepResult<String> {
    let record = fetch_record(api, plan.kind, id).await?;
    let changes = as_fields(&plan.update)?;

    let untouched: Map<String, Value> = as_fields(&plan.create)?
        .iter()
        .filter(|(key, _)| !changes.contains_key(key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let mut problems = Vec::new();
    let stale = mismatched_fields(changes, &record);
    if !stale.is_empty() {
        problems.push(format!("not updated: {}", stale.join(", ")));
    }
    let drifted = mismatched_fields(&untouched, &record);
    if !drifted.is_empty() {
        problems.push(format!("unexpectedly changed: {}", drifted.join(", ")));
    }

    if problems.is_empty() {
        Ok(format!("Re-read {} {} reflects the update", plan.kind, id))
    } else {
        Err(StepError::payload(problems.join("; ")))
    }
}

async fn delete_disposable(api: &ResourceApi, kind: ResourceKind, body: &Value) -> StepResult<String> {
    let id = create_record(api, kind, body)
        .await
        .and_then(|record| record_id(kind, &record))
        .map_err(|e| {
            StepError::payload(format!(
                "Could not create {} for deletion test ({})",
                kind, e
            ))
        })?;
    debug!("created disposable {} {}", kind, id);

    expect_status(api.delete(kind, &id).await?, 200)?;
    Ok(id)
}

async fn verify_deleted(api: &ResourceApi, kind: ResourceKind, id: &str) -> StepResult<String> {
    expect_status(api.get(kind, id).await?, 404)?;
    Ok(format!("{} {} no longer retrievable", kind.label(), id))
}
