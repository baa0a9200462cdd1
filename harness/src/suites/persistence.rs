use super::{fetch_record, mismatched_fields, section};
use crate::context::RunContext;
use crate::outcome::{StepError, StepResult};
use client::{ResourceApi, ResourceKind};
use std::time::Duration;
use tracing::debug;

pub const NAME: &str = "Data persistence";

/// Two reads of the first created teacher, a pause apart, must agree.
pub async fn run(ctx: &mut RunContext) {
    section("TESTING DATA PERSISTENCE");

    let Some(id) = ctx.primary_id(ResourceKind::Teacher) else {
        ctx.results
            .record(NAME, false, "No teachers created to test persistence");
        return;
    };

    let result = read_twice(&ctx.api, &id, ctx.config.persistence_pause).await;
    ctx.results.record_step(NAME, result);
}

async fn read_twice(api: &ResourceApi, id: &str, pause: Duration) -> StepResult<String> {
    let first = fetch_record(api, ResourceKind::Teacher, id).await?;
    debug!("waiting {:?} before re-reading teacher {}", pause, id);
    tokio::time::sleep(pause).await;
    let second = fetch_record(api, ResourceKind::Teacher, id).await?;

    let mut drifted = mismatched_fields(&first, &second);
    drifted.extend(
        second
            .keys()
            .filter(|key| !first.contains_key(key.as_str()))
            .cloned(),
    );

    if drifted.is_empty() {
        Ok("Data persists correctly across requests".to_string())
    } else {
        Err(StepError::payload(format!(
            "Data inconsistency detected: {}",
            drifted.join(", ")
        )))
    }
}
