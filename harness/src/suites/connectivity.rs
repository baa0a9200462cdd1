use super::section;
use crate::context::RunContext;
use crate::outcome::{StepError, StepResult};
use client::{ResourceApi, ResourceKind};
use tracing::error;

pub const NAME: &str = "Database connectivity";

/// Single read of the teacher collection; no retry.
pub async fn run(ctx: &mut RunContext) {
    section("TESTING DATABASE CONNECTIVITY");
    let result = list_teachers(&ctx.api).await;
    ctx.results.record_step(NAME, result);
}

async fn list_teachers(api: &ResourceApi) -> StepResult<String> {
    let response = api.list(ResourceKind::Teacher).await?;

    match response.status {
        200 => match response.records(ResourceKind::Teacher) {
            Some(_) => Ok("Successfully connected to database".to_string()),
            None => Err(StepError::payload(
                "Connected, but the teacher list is missing from the response",
            )),
        },
        actual => {
            if actual == 500 {
                error!("API answered 500; its database is likely unreachable");
            }
            Err(StepError::UnexpectedStatus {
                expected: 200,
                actual,
                body: response.text,
            })
        }
    }
}
