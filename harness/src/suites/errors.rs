use super::section;
use crate::context::RunContext;
use crate::outcome::{expect_status, StepResult};
use client::{ApiResponse, ApiResult, ResourceKind};
use uuid::Uuid;

/// A route the API does not define.
pub const INVALID_ROUTE: &str = "/invalid-endpoint";

/// Unknown ids and unknown routes must both answer 404.
pub async fn run(ctx: &mut RunContext) {
    section("TESTING ERROR HANDLING");

    for kind in [ResourceKind::Teacher, ResourceKind::Student] {
        let never_issued = Uuid::new_v4().to_string();
        let result = expect_not_found(ctx.api.get(kind, &never_issued).await);
        ctx.results
            .record_step(&format!("404 Error for non-existent {}", kind), result);
    }

    let result = expect_not_found(ctx.api.get_path(INVALID_ROUTE).await);
    ctx.results
        .record_step("404 Error for invalid endpoint", result);
}

fn expect_not_found(response: ApiResult<ApiResponse>) -> StepResult<String> {
    expect_status(response?, 404)?;
    Ok("Correctly returned 404".to_string())
}
