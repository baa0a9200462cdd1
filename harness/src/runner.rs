use crate::context::RunContext;
use crate::suites::{connectivity, crud, errors, persistence};
use chrono::Local;
use tracing::info;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Runs every suite in order, prints the summary and returns whether all
/// assertions passed.
pub async fn run_all(ctx: &mut RunContext) -> bool {
    println!("Starting backend API tests for the teacher management system");
    println!("Testing API at: {}", ctx.api.base_url());
    println!("Test started at: {}", Local::now().format(TIMESTAMP_FORMAT));
    info!(base_url = ctx.api.base_url(), "starting run");

    connectivity::run(ctx).await;
    crud::run_teacher_suite(ctx).await;
    crud::run_student_suite(ctx).await;
    errors::run(ctx).await;
    persistence::run(ctx).await;

    finish(ctx)
}

/// Connectivity check only.
pub async fn run_health(ctx: &mut RunContext) -> bool {
    println!("Checking API at: {}", ctx.api.base_url());
    connectivity::run(ctx).await;
    finish(ctx)
}

fn finish(ctx: &RunContext) -> bool {
    println!();
    print!("{}", ctx.results.render_summary());
    println!();
    println!("Test completed at: {}", Local::now().format(TIMESTAMP_FORMAT));

    let success = ctx.results.is_success();
    if success {
        println!("\nALL TESTS PASSED! Backend API is working correctly.");
    } else {
        println!("\nSOME TESTS FAILED! Please check the errors above.");
    }
    info!(
        passed = ctx.results.passed,
        failed = ctx.results.failed,
        "run finished"
    );

    success
}
