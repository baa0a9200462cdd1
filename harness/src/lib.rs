pub mod config;
pub mod context;
pub mod fixtures;
pub mod outcome;
pub mod results;
pub mod runner;
pub mod suites;

pub use config::{HarnessConfig, RunConfig};
pub use context::RunContext;
pub use outcome::{expect_status, StepError, StepResult};
pub use results::TestResults;
pub use runner::{run_all, run_health};
