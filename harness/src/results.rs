use crate::outcome::StepResult;
use serde::Serialize;
use std::fmt::Write;
use tracing::{info, warn};

const MAX_BODY_IN_MESSAGE: usize = 200;

/// Pass/fail tally for one harness run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestResults {
    pub passed: usize,
    pub failed: usize,
    /// `"{name}: {message}"` for every failure, in the order they happened.
    pub errors: Vec<String>,
}

impl TestResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &str, success: bool, message: &str) {
        if success {
            self.passed += 1;
            println!("✓ {}: PASSED {}", name, message);
            info!(test = name, "passed");
        } else {
            self.failed += 1;
            self.errors.push(format!("{}: {}", name, message));
            println!("✗ {}: FAILED {}", name, message);
            warn!(test = name, "failed: {}", message);
        }
    }

    /// Records a step outcome; the `Ok` value is the success message.
    pub fn record_step(&mut self, name: &str, result: StepResult<String>) {
        match result {
            Ok(message) => self.record(name, true, &message),
            Err(err) => {
                let message = match err.response_body() {
                    Some(body) => format!("{}, Response: {}", err, truncate(body)),
                    None => err.to_string(),
                };
                self.record(name, false, &message);
            }
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Percentage of passed assertions; 0.0 when nothing was recorded.
    pub fn success_rate(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.passed as f64 / self.total() as f64 * 100.0
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Folds another tally into this one, keeping failure order.
    pub fn merge(&mut self, other: TestResults) {
        self.passed += other.passed;
        self.failed += other.failed;
        self.errors.extend(other.errors);
    }

    pub fn render_summary(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(60);
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "TEST SUMMARY");
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "Tests Passed: {}", self.passed);
        let _ = writeln!(out, "Tests Failed: {}", self.failed);
        let _ = writeln!(out, "Success Rate: {:.1}%", self.success_rate());

        if !self.errors.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "FAILED TESTS:");
            for error in &self.errors {
                let _ = writeln!(out, "   • {}", error);
            }
        }

        out
    }
}

fn truncate(body: &str) -> String {
    if body.chars().count() <= MAX_BODY_IN_MESSAGE {
        body.to_string()
    } else {
        let head: String = body.chars().take(MAX_BODY_IN_MESSAGE).collect();
        format!("{}…", head)
    }
}
