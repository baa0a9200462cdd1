//! Explicit step results.
//!
//! Every step returns a [`StepResult`] instead of raising; the runner turns
//! it into a pass or fail entry. The variants keep the three failure kinds
//! apart: the call never completed, the status was wrong, or the payload was
//! malformed.

use client::{ApiError, ApiResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StepError {
    #[error("Exception: {0}")]
    Transport(#[from] ApiError),

    #[error("Expected status {expected}, got {actual}")]
    UnexpectedStatus {
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("{0}")]
    Payload(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StepResult<T> = Result<T, StepError>;

impl StepError {
    pub fn payload(message: impl Into<String>) -> Self {
        StepError::Payload(message.into())
    }

    /// Response text attached to a status failure, if any.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            StepError::UnexpectedStatus { body, .. } if !body.is_empty() => Some(body.as_str()),
            _ => None,
        }
    }
}

/// Passes the response through when its status is `expected`.
pub fn expect_status(response: ApiResponse, expected: u16) -> StepResult<ApiResponse> {
    if response.status == expected {
        Ok(response)
    } else {
        Err(StepError::UnexpectedStatus {
            expected,
            actual: response.status,
            body: response.text,
        })
    }
}
