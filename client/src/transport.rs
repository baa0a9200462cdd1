use crate::types::{ApiRequest, ApiResponse};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Failures that prevented an HTTP exchange from completing.
///
/// An unexpected status code is not one of these: the response is handed
/// back as an [`ApiResponse`] so the caller can decide what it means.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("Cannot connect to {url}: {message}")]
    Connection { url: String, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Unknown error: {message}")]
    Unknown { message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse>;

    fn base_url(&self) -> &str;

    fn transport_name(&self) -> &'static str;
}
