use crate::config::API_PREFIX;
use crate::transport::{ApiResult, ApiTransport};
use crate::types::{ApiRequest, ApiResponse, HttpMethod, ResourceKind};
use serde_json::Value;
use std::sync::Arc;

/// CRUD calls for teachers and students over any [`ApiTransport`].
#[derive(Clone)]
pub struct ResourceApi {
    transport: Arc<dyn ApiTransport>,
}

impl ResourceApi {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Human readable route name, e.g. `GET /api/teachers/{id}`.
    pub fn route_label(method: HttpMethod, path: &str) -> String {
        format!("{} {}{}", method, API_PREFIX, path)
    }

    pub async fn create(&self, kind: ResourceKind, record: &Value) -> ApiResult<ApiResponse> {
        self.transport
            .send(ApiRequest::post(kind.collection_path(), record.clone()))
            .await
    }

    pub async fn list(&self, kind: ResourceKind) -> ApiResult<ApiResponse> {
        self.transport
            .send(ApiRequest::get(kind.collection_path()))
            .await
    }

    pub async fn get(&self, kind: ResourceKind, id: &str) -> ApiResult<ApiResponse> {
        self.transport.send(ApiRequest::get(kind.item_path(id))).await
    }

    pub async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        changes: &Value,
    ) -> ApiResult<ApiResponse> {
        self.transport
            .send(ApiRequest::put(kind.item_path(id), changes.clone()))
            .await
    }

    pub async fn delete(&self, kind: ResourceKind, id: &str) -> ApiResult<ApiResponse> {
        self.transport
            .send(ApiRequest::delete(kind.item_path(id)))
            .await
    }

    /// GET an arbitrary route below the API prefix.
    pub async fn get_path(&self, path: &str) -> ApiResult<ApiResponse> {
        self.transport.send(ApiRequest::get(path)).await
    }
}
