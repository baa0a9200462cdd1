use crate::config::ApiConfig;
use crate::transport::{ApiError, ApiResult, ApiTransport};
use crate::types::{ApiRequest, ApiResponse, HttpMethod};
use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, warn};

/// [`ApiTransport`] backed by a real `reqwest` client. One attempt per
/// request, bounded by the configured timeout.
pub struct HttpTransport {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpTransport {
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        config
            .validate()
            .map_err(|msg| ApiError::InvalidConfig { message: msg })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Unknown {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    fn handle_http_error(&self, url: &str, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout {
                url: url.to_string(),
                timeout: self.config.timeout,
            }
        } else if err.is_connect() {
            ApiError::Connection {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else {
            ApiError::Network(err)
        }
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let url = self.config.api_url(&request.path);
        debug!("{} {}", request.method, url);

        let start = Instant::now();
        let mut builder = self
            .client
            .request(Self::convert_method(request.method), &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("{} {} failed: {}", request.method, url, e);
            self.handle_http_error(&url, e)
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| self.handle_http_error(&url, e))?;

        debug!(
            "{} {} -> {} in {:?}",
            request.method,
            url,
            status,
            start.elapsed()
        );

        Ok(ApiResponse::new(status, text))
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn transport_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResourceKind;
    use mockito::Matcher;
    use serde_json::json;
    use std::time::Duration;

    fn transport_for(server: &mockito::Server) -> HttpTransport {
        HttpTransport::new(ApiConfig::default().with_base_url(server.url())).unwrap()
    }

    #[test]
    fn test_transport_creation() {
        let transport = HttpTransport::new(ApiConfig::default()).unwrap();
        assert_eq!(transport.transport_name(), "http");
        assert_eq!(transport.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ApiConfig::default().with_timeout(Duration::from_secs(0));
        let result = HttpTransport::new(config);
        assert!(matches!(result, Err(ApiError::InvalidConfig { .. })));
    }

    #[tokio::test]
    async fn test_get_parses_json_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/teachers")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"teachers":[{"id":"t-1"}]}"#)
            .create_async()
            .await;

        let transport = transport_for(&server);
        let response = transport.send(ApiRequest::get("/teachers")).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.records(ResourceKind::Teacher).map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/students")
            .match_body(Matcher::PartialJson(json!({"name": "Emma Wilson"})))
            .with_status(200)
            .with_body(r#"{"student":{"id":"s-1","name":"Emma Wilson"}}"#)
            .create_async()
            .await;

        let transport = transport_for(&server);
        let response = transport
            .send(ApiRequest::post("/students", json!({"name": "Emma Wilson"})))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.record_id(ResourceKind::Student), Some("s-1"));
    }

    #[tokio::test]
    async fn test_error_status_is_returned_not_raised() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/api/teachers/missing")
            .with_status(404)
            .with_body(r#"{"error":"Teacher not found"}"#)
            .create_async()
            .await;

        let transport = transport_for(&server);
        let response = transport
            .send(ApiRequest::delete("/teachers/missing"))
            .await
            .unwrap();

        assert_eq!(response.status, 404);
        assert!(!response.is_success());
        assert_eq!(response.body.unwrap()["error"], "Teacher not found");
    }

    #[tokio::test]
    async fn test_non_json_body_is_preserved() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/teachers")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let transport = transport_for(&server);
        let response = transport.send(ApiRequest::get("/teachers")).await.unwrap();

        assert_eq!(response.status, 500);
        assert!(response.body.is_none());
        assert_eq!(response.text, "Internal Server Error");
    }

    #[tokio::test]
    async fn test_connection_refused_is_classified() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let config = ApiConfig::default().with_base_url(format!("http://127.0.0.1:{}", port));
        let transport = HttpTransport::new(config).unwrap();
        let result = transport.send(ApiRequest::get("/teachers")).await;

        assert!(matches!(result, Err(ApiError::Connection { .. })));
    }

    #[tokio::test]
    async fn test_silent_server_is_classified_as_timeout() {
        // Accepted by the kernel backlog but never answered.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let config = ApiConfig::default()
            .with_base_url(format!("http://127.0.0.1:{}", port))
            .with_timeout(Duration::from_millis(200));
        let transport = HttpTransport::new(config).unwrap();
        let result = transport.send(ApiRequest::get("/teachers")).await;

        match result {
            Err(ApiError::Timeout { url, timeout }) => {
                assert_eq!(url, format!("http://127.0.0.1:{}/api/teachers", port));
                assert_eq!(timeout, Duration::from_millis(200));
            }
            other => panic!("expected timeout, got {:?}", other.map(|r| r.status)),
        }
        drop(listener);
    }
}
