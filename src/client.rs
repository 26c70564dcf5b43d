//! Advisory service client
//!
//! The advisory service is an opaque text-in/text-out endpoint:
//! `POST {base}/api/chat` with `{ "prompt": ... }`, answering
//! `{ "answer": ..., "id"?: ... }`. Failures come back already classified
//! as a [`ChatError`] so callers never inspect transport details.
//! Uses a long-lived reqwest::Client for connection pooling.

use crate::config::AppConfig;
use crate::error::ChatError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info, warn};

pub const CHAT_PATH: &str = "/api/chat";

/// Reply from a successful (2xx) advisory call
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdvisoryReply {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

/// Text-in/text-out seam to the advisory service
#[async_trait]
pub trait AdvisoryTransport: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<AdvisoryReply, ChatError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    prompt: &'a str,
}

/// Reusable advisory client (connection-pooled)
pub struct HttpAdvisoryClient {
    client: Client,
    base_url: String,
    endpoint: String,
}

impl HttpAdvisoryClient {
    /// `timeout` of `None` waits for the service indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> crate::Result<Self> {
        let mut builder = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8);

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()?;

        let base_url = base_url.trim_end_matches('/').to_string();
        let endpoint = format!("{}{}", base_url, CHAT_PATH);

        Ok(Self {
            client,
            base_url,
            endpoint,
        })
    }

    pub fn from_config(config: &AppConfig) -> crate::Result<Self> {
        Self::new(&config.advisory_base_url, config.advisory_timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AdvisoryTransport for HttpAdvisoryClient {
    async fn complete(&self, prompt: &str) -> Result<AdvisoryReply, ChatError> {
        info!(endpoint = %self.endpoint, prompt_len = prompt.len(), "Calling advisory service");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { prompt })
            .send()
            .await
            .map_err(|e| {
                error!("Advisory request failed: {}", e);
                if e.is_builder() {
                    ChatError::Unknown {
                        detail: e.to_string(),
                    }
                } else {
                    ChatError::Unreachable {
                        endpoint: self.base_url.clone(),
                    }
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            error!(status = %status, body = ?body, "Advisory service error response");
            return Err(classify_status(status, body.as_ref()));
        }

        // A 2xx without a readable body still counts as a reply; the chat
        // controller substitutes its placeholder answer.
        let reply = response.json::<AdvisoryReply>().await.unwrap_or_else(|e| {
            warn!("Failed to parse advisory reply: {}", e);
            AdvisoryReply::default()
        });

        info!(reply_id = ?reply.id, "Advisory reply received");

        Ok(reply)
    }
}

/// Map a non-2xx response to its [`ChatError`].
///
/// Precedence: 404, 500, 401/403, then a structured `{ "error": "..." }`
/// body, otherwise unknown.
pub fn classify_status(status: StatusCode, body: Option<&Value>) -> ChatError {
    match status {
        StatusCode::NOT_FOUND => ChatError::NotFound,
        StatusCode::INTERNAL_SERVER_ERROR => ChatError::ServerError,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ChatError::Unauthorized,
        _ => match body.and_then(|b| b.get("error")).and_then(Value::as_str) {
            Some(message) => ChatError::ServiceMessage(message.to_string()),
            None => ChatError::Unknown {
                detail: format!("advisory service returned {}", status),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode as AxumStatus, routing::post, Json, Router};
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    /// Serve `router` on an ephemeral port and return its base URL.
    async fn spawn_service(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn failing_with(status: u16, body: Value) -> Router {
        Router::new().route(
            CHAT_PATH,
            post(move || {
                let body = body.clone();
                async move { (AxumStatus::from_u16(status).unwrap(), Json(body)) }
            }),
        )
    }

    #[test]
    fn test_request_serialization() {
        let json = serde_json::to_string(&ChatRequest { prompt: "How do I budget?" }).unwrap();
        assert_eq!(json, r#"{"prompt":"How do I budget?"}"#);
    }

    #[test]
    fn test_classify_status() {
        let body = json!({ "error": "Rate limit reached" });

        assert_eq!(classify_status(StatusCode::NOT_FOUND, Some(&body)), ChatError::NotFound);
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR, None),
            ChatError::ServerError
        );
        assert_eq!(classify_status(StatusCode::UNAUTHORIZED, None), ChatError::Unauthorized);
        assert_eq!(classify_status(StatusCode::FORBIDDEN, Some(&body)), ChatError::Unauthorized);
        assert_eq!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, Some(&body)),
            ChatError::ServiceMessage("Rate limit reached".to_string())
        );
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, Some(&json!({ "message": "nope" }))),
            ChatError::Unknown { .. }
        ));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = HttpAdvisoryClient::new("http://localhost:8080/", None).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/api/chat");
    }

    #[tokio::test]
    async fn test_successful_reply() {
        let router = Router::new().route(
            CHAT_PATH,
            post(|Json(body): Json<Value>| async move {
                let prompt = body["prompt"].as_str().unwrap_or_default().to_string();
                Json(json!({ "answer": format!("echo: {}", prompt), "id": "msg-1" }))
            }),
        );
        let base = spawn_service(router).await;
        let client = HttpAdvisoryClient::new(&base, None).unwrap();

        let reply = assert_ok!(client.complete("hello").await);
        assert_eq!(reply.answer.as_deref(), Some("echo: hello"));
        assert_eq!(reply.id.as_deref(), Some("msg-1"));
    }

    #[tokio::test]
    async fn test_reply_without_answer() {
        let base = spawn_service(failing_with(200, json!({ "status": "ok" }))).await;
        let client = HttpAdvisoryClient::new(&base, None).unwrap();

        let reply = assert_ok!(client.complete("hello").await);
        assert_eq!(reply, AdvisoryReply::default());
    }

    #[tokio::test]
    async fn test_error_statuses_are_classified() {
        let cases = vec![
            (404, json!({}), ChatError::NotFound),
            (500, json!({ "error": "boom" }), ChatError::ServerError),
            (401, json!({}), ChatError::Unauthorized),
            (
                422,
                json!({ "error": "Prompt too long" }),
                ChatError::ServiceMessage("Prompt too long".to_string()),
            ),
        ];

        for (status, body, expected) in cases {
            let base = spawn_service(failing_with(status, body)).await;
            let client = HttpAdvisoryClient::new(&base, None).unwrap();
            let err = assert_err!(client.complete("hello").await);
            assert_eq!(err, expected);
        }
    }

    #[tokio::test]
    async fn test_missing_route_is_not_found() {
        let base = spawn_service(Router::new()).await;
        let client = HttpAdvisoryClient::new(&base, None).unwrap();
        assert_eq!(client.complete("hello").await, Err(ChatError::NotFound));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = HttpAdvisoryClient::new(&base, Some(Duration::from_secs(5))).unwrap();
        let err = assert_err!(client.complete("hello").await);
        assert_eq!(err, ChatError::Unreachable { endpoint: base });
    }
}
