//! HTTP client for the reporting and ingestion endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::application::services::AnalyticsReport;
use crate::domain::entities::Click;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// Whether the backend could not serve the request at all.
    ///
    /// Transport failures and 5xx responses count; a 4xx means the server
    /// is up and refused the input.
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Api { status, .. } => *status >= 500,
        }
    }
}

/// Click as sent to `POST /button-clicks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickRequest {
    pub button_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl ClickRequest {
    pub fn new(button_id: impl Into<String>, username: Option<String>) -> Self {
        Self {
            button_id: button_id.into(),
            username,
        }
    }
}

/// Read and write access to a running tracker.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportingClient: Send + Sync {
    /// `GET /analytics`
    async fn fetch_analytics(&self) -> Result<AnalyticsReport, ClientError>;

    /// `GET /button-clicks?limit=`
    async fn fetch_recent_clicks(&self, limit: i64) -> Result<Vec<Click>, ClientError>;

    /// `POST /button-clicks`
    async fn track_click(&self, request: ClickRequest) -> Result<Click, ClientError>;
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    message: String,
}

/// [`ReportingClient`] speaking JSON over HTTP.
pub struct HttpReportingClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpReportingClient {
    /// Creates a client for the tracker at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).send().await?;
        handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.post(&url).json(body).send().await?;
        handle_response(response).await
    }
}

async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: error_message(status, &body),
        });
    }

    let body = response.json().await?;
    Ok(body)
}

/// Prefers the `message` of the server's error envelope over the raw body.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.message,
        Err(_) if body.is_empty() => status.to_string(),
        Err(_) => body.to_string(),
    }
}

#[async_trait]
impl ReportingClient for HttpReportingClient {
    async fn fetch_analytics(&self) -> Result<AnalyticsReport, ClientError> {
        self.get("/analytics").await
    }

    async fn fetch_recent_clicks(&self, limit: i64) -> Result<Vec<Click>, ClientError> {
        let envelope: DataEnvelope<Vec<Click>> =
            self.get(&format!("/button-clicks?limit={}", limit)).await?;
        Ok(envelope.data)
    }

    async fn track_click(&self, request: ClickRequest) -> Result<Click, ClientError> {
        let envelope: DataEnvelope<Click> = self.post("/button-clicks", &request).await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_envelope() {
        let body = r#"{"success":false,"message":"buttonId is required","error":"validation_error","details":{}}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "buttonId is required"
        );
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, ""),
            "502 Bad Gateway"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
    }

    #[test]
    fn test_unreachable_classification() {
        let server = ClientError::Api {
            status: 500,
            message: "x".to_string(),
        };
        let rejected = ClientError::Api {
            status: 400,
            message: "x".to_string(),
        };
        assert!(server.is_unreachable());
        assert!(!rejected.is_unreachable());
    }

    #[test]
    fn test_click_request_omits_missing_username() {
        let body = serde_json::to_value(ClickRequest::new("test-button-1", None)).unwrap();
        assert_eq!(body, serde_json::json!({ "buttonId": "test-button-1" }));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client =
            HttpReportingClient::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }
}
