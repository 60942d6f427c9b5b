use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagResponse {
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// A 200 response carrying `{"error": ...}` (legacy validation mode).
    #[error("service rejected the request: {0}")]
    Rejected(String),
}

pub struct TagClient {
    client: Client,
    base_url: String,
}

impl TagClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Liveness probe.
    pub async fn healthcheck(&self) -> Result<HealthStatus, ClientError> {
        let resp = self
            .client
            .get(format!("{}/healthcheck", self.base_url))
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// Ask the service for tags describing a product.
    pub async fn suggest_tags(
        &self,
        token: &str,
        name: &str,
        description: &str,
    ) -> Result<TagResponse, ClientError> {
        let body = TagRequest {
            name: name.to_string(),
            description: description.to_string(),
        };
        let resp = self
            .client
            .post(format!("{}/suggest-tags", self.base_url))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let value: serde_json::Value = check(resp).await?.json().await?;
        if let Some(error) = value.get("error").and_then(|e| e.as_str()) {
            return Err(ClientError::Rejected(error.to_string()));
        }
        serde_json::from_value(value).map_err(|e| ClientError::Rejected(e.to_string()))
    }
}

async fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|b| b.error)
        .unwrap_or(text);
    Err(ClientError::Status { status, message })
}
