//! Generic Notion request dispatch.

use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::NotionError;

const NOTION_API_BASE: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

/// Notion API client.
///
/// Holds the bearer token and dispatches JSON requests with the pinned
/// `Notion-Version` header. The CRUD verbs in [`crate::pages`] and
/// [`crate::databases`] are built on [`NotionClient::request`].
pub struct NotionClient {
    http: Client,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct NotionApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl NotionClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Notion integration token
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            base_url: NOTION_API_BASE.to_string(),
        }
    }

    /// Point the client at a different base URL (used in tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Dispatch a request to the Notion API.
    ///
    /// # Errors
    ///
    /// Returns [`NotionError::Connection`] on transport failure,
    /// [`NotionError::Api`] for non-2xx responses, and
    /// [`NotionError::InvalidResponse`] when the body is not JSON.
    #[instrument(skip(self, body), fields(method = %method, path = %path))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, NotionError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Dispatching Notion request");

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NotionError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }

        response
            .json()
            .await
            .map_err(|e| NotionError::InvalidResponse(e.to_string()))
    }

    async fn api_error(status: StatusCode, response: reqwest::Response) -> NotionError {
        let detail: NotionApiError = response.json().await.unwrap_or(NotionApiError {
            code: "unknown".to_string(),
            message: "response body was not valid JSON".to_string(),
        });

        NotionError::Api {
            status: status.as_u16(),
            code: detail.code,
            message: detail.message,
        }
    }
}
