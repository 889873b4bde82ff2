use std::time::Duration;

use reqwest::Client;
use shoptab_core::error::AppError;
use shoptab_core::traits::QueryExecutor;
use url::Url;

const DEFAULT_ENDPOINT: &str = "https://realtime.oxylabs.io/v1/queries";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Static operator credentials for the realtime API.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// HTTP client for the realtime scraping API.
///
/// Sends one POST per query with HTTP basic auth and a JSON body. No retry:
/// a failed call terminates the run. The default timeout is 30 seconds; the
/// endpoint can be overridden for testing against a stub server.
#[derive(Debug, Clone)]
pub struct RealtimeClient {
    client: Client,
    endpoint: Url,
    credentials: Credentials,
    timeout_secs: u64,
}

impl RealtimeClient {
    pub fn new(credentials: Credentials) -> Result<Self, AppError> {
        Self::with_timeout(credentials, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(credentials: Credentials, timeout: Duration) -> Result<Self, AppError> {
        let timeout_secs = timeout.as_secs();
        let client = Client::builder()
            .user_agent("shoptab/0.1")
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        let endpoint = Url::parse(DEFAULT_ENDPOINT)
            .map_err(|e| AppError::HttpError(format!("Invalid endpoint: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            credentials,
            timeout_secs,
        })
    }

    /// Override the endpoint URL (e.g. a local stub server).
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, AppError> {
        self.endpoint = Url::parse(endpoint)
            .map_err(|e| AppError::HttpError(format!("Invalid endpoint {endpoint}: {e}")))?;
        Ok(self)
    }
}

impl QueryExecutor for RealtimeClient {
    async fn execute(&self, payload: &serde_json::Value) -> Result<serde_json::Value, AppError> {
        tracing::debug!(endpoint = %self.endpoint, "POST query");

        let response = self
            .client
            .post(self.endpoint.clone())
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    AppError::NetworkError(format!("Connection failed: {e}"))
                } else {
                    AppError::HttpError(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to read response body: {e}")))?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Response received");

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AppError::AuthError {
                status_code: status.as_u16(),
                message: body,
            });
        }
        if !status.is_success() {
            return Err(AppError::HttpError(format!(
                "HTTP {} for {}: {}",
                status.as_u16(),
                self.endpoint,
                body
            )));
        }

        parse_response_body(&body)
    }
}

/// Decode a response body and verify the `results` envelope is present.
fn parse_response_body(body: &str) -> Result<serde_json::Value, AppError> {
    let decoded: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| AppError::ResponseFormatError(format!("Body is not JSON: {e}")))?;

    match decoded.get("results").and_then(serde_json::Value::as_array) {
        Some(results) if !results.is_empty() => Ok(decoded),
        Some(_) => Err(AppError::ResponseFormatError(
            "`results` array is empty".to_string(),
        )),
        None => Err(AppError::ResponseFormatError(
            "response has no `results` array".to_string(),
        )),
    }
}
