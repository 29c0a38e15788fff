//! REST client for the controller's HTTP endpoints.
//!
//! Wraps the load-result and G-code listing reads using [`reqwest`]. Every
//! request is bounded by the timeout the client was built with.

use std::time::Duration;

/// Path of the controller's last program load result.
pub const LOAD_RESULT_PATH: &str = "/py/gcores[0].loadresult";

/// Path of the G-code listing of the loaded program.
pub const LISTING_PATH: &str = "/gcore/0/listing";

/// HTTP client for a single controller.
pub struct ControllerApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the controller REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The request did not complete within the configured timeout.
    #[error("Request to controller timed out")]
    Timeout,

    /// The HTTP request itself failed (network, DNS, connection refused, etc.).
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    /// The controller returned a non-2xx status code.
    #[error("Controller API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The controller answered 2xx with a blank body.
    #[error("Controller returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for ControllerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(err)
        }
    }
}

impl ControllerApi {
    /// Create a client for the controller at `base_url`, e.g. `http://192.168.11.4`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ControllerError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Base URL requests are sent to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the result of the last program load, trimmed.
    ///
    /// A blank body is reported as [`ControllerError::EmptyResponse`].
    pub async fn load_result(&self) -> Result<String, ControllerError> {
        let text = self.get_text(LOAD_RESULT_PATH).await?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ControllerError::EmptyResponse);
        }
        Ok(trimmed.to_string())
    }

    /// Fetch the raw G-code listing of the loaded program.
    pub async fn listing(&self) -> Result<String, ControllerError> {
        self.get_text(LISTING_PATH).await
    }

    // ---- private helpers ----

    async fn get_text(&self, path: &str) -> Result<String, ControllerError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "Controller request");

        let response = self.client.get(&url).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.text().await?)
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`ControllerError::ApiError`] containing
    /// the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ControllerError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {e}>"));
            return Err(ControllerError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
