//! HTTP client for the Gemini REST API.
//!
//! Wraps `POST /v1beta/models/{model}:generateContent` using [`reqwest`].

use std::time::Duration;

use crate::messages::{ContentPart, GenerateContentRequest, GenerateContentResponse};

/// Default model used for creature artwork.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for the generation API.
#[derive(Debug, Clone)]
pub struct GenAiConfig {
    pub api_key: String,
    pub model: String,
    /// Base HTTP URL without a trailing slash.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl GenAiConfig {
    /// Config with default model, base URL and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Errors from the generation REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Generation API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response could not be decoded.
    #[error("Invalid generation response: {0}")]
    Decode(String),
}

/// HTTP client for one API key / model combination.
pub struct GenAiApi {
    client: reqwest::Client,
    config: GenAiConfig,
}

impl GenAiApi {
    /// Create a client with its own connection pool and the configured
    /// request timeout.
    pub fn new(config: GenAiConfig) -> Result<Self, GenAiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Submit a prompt and return the first candidate's parts.
    ///
    /// `Ok(None)` means the API answered successfully but produced no
    /// candidate content at all.
    pub async fn generate_content(
        &self,
        prompt: &str,
    ) -> Result<Option<Vec<ContentPart>>, GenAiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        tracing::debug!(model = %self.config.model, prompt_len = prompt.len(), "Submitting generation request");

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let body: GenerateContentResponse = response.json().await?;
        body.into_parts()
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`GenAiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GenAiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GenAiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
