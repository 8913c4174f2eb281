//! Abstractions for generating abstractive summaries through a chat-completions API.
//!
//! The pipeline talks to [`SummarizationClient`] only, so tests can substitute a deterministic
//! stub. Failures are surfaced as [`SummarizationClientError`] and converted by
//! [`summarize_section`] into an explicit [`SectionSummary`] so a single bad request never
//! aborts a document.

use crate::config::Config;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Prefix of the inline marker substituted for a failed summarization.
pub const FAILURE_MARKER_PREFIX: &str = "Error during AI processing";

/// Errors surfaced while attempting abstractive summarization.
#[derive(Debug, Error)]
pub enum SummarizationClientError {
    /// Provider was unreachable or refused the request outright.
    #[error("Summarization provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider returned an error response.
    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// Request payload passed to the summarization provider.
#[derive(Debug, Clone)]
pub struct SummarizationRequest {
    /// Text to condense.
    pub text: String,
    /// Maximum word budget requested by the caller.
    pub max_words: usize,
}

/// Interface implemented by abstractive summarization providers.
#[async_trait]
pub trait SummarizationClient: Send + Sync {
    /// Generate a summary of `request.text` in at most `request.max_words` words.
    async fn generate_summary(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizationClientError>;
}

/// Outcome of one summarization call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionSummary {
    /// The provider produced a summary.
    Generated(String),
    /// The provider call failed; `reason` is the rendered error.
    Failed {
        /// Human-readable failure description.
        reason: String,
    },
}

impl SectionSummary {
    /// Whether this section degraded to a failure marker.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Text contributed to the document summary; failures become an inline marker.
    pub fn into_text(self) -> String {
        match self {
            Self::Generated(text) => text,
            Self::Failed { reason } => format!("{FAILURE_MARKER_PREFIX}: {reason}"),
        }
    }
}

/// Run one summarization request, capturing failure as [`SectionSummary::Failed`].
pub async fn summarize_section(
    client: &(dyn SummarizationClient + Send + Sync),
    text: &str,
    max_words: usize,
) -> SectionSummary {
    match client
        .generate_summary(SummarizationRequest {
            text: text.to_string(),
            max_words,
        })
        .await
    {
        Ok(summary) => SectionSummary::Generated(summary),
        Err(error) => {
            tracing::warn!(
                error = %error,
                max_words,
                "Summarization failed; embedding error marker"
            );
            SectionSummary::Failed {
                reason: error.to_string(),
            }
        }
    }
}

/// System instruction sent ahead of every payload.
pub fn build_system_prompt(max_words: usize) -> String {
    format!(
        "Summarize the following CV text in {max_words} words or less. \
         Focus on skills, experience, and education."
    )
}

/// [`SummarizationClient`] backed by an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiSummarizationClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiSummarizationClient {
    /// Build a client from explicit configuration.
    pub fn new(config: &Config) -> Result<Self, SummarizationClientError> {
        let http = Client::builder()
            .user_agent(concat!("pdfsummary/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| {
                SummarizationClientError::ProviderUnavailable(format!(
                    "failed to construct HTTP client: {error}"
                ))
            })?;
        tracing::debug!(
            base_url = %config.openai_base_url,
            model = %config.summary_model,
            "Summarization client ready"
        );
        Ok(Self {
            http,
            base_url: config.openai_base_url.clone(),
            api_key: config.openai_api_key.clone(),
            model: config.summary_model.clone(),
            temperature: config.summary_temperature,
            max_tokens: config.summary_max_tokens,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl SummarizationClient for OpenAiSummarizationClient {
    async fn generate_summary(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizationClientError> {
        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": build_system_prompt(request.max_words) },
                { "role": "user", "content": request.text },
            ],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        });

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                SummarizationClientError::ProviderUnavailable(format!(
                    "failed to reach {}: {error}",
                    self.base_url
                ))
            })?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
        ) {
            return Err(SummarizationClientError::ProviderUnavailable(format!(
                "{} returned {status}",
                self.endpoint()
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationClientError::GenerationFailed(format!(
                "provider returned {status}: {body}"
            )));
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|error| {
            SummarizationClientError::InvalidResponse(format!(
                "failed to decode chat completion: {error}"
            ))
        })?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| {
                SummarizationClientError::InvalidResponse(
                    "response contained no message content".into(),
                )
            })
    }
}
