use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::config::Settings;
use crate::error::{ConfigError, ServiceError};

/// Sampling parameters forwarded to the completion service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParams {
    pub temperature: f32,
    #[serde(rename = "topP")]
    pub top_p: f32,
    #[serde(rename = "topK")]
    pub top_k: u32,
}

impl GenerationParams {
    /// Used by the tone and praise flows, which need parseable JSON back.
    pub const STRUCTURED: GenerationParams = GenerationParams {
        temperature: 0.3,
        top_p: 0.8,
        top_k: 40,
    };
}

/// Anything that turns a prompt into a single text completion.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        params: Option<&GenerationParams>,
    ) -> Result<String, ServiceError>;
}

// Structures matching Gemini's generateContent endpoint
#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<&'a GenerationParams>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Deserialize, Debug, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ApiErrorDetail {
    message: String,
}

/// Gemini `generateContent` client.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        let api_key = settings.credential()?.to_string();
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;
        Ok(Self {
            client,
            api_key,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                settings.api_base, settings.model
            ),
        })
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn complete(
        &self,
        prompt: &str,
        params: Option<&GenerationParams>,
    ) -> Result<String, ServiceError> {
        let request_payload = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: params,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            let message = serde_json::from_str::<ApiErrorBody>(&error_body)
                .map(|body| body.error.message)
                .unwrap_or(error_body);
            error!(%status, %message, "Gemini API request failed");
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = response.json::<GenerateResponse>().await?;
        let text = completion_text(parsed)?;
        debug!(response = %text, "Received Gemini completion");
        Ok(text)
    }
}

fn completion_text(response: GenerateResponse) -> Result<String, ServiceError> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(ServiceError::Blocked(reason));
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(ServiceError::EmptyCompletion {
            finish_reason: None,
        });
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ServiceError::EmptyCompletion {
            finish_reason: candidate.finish_reason,
        });
    }
    Ok(text)
}
