//! LLM Client: the single point of entry for all Gemini API calls.
//!
//! One request per call: no retry, no streaming, no client-side timeout.
//!
//! Model: gemini-2.5-flash (hardcoded, not configurable)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// The model used for every generation call.
pub const MODEL: &str = "models/gemini-2.5-flash";
const API_VERSION: &str = "v1beta";
const GENERATE_CONTENT_METHOD: &str = "generateContent";
const LIST_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Displays the service's own message so it reads the same as the
    /// upstream error text.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Response was blocked: {0}")]
    Blocked(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Seam between the dispatcher and the hosted model. `AppState` carries an
/// `Arc<dyn ContentGenerator>` so tests can substitute a stub.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Sends `prompt` once and returns the model's text unmodified.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Lists model names usable for content generation.
    async fn list_models(&self) -> Result<Vec<String>, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Gemini REST client. The credential is handed in by the caller; nothing
/// is read from the environment here.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Makes a raw generateContent call and returns the full response object.
    pub async fn call(&self, prompt: &str) -> Result<GenerateContentResponse, LlmError> {
        let url = format!(
            "{}/{API_VERSION}/{MODEL}:{GENERATE_CONTENT_METHOD}",
            self.base_url
        );
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let body = read_success_body(response).await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(parsed)
    }

    async fn fetch_model_page(
        &self,
        page_token: Option<&str>,
    ) -> Result<ListModelsResponse, LlmError> {
        let url = format!("{}/{API_VERSION}/models", self.base_url);
        let mut query = vec![("pageSize", LIST_PAGE_SIZE.to_string())];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }

        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .query(&query)
            .send()
            .await?;

        let body = read_success_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt).await?;

        if let Some(text) = response.text() {
            return Ok(text);
        }

        match response.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => Err(LlmError::Blocked(reason)),
            None => Err(LlmError::EmptyContent),
        }
    }

    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_model_page(page_token.as_deref()).await?;
            names.extend(
                page.models
                    .into_iter()
                    .filter(|m| {
                        m.supported_generation_methods
                            .iter()
                            .any(|method| method == GENERATE_CONTENT_METHOD)
                    })
                    .map(|m| m.name),
            );

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(names)
    }
}

/// Returns the body of a 2xx response, or maps the error body to `LlmError::Api`.
async fn read_success_body(response: reqwest::Response) -> Result<String, LlmError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(body);
    }

    warn!("Gemini API returned {}: {}", status, body);
    let message = serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    Err(LlmError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    #[test]
    fn test_response_text_concatenates_parts() {
        let json = r####"{
            "candidates": [
                {"content": {"parts": [{"text": "### Tailored"}, {"text": " Resume"}], "role": "model"}}
            ],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4}
        }"####;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text().as_deref(), Some("### Tailored Resume"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let json = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.text().is_none());
        assert_eq!(
            parsed.prompt_feedback.and_then(|f| f.block_reason).as_deref(),
            Some("SAFETY")
        );
    }

    #[tokio::test]
    async fn test_generate_returns_text_unmodified() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", GENERATE_PATH)
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "contents": [{"parts": [{"text": "hello prompt"}]}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"**Done**\n- bullet"}]}}]}"#)
            .create_async()
            .await;

        let client = GeminiClient::new("test-key".to_string(), server.url());
        let text = client.generate("hello prompt").await.unwrap();
        assert_eq!(text, "**Done**\n- bullet");
    }

    #[tokio::test]
    async fn test_generate_maps_error_body_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", GENERATE_PATH)
            .with_status(429)
            .with_body(
                r#"{"error":{"code":429,"message":"quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = GeminiClient::new("test-key".to_string(), server.url());
        let err = client.generate("prompt").await.unwrap_err();

        assert!(matches!(err, LlmError::Api { status: 429, .. }));
        assert_eq!(err.to_string(), "quota exceeded");
        mock.assert_async().await; // exactly one call, no retry
    }

    #[tokio::test]
    async fn test_generate_blocked_prompt() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", GENERATE_PATH)
            .with_status(200)
            .with_body(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
            .create_async()
            .await;

        let client = GeminiClient::new("test-key".to_string(), server.url());
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, LlmError::Blocked(ref r) if r == "SAFETY"));
    }

    #[tokio::test]
    async fn test_list_models_filters_and_paginates() {
        let mut server = mockito::Server::new_async().await;
        let _first = server
            .mock("GET", "/v1beta/models")
            .match_query(Matcher::Exact("pageSize=1000".into()))
            .with_status(200)
            .with_body(
                r#"{
                    "models": [
                        {"name": "models/gemini-2.5-flash", "supportedGenerationMethods": ["generateContent", "countTokens"]},
                        {"name": "models/embedding-001", "supportedGenerationMethods": ["embedContent"]}
                    ],
                    "nextPageToken": "page-2"
                }"#,
            )
            .create_async()
            .await;
        let _second = server
            .mock("GET", "/v1beta/models")
            .match_query(Matcher::Exact("pageSize=1000&pageToken=page-2".into()))
            .with_status(200)
            .with_body(
                r#"{"models": [{"name": "models/gemini-2.5-pro", "supportedGenerationMethods": ["generateContent"]}]}"#,
            )
            .create_async()
            .await;

        let client = GeminiClient::new("test-key".to_string(), server.url());
        let models = client.list_models().await.unwrap();
        assert_eq!(
            models,
            vec![
                "models/gemini-2.5-flash".to_string(),
                "models/gemini-2.5-pro".to_string()
            ]
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GeminiClient::new("k".to_string(), "http://localhost:9999/");
        assert_eq!(client.base_url, "http://localhost:9999");
    }
}
