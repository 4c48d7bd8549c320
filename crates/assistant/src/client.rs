//! Client for the Gemini `generateContent` REST endpoint.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::CopyAssistant;
use crate::error::{ApiErrorResponse, AssistError, Result};
use crate::image::ImageInput;
use crate::request;
use crate::types::{ContentSuggestions, GenerateRequest, GenerateResponse};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_RESEARCH_MODEL: &str = "gemini-3-pro-preview";

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_research_model() -> String {
    DEFAULT_RESEARCH_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

/// Connection settings for the assistant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub api_key: String,
    /// Model for copy writing and image analysis
    #[serde(default = "default_model")]
    pub model: String,
    /// Model for URL research with web search
    #[serde(default = "default_research_model")]
    pub research_model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            research_model: default_research_model(),
            endpoint: default_endpoint(),
        }
    }
}

/// [`CopyAssistant`] backed by Gemini
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: AssistantConfig,
}

impl GeminiClient {
    pub fn new(config: AssistantConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AssistError::MissingApiKey);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let key = HeaderValue::from_str(config.api_key.trim()).map_err(|_| {
            AssistError::Unauthorized("API key contains invalid characters".to_string())
        })?;
        headers.insert("x-goog-api-key", key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    fn url(&self, model: &str) -> String {
        generate_url(&self.config.endpoint, model)
    }

    #[instrument(skip(self, request))]
    async fn generate(&self, model: &str, request: &GenerateRequest) -> Result<GenerateResponse> {
        let response = self.client.post(self.url(model)).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_from_status(status, response).await);
        }

        let body = response.text().await?;
        match serde_json::from_str(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                tracing::warn!(error = %e, "unexpected response shape");
                Ok(GenerateResponse::default())
            }
        }
    }

    async fn suggest(&self, model: &str, request: &GenerateRequest) -> Result<ContentSuggestions> {
        let response = self.generate(model, request).await?;
        Ok(ContentSuggestions::from_model_text(&response.text()))
    }
}

fn generate_url(endpoint: &str, model: &str) -> String {
    format!("{}/models/{}:generateContent", endpoint.trim_end_matches('/'), model)
}

async fn error_from_status(status: reqwest::StatusCode, response: reqwest::Response) -> AssistError {
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return AssistError::Unauthorized("API key was rejected".to_string());
    }

    match response.text().await {
        Ok(body) => api_error(status.as_u16(), &body),
        Err(e) => AssistError::Http(e),
    }
}

fn api_error(status: u16, body: &str) -> AssistError {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) if parsed.error.status.is_empty() => parsed.error.message,
        Ok(parsed) => format!("{}: {}", parsed.error.status, parsed.error.message),
        Err(_) => body.to_string(),
    };
    AssistError::Api { status, message }
}

#[async_trait]
impl CopyAssistant for GeminiClient {
    async fn improve_copy(&self, text: &str) -> Result<String> {
        let response = self
            .generate(&self.config.model, &request::improve_request(text))
            .await?;
        let improved = response.text();
        if improved.trim().is_empty() {
            tracing::warn!("assistant returned no text, keeping original");
            return Ok(text.to_string());
        }
        Ok(improved.trim().to_string())
    }

    async fn enhance_content(
        &self,
        description: &str,
        business_name: &str,
    ) -> Result<ContentSuggestions> {
        self.suggest(
            &self.config.model,
            &request::enhance_request(description, business_name),
        )
        .await
    }

    async fn analyze_image(&self, image: &ImageInput) -> Result<ContentSuggestions> {
        self.suggest(&self.config.model, &request::image_request(image))
            .await
    }

    async fn analyze_url(&self, url: &str) -> Result<ContentSuggestions> {
        let response = self
            .generate(&self.config.research_model, &request::url_request(url))
            .await?;
        let mut suggestions = ContentSuggestions::from_model_text(&response.text());
        suggestions.source_urls = response.source_urls();
        tracing::debug!(sources = suggestions.source_urls.len(), "url analysis grounded");
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key() {
        let result = GeminiClient::new(AssistantConfig::default());
        assert!(matches!(result, Err(AssistError::MissingApiKey)));

        let blank = AssistantConfig {
            api_key: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches!(GeminiClient::new(blank), Err(AssistError::MissingApiKey)));
    }

    #[test]
    fn test_client_builds_with_key() {
        let client = GeminiClient::new(AssistantConfig {
            api_key: "test-key".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            client.url(DEFAULT_MODEL),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_generate_url_trims_slash() {
        assert_eq!(
            generate_url("http://localhost:9000/v1beta/", "m"),
            "http://localhost:9000/v1beta/models/m:generateContent"
        );
    }

    #[test]
    fn test_config_defaults_for_missing_fields() {
        let config: AssistantConfig = parse_config(r#"{"api_key": "k"}"#);
        assert_eq!(config.api_key, "k");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.research_model, DEFAULT_RESEARCH_MODEL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    fn parse_config(json: &str) -> AssistantConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_api_error_message() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        match api_error(429, body) {
            AssistError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "RESOURCE_EXHAUSTED: Quota exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        match api_error(500, "upstream failure") {
            AssistError::Api { message, .. } => assert_eq!(message, "upstream failure"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
