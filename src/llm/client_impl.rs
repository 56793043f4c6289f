use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::client::{GenerationRequest, LlmClient, RequestPart};
use crate::util::SecretString;

fn build_http_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("failed to build HTTP client")
}

// ============================================================================
// Gemini Client (Google Generative AI)
// ============================================================================

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiClient {
    api_key: SecretString,
    model: String,
    base_url: String,
    max_tokens: u32,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    Inline {
        inline_data: GeminiInlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, max_tokens: u32, timeout_secs: u64) -> Result<Self> {
        Self::with_base_url(
            api_key,
            model,
            GEMINI_BASE_URL.to_string(),
            max_tokens,
            timeout_secs,
        )
    }

    pub fn with_base_url(
        api_key: String,
        model: String,
        base_url: String,
        max_tokens: u32,
        timeout_secs: u64,
    ) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_tokens,
            client: build_http_client(timeout_secs)?,
        })
    }

    fn build_request(&self, request: &GenerationRequest) -> GeminiRequest {
        let parts = request
            .parts
            .iter()
            .map(|part| match part {
                RequestPart::Text(text) => GeminiPart::Text { text: text.clone() },
                RequestPart::Image(image) => GeminiPart::Inline {
                    inline_data: GeminiInlineData {
                        mime_type: image.mime_type.clone(),
                        data: image.data.clone(),
                    },
                },
            })
            .collect();

        GeminiRequest {
            contents: vec![GeminiContent { parts }],
            generation_config: Some(GeminiGenerationConfig {
                max_output_tokens: self.max_tokens,
                response_mime_type: request
                    .json_output
                    .then(|| "application/json".to_string()),
            }),
        }
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, request: &GenerationRequest) -> Result<String> {
        let body = self.build_request(request);

        debug!("Calling Gemini API with model: {}", self.model);

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", self.api_key.expose())
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            bail!("Gemini API error {}: {}", status, error_text);
        }

        let api_response: GeminiResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        let text: String = api_response
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            bail!("No content in Gemini response");
        }
        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// ============================================================================
// OpenAI Client
// ============================================================================

pub struct OpenAIClient {
    api_key: SecretString,
    model: String,
    base_url: String,
    max_tokens: u32,
    client: Client,
}

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: Vec<OpenAIContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OpenAIContentPart {
    Text { text: String },
    ImageUrl { image_url: OpenAIImageUrl },
}

#[derive(Debug, Serialize)]
struct OpenAIImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAIClient {
    pub fn new(api_key: String, model: String, max_tokens: u32, timeout_secs: u64) -> Result<Self> {
        Self::with_base_url(
            api_key,
            model,
            "https://api.openai.com/v1".to_string(),
            max_tokens,
            timeout_secs,
        )
    }

    pub fn with_base_url(
        api_key: String,
        model: String,
        base_url: String,
        max_tokens: u32,
        timeout_secs: u64,
    ) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_tokens,
            client: build_http_client(timeout_secs)?,
        })
    }

    fn build_request(&self, request: &GenerationRequest) -> OpenAIRequest {
        // GPT-5+ models use max_completion_tokens instead of max_tokens
        let (max_tokens, max_completion_tokens) = if self.model.starts_with("gpt-5") {
            (None, Some(self.max_tokens))
        } else {
            (Some(self.max_tokens), None)
        };

        let content = request
            .parts
            .iter()
            .map(|part| match part {
                RequestPart::Text(text) => OpenAIContentPart::Text { text: text.clone() },
                RequestPart::Image(image) => OpenAIContentPart::ImageUrl {
                    image_url: OpenAIImageUrl {
                        url: format!("data:{};base64,{}", image.mime_type, image.data),
                    },
                },
            })
            .collect();

        OpenAIRequest {
            model: self.model.clone(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content,
            }],
            temperature: 0.7,
            max_tokens,
            max_completion_tokens,
            response_format: request
                .json_output
                .then(|| serde_json::json!({"type": "json_object"})),
        }
    }
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn complete(&self, request: &GenerationRequest) -> Result<String> {
        let body = self.build_request(request);

        debug!(
            "Calling OpenAI-compatible API at {} with model: {}",
            self.base_url, self.model
        );

        let url = format!("{}/chat/completions", self.base_url);

        let mut req = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&body);

        // Only add authorization if API key is not empty
        if !self.api_key.expose().is_empty() && self.api_key.expose().to_lowercase() != "none" {
            req = req.header("authorization", format!("Bearer {}", self.api_key.expose()));
        }

        let response = req
            .send()
            .await
            .context("Failed to send request to OpenAI API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            bail!("OpenAI API error {}: {}", status, error_text);
        }

        let api_response: OpenAIResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI API response")?;

        api_response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .context("No choices in OpenAI response")
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// ============================================================================
// Anthropic Client
// ============================================================================

pub struct AnthropicClient {
    api_key: SecretString,
    model: String,
    base_url: String,
    max_tokens: u32,
    client: Client,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: Vec<AnthropicBlock>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum AnthropicBlock {
    Image { source: AnthropicImageSource },
    Text { text: String },
}

#[derive(Debug, Serialize)]
struct AnthropicImageSource {
    #[serde(rename = "type")]
    source_type: String,
    media_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicClient {
    pub fn new(api_key: String, model: String, max_tokens: u32, timeout_secs: u64) -> Result<Self> {
        Self::with_base_url(
            api_key,
            model,
            "https://api.anthropic.com/v1".to_string(),
            max_tokens,
            timeout_secs,
        )
    }

    pub fn with_base_url(
        api_key: String,
        model: String,
        base_url: String,
        max_tokens: u32,
        timeout_secs: u64,
    ) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_tokens,
            client: build_http_client(timeout_secs)?,
        })
    }

    fn build_request(&self, request: &GenerationRequest) -> AnthropicRequest {
        // Images go first, as the Messages API recommends
        let mut content: Vec<AnthropicBlock> = Vec::with_capacity(request.parts.len());
        for part in &request.parts {
            if let RequestPart::Image(image) = part {
                content.push(AnthropicBlock::Image {
                    source: AnthropicImageSource {
                        source_type: "base64".to_string(),
                        media_type: image.mime_type.clone(),
                        data: image.data.clone(),
                    },
                });
            }
        }
        for part in &request.parts {
            if let RequestPart::Text(text) = part {
                content.push(AnthropicBlock::Text { text: text.clone() });
            }
        }

        AnthropicRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content,
            }],
        }
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, request: &GenerationRequest) -> Result<String> {
        let body = self.build_request(request);

        debug!("Calling Anthropic API with model: {}", self.model);

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", self.api_key.expose())
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Anthropic API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            bail!("Anthropic API error {}: {}", status, error_text);
        }

        let api_response: AnthropicResponse = response
            .json()
            .await
            .context("Failed to parse Anthropic API response")?;

        api_response
            .content
            .iter()
            .find_map(|c| c.text.clone())
            .context("No content in Anthropic response")
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::InlineImage;

    fn image_request() -> GenerationRequest {
        GenerationRequest::text("describe this")
            .with_image(InlineImage {
                mime_type: "image/png".to_string(),
                data: "iVBORw0KGgo=".to_string(),
            })
            .json()
    }

    #[test]
    fn test_gemini_client_creation() {
        let client =
            GeminiClient::new("test_key".to_string(), "gemini-pro".to_string(), 8192, 120).unwrap();
        assert_eq!(client.api_key.expose(), "test_key");
        assert_eq!(client.model, "gemini-pro");
        assert_eq!(client.base_url, GEMINI_BASE_URL);
    }

    #[test]
    fn test_gemini_request_carries_inline_image_and_json_mime() {
        let client =
            GeminiClient::new("k".to_string(), "gemini-pro".to_string(), 1024, 30).unwrap();
        let json = serde_json::to_value(client.build_request(&image_request())).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "describe this");
        assert_eq!(
            json["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "image/png"
        );
        assert_eq!(
            json["contents"][0]["parts"][1]["inlineData"]["data"],
            "iVBORw0KGgo="
        );
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1024);
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_gemini_request_without_json_omits_mime() {
        let client =
            GeminiClient::new("k".to_string(), "gemini-pro".to_string(), 1024, 30).unwrap();
        let json =
            serde_json::to_value(client.build_request(&GenerationRequest::text("hi"))).unwrap();
        assert!(json["generationConfig"].get("responseMimeType").is_none());
    }

    #[test]
    fn test_gemini_response_parsing() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Hello, "}, {"text": "world!"}]}}
            ]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.candidates[0].content.parts.len(), 2);
    }

    #[test]
    fn test_gemini_response_empty_candidates() {
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(response.candidates.is_empty());
        let response: GeminiResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(response.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_gemini_complete_against_fake_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-test:generateContent")
            .match_header("x-goog-api-key", "secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":1}"}]}}]}"#)
            .create_async()
            .await;

        let client = GeminiClient::with_base_url(
            "secret".to_string(),
            "gemini-test".to_string(),
            server.url(),
            1024,
            10,
        )
        .unwrap();
        let out = client
            .complete(&GenerationRequest::text("hi").json())
            .await
            .unwrap();
        assert_eq!(out, r#"{"a":1}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_gemini_complete_surfaces_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-test:generateContent")
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let client = GeminiClient::with_base_url(
            "secret".to_string(),
            "gemini-test".to_string(),
            server.url(),
            1024,
            10,
        )
        .unwrap();
        let err = client
            .complete(&GenerationRequest::text("hi"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Gemini API error 503"));
        assert!(err.to_string().contains("overloaded"));
    }

    #[tokio::test]
    async fn test_gemini_complete_rejects_empty_candidates() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-test:generateContent")
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let client = GeminiClient::with_base_url(
            "k".to_string(),
            "gemini-test".to_string(),
            server.url(),
            1024,
            10,
        )
        .unwrap();
        let err = client
            .complete(&GenerationRequest::text("hi"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No content"));
    }

    #[test]
    fn test_openai_client_with_custom_base_url() {
        let client = OpenAIClient::with_base_url(
            "test_key".to_string(),
            "llama3".to_string(),
            "http://localhost:11434/v1/".to_string(),
            16384,
            120,
        )
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:11434/v1");
    }

    #[test]
    fn test_openai_request_embeds_image_as_data_uri() {
        let client =
            OpenAIClient::new("k".to_string(), "gpt-4o".to_string(), 4096, 30).unwrap();
        let json = serde_json::to_value(client.build_request(&image_request())).unwrap();
        let content = &json["messages"][0]["content"];
        assert_eq!(content[0]["type"], "text");
        assert_eq!(content[1]["type"], "image_url");
        assert_eq!(
            content[1]["image_url"]["url"],
            "data:image/png;base64,iVBORw0KGgo="
        );
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["max_tokens"], 4096);
    }

    #[test]
    fn test_openai_request_gpt5_uses_max_completion_tokens() {
        let client =
            OpenAIClient::new("k".to_string(), "gpt-5-turbo".to_string(), 4096, 30).unwrap();
        let json =
            serde_json::to_value(client.build_request(&GenerationRequest::text("t"))).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert_eq!(json["max_completion_tokens"], 4096);
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn test_openai_response_parsing() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": "Hello"}}]}"#;
        let response: OpenAIResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_anthropic_request_puts_images_first() {
        let client =
            AnthropicClient::new("k".to_string(), "claude-3".to_string(), 4096, 30).unwrap();
        let json = serde_json::to_value(client.build_request(&image_request())).unwrap();
        let content = &json["messages"][0]["content"];
        assert_eq!(content[0]["type"], "image");
        assert_eq!(content[0]["source"]["type"], "base64");
        assert_eq!(content[0]["source"]["media_type"], "image/png");
        assert_eq!(content[1]["type"], "text");
        assert_eq!(content[1]["text"], "describe this");
    }

    #[test]
    fn test_anthropic_response_parsing() {
        let json = r#"{"content": [{"type": "text", "text": "Hello, world!"}]}"#;
        let response: AnthropicResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.content[0].text.as_deref(), Some("Hello, world!"));
    }
}
