use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

use super::base::{Provider, Usage};
use super::configs::GeminiProviderConfig;

/// Client for the Google Generative Language API
pub struct GeminiProvider {
    client: Client,
    config: GeminiProviderConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(GeminiProviderConfig::from_env()?)
    }

    fn get_usage(data: &Value) -> Usage {
        let metadata = data.get("usageMetadata");

        let input_tokens = metadata
            .and_then(|m| m.get("promptTokenCount"))
            .and_then(|v| v.as_i64())
            .map(|v| v as i32);

        let output_tokens = metadata
            .and_then(|m| m.get("candidatesTokenCount"))
            .and_then(|v| v.as_i64())
            .map(|v| v as i32);

        let total_tokens = metadata
            .and_then(|m| m.get("totalTokenCount"))
            .and_then(|v| v.as_i64())
            .map(|v| v as i32)
            .or_else(|| match (input_tokens, output_tokens) {
                (Some(input), Some(output)) => Some(input + output),
                _ => None,
            });

        Usage::new(input_tokens, output_tokens, total_tokens)
    }

    async fn post(&self, payload: Value) -> Result<Value> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.host.trim_end_matches('/'),
            self.config.model,
            self.config.api_key
        );

        let response = self.client.post(&url).json(&payload).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status if status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() >= 500 => {
                Err(anyhow!("Server error: {}", status))
            }
            status => Err(anyhow!("Request failed: {}", status)),
        }
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<(String, Usage)> {
        let mut payload = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        });

        // Optional generation parameters
        let mut generation_config = serde_json::Map::new();
        if let Some(temp) = self.config.temperature {
            generation_config.insert("temperature".to_string(), json!(temp));
        }
        if let Some(tokens) = self.config.max_tokens {
            generation_config.insert("maxOutputTokens".to_string(), json!(tokens));
        }
        if !generation_config.is_empty() {
            payload
                .as_object_mut()
                .expect("payload is an object")
                .insert("generationConfig".to_string(), Value::Object(generation_config));
        }

        let response = self.post(payload).await?;

        if let Some(error) = response.get("error") {
            return Err(anyhow!("Gemini API error: {}", error));
        }

        let parts = response
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
            .ok_or_else(|| anyhow!("No candidates in response"))?;

        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect::<Vec<_>>()
            .join("");

        let usage = Self::get_usage(&response);

        Ok((text, usage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup_mock_server(response_body: Value) -> (MockServer, GeminiProvider) {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_body))
            .mount(&mock_server)
            .await;

        let config = GeminiProviderConfig::new(
            mock_server.uri(),
            "test_api_key".to_string(),
            "gemini-1.5-flash".to_string(),
        );
        let provider = GeminiProvider::new(config).unwrap();
        (mock_server, provider)
    }

    #[tokio::test]
    async fn test_generate_basic() -> Result<()> {
        let response_body = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "Math Agent: 2 + 2 = 4" }]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 12,
                "candidatesTokenCount": 9,
                "totalTokenCount": 21
            }
        });

        let (_, provider) = setup_mock_server(response_body).await;

        let (text, usage) = provider.generate("What is 2 + 2?").await?;

        assert_eq!(text, "Math Agent: 2 + 2 = 4");
        assert_eq!(usage.input_tokens, Some(12));
        assert_eq!(usage.output_tokens, Some(9));
        assert_eq!(usage.total_tokens, Some(21));

        Ok(())
    }

    #[tokio::test]
    async fn test_generate_joins_multiple_parts() -> Result<()> {
        let response_body = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "Hello" }, { "text": " world" }]
                }
            }]
        });

        let (_, provider) = setup_mock_server(response_body).await;
        let (text, usage) = provider.generate("hi").await?;

        assert_eq!(text, "Hello world");
        assert_eq!(usage.total_tokens, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_generate_api_error() {
        let response_body = json!({
            "error": { "code": 400, "message": "API key not valid" }
        });

        let (_, provider) = setup_mock_server(response_body).await;
        let err = provider.generate("hi").await.unwrap_err();
        assert!(err.to_string().contains("Gemini API error"));
    }

    #[tokio::test]
    async fn test_generate_server_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let config = GeminiProviderConfig::new(
            mock_server.uri(),
            "test_api_key".to_string(),
            "gemini-1.5-flash".to_string(),
        );
        let provider = GeminiProvider::new(config).unwrap();

        let err = provider.generate("hi").await.unwrap_err();
        assert!(err.to_string().contains("Server error"));
    }
}
