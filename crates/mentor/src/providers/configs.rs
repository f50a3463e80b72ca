use anyhow::{anyhow, Result};

pub const GEMINI_HOST: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Configuration for the Google Generative Language API client
#[derive(Debug, Clone)]
pub struct GeminiProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
}

impl GeminiProviderConfig {
    pub fn new(host: String, api_key: String, model: String) -> Self {
        Self {
            host,
            api_key,
            model,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Build a config from environment variables. A missing API key is
    /// a configuration error and fails here rather than per request.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow!("GEMINI_API_KEY environment variable is required"))?;
        let host = std::env::var("GEMINI_HOST").unwrap_or_else(|_| GEMINI_HOST.to_string());
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| GEMINI_MODEL.to_string());
        Ok(Self::new(host, api_key, model))
    }
}
