use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// Base trait for hosted text-generation services
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate text for a single prompt. There is no retry or backoff
    /// at this layer; a failure here fails the caller's request.
    async fn generate(&self, prompt: &str) -> Result<(String, Usage)>;
}
