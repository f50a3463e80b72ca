use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;

use crate::providers::base::{Provider, Usage};

/// A mock provider that returns pre-configured responses for testing
pub struct MockProvider {
    responses: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new<S: Into<String>>(responses: Vec<S>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into_iter().map(Into::into).collect())),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn generate(&self, _prompt: &str) -> Result<(String, Usage)> {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Return empty text if no more pre-configured responses
            Ok((String::new(), Usage::default()))
        } else {
            Ok((responses.remove(0), Usage::default()))
        }
    }
}
