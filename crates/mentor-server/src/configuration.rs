use crate::error::{to_env_var, ConfigError};
use config::{Config, Environment};
use mentor::providers::configs::{GeminiProviderConfig, GEMINI_HOST, GEMINI_MODEL};
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Default, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Failed to parse socket address")
    }
}

/// A declared ceiling only: nothing in the request path enforces it
#[derive(Debug, Deserialize)]
pub struct RateLimitSettings {
    #[serde(default = "default_rate_window_secs")]
    pub window_secs: u64,
    #[serde(default = "default_rate_max_requests")]
    pub max_requests: u32,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            window_secs: default_rate_window_secs(),
            max_requests: default_rate_max_requests(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_provider_host")]
    pub host: String,
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<i32>,
}

impl ProviderSettings {
    // Convert to the mentor provider config
    pub fn into_config(self) -> GeminiProviderConfig {
        GeminiProviderConfig {
            host: self.host,
            api_key: self.api_key,
            model: self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
    pub provider: ProviderSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_and_validate()
    }

    fn load_and_validate() -> Result<Self, ConfigError> {
        // Start with default configuration
        let config = Config::builder()
            // Server defaults
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            // Provider defaults
            .set_default("provider.host", default_provider_host())?
            .set_default("provider.model", default_model())?
            // Layer on the environment variables
            .add_source(
                Environment::with_prefix("MENTOR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let result: Result<Self, config::ConfigError> = config.try_deserialize();

        // Handle missing field errors specially so the operator is told
        // which environment variable to set
        match result {
            Ok(settings) => Ok(settings),
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);

                let error_str = err.to_string();
                if error_str.starts_with("missing field") {
                    // Extract field name from error message "missing field `api_key`"
                    let field = error_str
                        .trim_start_matches("missing field `")
                        .trim_end_matches("`");
                    let env_var = to_env_var(field);
                    Err(ConfigError::MissingEnvVar { env_var })
                } else if let config::ConfigError::NotFound(field) = &err {
                    let env_var = to_env_var(field);
                    Err(ConfigError::MissingEnvVar { env_var })
                } else {
                    Err(ConfigError::Other(err))
                }
            }
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_model() -> String {
    GEMINI_MODEL.to_string()
}

fn default_provider_host() -> String {
    GEMINI_HOST.to_string()
}

fn default_rate_window_secs() -> u64 {
    900
}

fn default_rate_max_requests() -> u32 {
    100
}
