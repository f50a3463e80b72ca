use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {env_var}")]
    MissingEnvVar { env_var: String },

    #[error(transparent)]
    Other(#[from] config::ConfigError),
}

/// Map a settings field reported missing during deserialization to the
/// environment variable that supplies it.
pub fn to_env_var(field: &str) -> String {
    match field {
        // The provider table only has one required field
        "api_key" | "provider" => "MENTOR_PROVIDER__API_KEY".to_string(),
        other => format!("MENTOR_{}", other.replace('.', "__").to_uppercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_env_var() {
        assert_eq!(to_env_var("api_key"), "MENTOR_PROVIDER__API_KEY");
        assert_eq!(to_env_var("server.port"), "MENTOR_SERVER__PORT");
    }
}
