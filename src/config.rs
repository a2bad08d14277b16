use std::env;

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub models: Vec<String>,
    pub api_url: String,
    pub temperature: f32,
}

impl ProviderConfig {
    pub fn from_env(provider: &str) -> Self {
        let prefix = provider.to_uppercase();

        // Get models from env or use defaults
        let models = env::var(format!("{}_MODELS", prefix))
            .map(|m| m.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| match provider {
                "gemini" => vec![
                    "gemini-2.0-flash".to_string(),
                    "gemini-1.5-flash-8b".to_string(),
                ],
                _ => vec![],
            });

        // Get API URL from env or use default
        let api_url = env::var(format!("{}_API_URL", prefix)).unwrap_or_else(|_| match provider {
            "gemini" => "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            _ => String::new(),
        });

        // Get temperature from env or use default
        let temperature = env::var(format!("{}_TEMPERATURE", prefix))
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(0.7);

        Self {
            models,
            api_url,
            temperature,
        }
    }

    pub fn default_model(&self) -> &str {
        self.models
            .first()
            .map(String::as_str)
            .unwrap_or("gemini-2.0-flash")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_defaults() {
        let config = ProviderConfig::from_env("gemini");
        assert_eq!(config.default_model(), "gemini-2.0-flash");
        assert!(config.api_url.contains("generativelanguage.googleapis.com"));
    }

    #[test]
    fn test_unknown_provider_is_empty() {
        let config = ProviderConfig::from_env("nope");
        assert!(config.models.is_empty());
        assert!(config.api_url.is_empty());
    }
}
