use crate::error::AdvisorError;
use crate::responses::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};
use crate::AdvisoryService;
use async_trait::async_trait;
use configuration::AdvisorConfig;
use reqwest::Client;

/// A client for the Gemini `generateContent` endpoint.
pub struct GeminiAdvisor {
    client: Client,
    url: String,
    api_key: String,
    temperature: f64,
}

impl GeminiAdvisor {
    /// Creates a new `GeminiAdvisor`.
    ///
    /// Returns `None` if no API key is configured, allowing the caller to
    /// fall back to the static advice text instead of failing.
    pub fn new(config: &AdvisorConfig) -> Option<Self> {
        let Some(api_key) = config.resolve_api_key() else {
            tracing::warn!(
                env = %config.api_key_env,
                "AI advisor is not configured (missing API key)."
            );
            return None;
        };
        Some(Self {
            client: Client::new(),
            url: format!(
                "{}/models/{}:generateContent",
                config.endpoint.trim_end_matches('/'),
                config.model
            ),
            api_key,
            temperature: config.temperature,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AdvisoryService for GeminiAdvisor {
    async fn generate(&self, prompt: &str) -> Result<String, AdvisorError> {
        let payload = GenerateContentRequest::single_turn(prompt, self.temperature);

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(AdvisorError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| AdvisorError::Deserialization(e.to_string()))?;
        body.text().ok_or(AdvisorError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_key_disables_the_client() {
        let config = AdvisorConfig {
            api_key: None,
            api_key_env: "FINANCEPRO_TEST_MISSING_GEMINI_KEY".to_string(),
            ..AdvisorConfig::default()
        };
        assert!(GeminiAdvisor::new(&config).is_none());
    }

    #[test]
    fn url_is_built_from_endpoint_and_model() {
        let config = AdvisorConfig {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: Some("test-key".to_string()),
            ..AdvisorConfig::default()
        };
        let advisor = GeminiAdvisor::new(&config).unwrap();
        assert_eq!(
            advisor.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
