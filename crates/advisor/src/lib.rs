//! # FinancePro AI Advisor
//!
//! Turns a finished `FinancialSummary` into free-form business advice from a
//! generative model. The metrics path never depends on this crate: advice is
//! requested on demand and any failure degrades to a fixed message.

use crate::error::AdvisorError;
use analytics::FinancialSummary;
use async_trait::async_trait;
use configuration::AdvisorConfig;

pub mod error;
pub mod gemini;
pub mod prompt;
pub mod responses;

pub use gemini::GeminiAdvisor;
pub use prompt::build_prompt;

/// Shown when the model could not be reached or answered with an error.
pub const FALLBACK_MESSAGE: &str =
    "There was an error reaching the AI consultant. Please try again.";

/// Shown when the model answered but produced no text.
pub const EMPTY_ANSWER_MESSAGE: &str = "The AI could not process the analysis at this time.";

/// The generic interface for a text-generation backend.
///
/// This trait is the contract the advisor uses, allowing the underlying model
/// (Gemini or a mock) to be swapped out.
#[async_trait]
pub trait AdvisoryService: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AdvisorError>;
}

/// Produces advice text for a summary. Never fails.
pub struct FinancialAdvisor {
    service: Option<Box<dyn AdvisoryService>>,
}

impl FinancialAdvisor {
    pub fn new(service: Box<dyn AdvisoryService>) -> Self {
        Self {
            service: Some(service),
        }
    }

    /// An advisor backed by Gemini, or a disabled one when no key is set.
    pub fn from_config(config: &AdvisorConfig) -> Self {
        Self {
            service: GeminiAdvisor::new(config)
                .map(|g| Box::new(g) as Box<dyn AdvisoryService>),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.service.is_some()
    }

    /// Requests advice, surfacing errors to the caller.
    pub async fn try_advice(&self, summary: &FinancialSummary) -> Result<String, AdvisorError> {
        let service = self.service.as_ref().ok_or(AdvisorError::NotConfigured)?;
        let prompt = build_prompt(summary);
        tracing::info!(prompt_len = prompt.len(), "Requesting AI advice.");
        service.generate(&prompt).await
    }

    /// Requests advice, replacing any failure with a fixed human-readable message.
    pub async fn advice(&self, summary: &FinancialSummary) -> String {
        match self.try_advice(summary).await {
            Ok(text) if text.trim().is_empty() => EMPTY_ANSWER_MESSAGE.to_string(),
            Ok(text) => text,
            Err(AdvisorError::EmptyResponse) => EMPTY_ANSWER_MESSAGE.to_string(),
            Err(e) => {
                tracing::error!(error = ?e, "AI advice request failed.");
                FALLBACK_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    /// Replays a fixed answer and remembers the prompts it was given.
    struct MockService {
        answer: Option<String>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl AdvisoryService for MockService {
        async fn generate(&self, prompt: &str) -> Result<String, AdvisorError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.answer {
                Some(text) => Ok(text.clone()),
                None => Err(AdvisorError::ApiError {
                    status: 503,
                    message: "overloaded".to_string(),
                }),
            }
        }
    }

    fn advisor(answer: Option<&str>) -> (FinancialAdvisor, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let service = MockService {
            answer: answer.map(str::to_string),
            prompts: prompts.clone(),
        };
        (FinancialAdvisor::new(Box::new(service)), prompts)
    }

    fn summary() -> FinancialSummary {
        FinancialSummary {
            total_revenue: dec!(200),
            net_profit: dec!(120),
            ..FinancialSummary::new()
        }
    }

    #[tokio::test]
    async fn returns_the_model_answer() {
        let (advisor, prompts) = advisor(Some("**Keep going.**"));
        assert_eq!(advisor.advice(&summary()).await, "**Keep going.**");

        let prompts = prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("- Net profit: $120.00"));
    }

    #[tokio::test]
    async fn service_failure_becomes_the_fallback() {
        let (advisor, _) = advisor(None);
        assert_eq!(advisor.advice(&summary()).await, FALLBACK_MESSAGE);
        assert!(advisor.try_advice(&summary()).await.is_err());
    }

    #[tokio::test]
    async fn blank_answer_gets_its_own_message() {
        let (advisor, _) = advisor(Some("   \n"));
        assert_eq!(advisor.advice(&summary()).await, EMPTY_ANSWER_MESSAGE);
    }

    #[tokio::test]
    async fn unconfigured_advisor_falls_back() {
        let config = AdvisorConfig {
            api_key: None,
            api_key_env: "FINANCEPRO_TEST_MISSING_GEMINI_KEY".to_string(),
            ..AdvisorConfig::default()
        };
        let advisor = FinancialAdvisor::from_config(&config);
        assert!(!advisor.is_configured());
        assert!(matches!(
            advisor.try_advice(&summary()).await,
            Err(AdvisorError::NotConfigured)
        ));
        assert_eq!(advisor.advice(&summary()).await, FALLBACK_MESSAGE);
    }
}
