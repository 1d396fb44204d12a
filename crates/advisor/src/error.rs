use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Advisor request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Advisor API returned an error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to decode the advisor response: {0}")]
    Deserialization(String),

    #[error("The model returned no candidates")]
    EmptyResponse,

    #[error("Advisor is not configured. Missing API key.")]
    NotConfigured,
}
