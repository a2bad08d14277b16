use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuggestionError {
    #[error("AI service is not configured: no API key is available")]
    ServiceUnavailable,
    #[error("{operation} request failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },
    #[error("AI response was not valid JSON: {0}")]
    MalformedResponse(String),
    #[error("AI response did not match the expected {0} structure")]
    UnexpectedShape(&'static str),
}
