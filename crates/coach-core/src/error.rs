//! Error types for completion backends.

use thiserror::Error;

/// Errors that can occur while asking a backend for a completion.
#[derive(Debug, Error)]
pub enum CoachError {
    /// A required setting (usually the API credential) is missing.
    ///
    /// Raised before any network traffic.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with an error payload or a non-success status.
    #[error("api error: {0}")]
    Api(String),

    /// The endpoint answered, but not with anything we can read.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The backend is temporarily unavailable.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl CoachError {
    /// Whether this error was detected locally, before contacting the endpoint.
    pub fn is_configuration(&self) -> bool {
        matches!(self, CoachError::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_configuration() {
        assert!(CoachError::Configuration("OPENAI_API_KEY not set".into()).is_configuration());
        assert!(!CoachError::Network("refused".into()).is_configuration());
        assert!(!CoachError::Api("quota".into()).is_configuration());
    }

    #[test]
    fn test_display() {
        let err = CoachError::Api("invalid key".to_string());
        assert_eq!(err.to_string(), "api error: invalid key");
    }
}
