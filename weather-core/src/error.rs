use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the upstream weather service.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// Transport-level failure: timeout, refused connection, DNS, truncated body.
    /// The request URL is stripped since its query carries the API key.
    #[error("upstream unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("upstream returned status {status}")]
    NotFound { status: StatusCode },

    /// Upstream answered 2xx but the body is not what we expect.
    #[error("malformed upstream payload: {0}")]
    MalformedPayload(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unreachable(err.without_url())
    }
}

impl WeatherError {
    /// Message shown to the browser for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Unreachable(_) => "Failed to reach weather service",
            Self::NotFound { .. } => "City not found",
            Self::MalformedPayload(_) => "Unexpected response from weather service",
        }
    }
}
