use thiserror::Error;

/// Failure of a call to the search or history service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The search succeeded but returned no place.
    #[error("place not found")]
    NotFound,

    #[error("server error {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Server { status: u16, message: Option<String> },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}
