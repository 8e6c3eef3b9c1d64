use thiserror::Error;

#[derive(Error, Debug)]
pub enum TtsError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Server overloaded (HTTP 503): {message}")]
    ServerOverloaded { message: String },

    #[error("API error{}: {message}", status_code.map(|c| format!(" (HTTP {})", c)).unwrap_or_default())]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Malformed synthesis response: {0}")]
    MalformedResponse(String),
}

pub type Result<T> = std::result::Result<T, TtsError>;
