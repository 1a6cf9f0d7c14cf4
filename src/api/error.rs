use thiserror::Error;

/// Why a request did not produce a usable response.
///
/// Only the `Display` text reaches the UI side, so keep it readable.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS, TLS, timeout...
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("server replied {status}: {message}")]
    Status { status: u16, message: String },

    /// The body was not valid JSON.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("could not encode request body: {0}")]
    Encode(String),

    /// Transport-level failure that did not come from reqwest.
    #[error("{0}")]
    Other(String),
}

pub type ApiResult<T> = Result<T, ApiError>;
