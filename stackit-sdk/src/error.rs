//! API error type

/// Errors returned by STACKIT API clients
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The API answered with a non-success HTTP status
    #[error("{method} {url}: status {status}: {body}")]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    /// The request could not be sent or the response could not be read
    #[error("http transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The client could not be built
    #[error("could not build the http client: {0}")]
    ClientBuilder(String),
}

impl ApiError {
    /// HTTP status of the response, if the API answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
