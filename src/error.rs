use http::StatusCode;
use thiserror::Error;
use tracing::error;

pub type Result<T> = std::result::Result<T, Error>;

pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong. Please try again later.";

/// A non-2xx answer from the backend.
///
/// The body is kept as raw bytes and only parsed when somebody asks for it.
#[derive(Debug, Clone)]
pub struct ResponseError {
    pub status: StatusCode,
    pub url: String,
    body: Vec<u8>,
}

impl ResponseError {
    pub fn new(status: StatusCode, url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            status,
            url: url.into(),
            body,
        }
    }

    pub fn raw_body(&self) -> &[u8] {
        &self.body
    }

    /// Parses the error body as JSON. Returns `None` if it isn't JSON.
    pub fn body_json(&self) -> Option<serde_json::Value> {
        match serde_json::from_slice(&self.body) {
            Ok(value) => Some(value),
            Err(e) => {
                error!(
                    error = %e,
                    status = self.status.as_u16(),
                    url = %self.url,
                    "Error parsing response body"
                );
                None
            }
        }
    }
}

impl std::fmt::Display for ResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Request failed with status: {}", self.status.as_u16())
    }
}

impl std::error::Error for ResponseError {}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Response(ResponseError),

    #[error("Something went wrong. Please try again later.")]
    ServerError,

    #[error("Network Error: Please check your network connection")]
    Network(#[source] rquest::Error),

    #[error("Vendor not found")]
    VendorNotFound,

    #[error("HTTP error: {0}")]
    Http(#[from] rquest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid header {name}: {value}")]
    InvalidHeader { name: String, value: String },

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl Error {
    /// HTTP status of the failed request, when the backend answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Response(e) => Some(e.status),
            Error::ServerError => Some(StatusCode::INTERNAL_SERVER_ERROR),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}
