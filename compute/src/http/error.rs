use std::fmt;

use crate::http::operations::OperationError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An error returned from a Google Cloud API.
    #[error(transparent)]
    Response(#[from] ErrorResponse),

    /// An error from the underlying HTTP client.
    #[error(transparent)]
    HttpClient(#[from] reqwest::Error),

    /// An error from one of the middleware used.
    #[error(transparent)]
    HttpMiddleware(anyhow::Error),

    /// An error from a token source.
    #[error("token source failed: {0}")]
    TokenSource(Box<dyn std::error::Error + Send + Sync>),

    /// The response body could not be decoded.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A long-running operation finished with errors.
    #[error("operation {0} failed: {1}")]
    Operation(String, OperationError),

    /// A long-running operation that is not done and can not be polled.
    #[error("operation can not be polled: {0}")]
    InvalidOperation(String),
}

impl From<reqwest_middleware::Error> for Error {
    fn from(error: reqwest_middleware::Error) -> Self {
        match error {
            reqwest_middleware::Error::Middleware(err) => Error::HttpMiddleware(err),
            reqwest_middleware::Error::Reqwest(err) => Error::HttpClient(err),
        }
    }
}

impl Error {
    /// Returns `true` when the server rejected a write because the resource changed since it was
    /// read, e.g. a `setIamPolicy` carrying a stale etag.
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Response(e) => e.is_conflict(),
            Error::HttpClient(e) => e
                .status()
                .map(|s| s == reqwest::StatusCode::CONFLICT || s == reqwest::StatusCode::PRECONDITION_FAILED)
                .unwrap_or(false),
            _ => false,
        }
    }
}

/// An error response returned from a Google Cloud JSON API.
///
/// See the [`error model`][1] documentation for more details.
///
/// [1]: https://cloud.google.com/apis/design/errors#http_mapping
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// An HTTP status value, without the textual description.
    ///
    /// Example values include: `400` (Bad Request), `403` (Forbidden), and `409` (Conflict).
    pub code: u16,

    /// Description of the error.
    pub message: String,

    /// The canonical status name, e.g. `ALREADY_EXISTS` or `ABORTED`.
    pub status: Option<String>,

    /// A container for the error details.
    #[serde(default)]
    pub errors: Vec<ErrorResponseItem>,
}

impl ErrorResponse {
    pub fn is_conflict(&self) -> bool {
        matches!(self.code, 409 | 412)
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.status {
            Some(status) => write!(f, "{} ({} {})", self.message, self.code, status),
            None => write!(f, "{} ({})", self.message, self.code),
        }
    }
}

impl std::error::Error for ErrorResponse {}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseItem {
    /// Example values include `global` and `usageLimits`.
    pub domain: Option<String>,

    /// Example values include `alreadyExists`, `notFound` and `forbidden`.
    pub reason: Option<String>,

    pub message: Option<String>,
}

/// The error response JSON format contains an extra object level that is inconvenient to include
/// in our error.
#[derive(serde::Deserialize)]
pub(crate) struct ErrorWrapper {
    pub(crate) error: ErrorResponse,
}
