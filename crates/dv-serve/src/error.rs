use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors surfaced by the sync endpoints.
///
/// The `Display` form of a variant is exactly the response body the client
/// sees; nothing beyond the message leaks out.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// Malformed, missing, or unknown request fields. Never retried; the
    /// client must fix the request.
    #[error("{0}")]
    BadRequest(String),

    /// Transport-level misuse: the endpoint only speaks POST.
    #[error("Unsupported method: {0}")]
    MethodNotAllowed(String),

    /// The endpoint is not enabled (inject with injection disabled).
    #[error("not found")]
    NotFound,

    /// Commit log / content store failure. Fatal for this request only;
    /// the log's head is unchanged, so a retry is safe.
    #[error("db error: {0}")]
    Db(#[from] dv_db::DbError),

    /// Configuration could not be loaded or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error from the listener.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias for serve operations.
pub type ServeResult<T> = Result<T, ServeError>;

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Db(_) | Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}
