use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] provec::PipelineError),

    #[error("Intake error: {0}")]
    Intake(#[from] intake::IntakeError),

    #[error("Vectorizer error: {0}")]
    Vectorizer(#[from] vectorizer::VectorizerError),

    #[error("Index error: {0}")]
    Index(#[from] index::IndexError),

    #[error("Match error: {0}")]
    Match(#[from] matcher::MatchError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ServerError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            // The caller layer promotes an all-zero profile vector into a
            // user-visible rejection.
            ServerError::Match(matcher::MatchError::InsufficientSignal) => StatusCode::BAD_REQUEST,
            ServerError::Match(matcher::MatchError::InvalidConfig(_)) => StatusCode::BAD_REQUEST,
            ServerError::Match(matcher::MatchError::Intake(err)) | ServerError::Intake(err) => {
                StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::BAD_REQUEST)
            }
            ServerError::Match(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Pipeline(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Vectorizer(_) | ServerError::Index(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServerError::Internal(_) | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::Authentication(_) => "AUTH_FAILED",
            ServerError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::Match(matcher::MatchError::InsufficientSignal) => "INSUFFICIENT_SIGNAL",
            ServerError::Match(_) => "MATCH_ERROR",
            ServerError::Pipeline(_) => "PIPELINE_ERROR",
            ServerError::Intake(_) => "INTAKE_ERROR",
            ServerError::Vectorizer(_) => "EMBEDDING_ERROR",
            ServerError::Index(_) => "INDEX_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code().to_string();
        let message = self.to_string();

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(err: std::net::AddrParseError) -> Self {
        ServerError::Config(format!("Invalid address: {err}"))
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {err}"))
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::BadRequest(format!("JSON parse error: {err}"))
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}
