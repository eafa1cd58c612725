use lambda_http::http::StatusCode;
use thiserror::Error;

/// Failures surfaced by the link shortener and the HTTP handlers built on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{0} is a required field")]
    MissingField(String),
    #[error("Unsupported http method {0}")]
    UnsupportedMethod(String),
    #[error("Invalid URL {0:?}: control characters are not allowed")]
    InvalidUrl(String),
    #[error("Failed to create a unique short key after {0} attempts")]
    CollisionExhausted(u32),
    #[error("Short key '{0}' not found")]
    RecordNotFound(String),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Stored record for '{0}' cannot be served")]
    CorruptRecord(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::MissingField(_)
            | ServiceError::UnsupportedMethod(_)
            | ServiceError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            ServiceError::RecordNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::CollisionExhausted(_)
            | ServiceError::StoreUnavailable(_)
            | ServiceError::CorruptRecord(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
