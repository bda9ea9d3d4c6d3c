use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A filesystem-level storage failure.
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The store file holds content that is not the expected JSON array.
    #[error("Storage corrupt: {0}")]
    Corrupt(String),

    /// Unknown email or wrong password; callers cannot tell which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Io(ref e) => {
                tracing::error!("Storage IO error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "File system error".to_string())
            }

            AppError::Corrupt(ref msg) => {
                tracing::error!("Storage corrupt: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
            }

            AppError::InvalidCredentials => {
                tracing::warn!("Authentication failed");
                (
                    StatusCode::UNAUTHORIZED,
                    "Usuario o contraseña incorrectos".to_string(),
                )
            }

            AppError::Validation(ref msg) => {
                tracing::debug!("Validation error: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }

            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = sonic_rs::to_string(&sonic_rs::json!({
            "error": message
        }))
        .unwrap_or_else(|_| r#"{"error":"Internal server error"}"#.to_string());

        (status, body).into_response()
    }
}
