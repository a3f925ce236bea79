//! Error taxonomy shared by all handlers.
//!
//! Every handler-level failure renders as a JSON body with an `error` key;
//! infrastructure failures are logged and surface as a generic 500.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid credentials")]
    AuthenticationFailed,

    #[error("admin_required")]
    AdminRequired,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("invalid upload")]
    Multipart(#[from] actix_multipart::MultipartError),

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("storage error")]
    Io(#[from] std::io::Error),

    #[error("token error")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            ApiError::AdminRequired => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) | ApiError::Io(_) | ApiError::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("request failed: {self:?}");
            return HttpResponse::build(status).json(json!({ "error": "internal error" }));
        }
        HttpResponse::build(status).json(json!({ "error": self.to_string() }))
    }
}
