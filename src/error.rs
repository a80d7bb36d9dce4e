//! Typed errors and HTTP mapping.

use crate::config::codemsg;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing setting: {0}")]
    MissingSetting(&'static str),
    #[error("invalid setting {name}: {value}")]
    InvalidSetting { name: &'static str, value: String },
    #[error("duplicate permission: {module}/{name}")]
    DuplicatePermission { module: String, name: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("student {0} not found")]
    StudentNotFound(i32),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("missing authorization token")]
    Unauthorized,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("token expired")]
    TokenExpired,
    #[error("permission denied: {0}")]
    Forbidden(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    /// HTTP status, message code and kind for this error.
    pub fn classify(&self) -> (StatusCode, u32, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, codemsg::UNKNOWN, "config_error"),
            AppError::StudentNotFound(_) => (StatusCode::NOT_FOUND, codemsg::STUDENT_NOT_FOUND, "not_found"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, codemsg::NOT_FOUND, "not_found"),
            AppError::Validation(_) | AppError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, codemsg::PARAMETER_ERROR, "parameter_error")
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, codemsg::UNAUTHORIZED, "unauthorized"),
            AppError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, codemsg::INVALID_TOKEN, "invalid_token"),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, codemsg::TOKEN_EXPIRED, "token_expired"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, codemsg::FORBIDDEN, "forbidden"),
            AppError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, codemsg::UNKNOWN, "database_error"),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    pub code: u32,
    pub kind: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, kind) = self.classify();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        // Internal details stay in the log.
        let message = if status.is_server_error() {
            codemsg::default_message(code).to_string()
        } else {
            self.to_string()
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code,
                kind: kind.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_not_found_maps_to_404_with_domain_code() {
        let (status, code, kind) = AppError::StudentNotFound(7).classify();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, codemsg::STUDENT_NOT_FOUND);
        assert_eq!(kind, "not_found");
    }

    #[test]
    fn auth_failures_are_distinguished() {
        assert_eq!(AppError::Unauthorized.classify().0, StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::TokenExpired.classify().1, codemsg::TOKEN_EXPIRED);
        assert_eq!(AppError::Forbidden("x".into()).classify().0, StatusCode::FORBIDDEN);
    }

    #[test]
    fn database_errors_hide_details() {
        let response = AppError::Db(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
