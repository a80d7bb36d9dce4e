//! Success envelope for write operations.

use crate::config::CodeMessages;
use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessBody {
    pub code: u32,
    pub message: String,
}

/// 201 with the message code and its configured text. No resource is echoed.
pub fn success(codes: &CodeMessages, code: u32) -> (StatusCode, Json<SuccessBody>) {
    (
        StatusCode::CREATED,
        Json(SuccessBody {
            code,
            message: codes.message(code).to_string(),
        }),
    )
}
