//! REST 错误映射
//!
//! 所有已分类的错误都映射为 400 + `{"detail": ...}`，不暴露内部细节

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::{AppError, BusinessError};

/// REST 层错误
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

/// 请求体解析失败同样按 400 `{"detail"}` 返回
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(
            BusinessError::MalformedRequest {
                reason: rejection.body_text(),
            }
            .into(),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "detail": self.0.to_string() }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
