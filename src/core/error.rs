//! 核心错误处理模块

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// 返回给调用方的通用内部错误信息，不暴露内部细节
pub const INTERNAL_ERROR_MESSAGE: &str = "服务器内部错误";

/// 核心错误类型
#[derive(Debug, Error)]
pub enum CoreError {
    /// 请求参数或请求体不合法 (400)
    #[error("{0}")]
    BadRequest(String),
    /// 资源不存在 (404)
    #[error("{0}")]
    NotFound(String),
    /// 处理请求时发生的意外错误 (500)，详情只写入日志
    #[error("内部错误: {0}")]
    Internal(String),
}

/// 错误响应结构
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// 500 响应体
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_SERVER_ERROR",
            INTERNAL_ERROR_MESSAGE,
        )
    }
}

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            CoreError::BadRequest(msg) => ErrorResponse::new(status, "BAD_REQUEST", msg),
            CoreError::NotFound(msg) => ErrorResponse::new(status, "NOT_FOUND", msg),
            CoreError::Internal(detail) => {
                error!("请求处理失败: {}", detail);
                ErrorResponse::internal()
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for CoreError {
    fn from(rejection: JsonRejection) -> Self {
        CoreError::BadRequest(format!("请求体无效: {}", rejection.body_text()))
    }
}
