//! # API 统一错误处理
//!
//! 将下层各 crate 的错误类型统一映射到 HTTP 状态码与 JSON 响应体。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use stockwatch_core::directory::error::DirectoryError;
use stockwatch_market::DetailError;
use thiserror::Error;

use crate::types::ApiErrorResponse;

/// 代码目录不可用时对外展示的信息
pub const DIRECTORY_FAILURE_MESSAGE: &str = "Failed to fetch stocks";

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 资源未找到 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 服务端配置缺失 (500)，信息本身不含敏感值，可直接返回
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 代码目录上游失败 (500)
    #[error("Symbol directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            ApiError::DirectoryUnavailable(msg) => {
                // 上游细节只记录日志
                tracing::error!("API route error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    DIRECTORY_FAILURE_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(ApiErrorResponse::from_msg(message));
        (status, body).into_response()
    }
}

/// 从 `DirectoryError` 转换：配置缺失与上游故障分开报告
impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        if err.is_configuration() {
            ApiError::Configuration(err.to_string())
        } else {
            ApiError::DirectoryUnavailable(err.to_string())
        }
    }
}

/// 从 `DetailError` 转换
impl From<DetailError> for ApiError {
    fn from(err: DetailError) -> Self {
        ApiError::NotFound(err.to_string())
    }
}
