//! 统一错误处理
//!
//! 错误类型与响应结构定义在 `shared::error`，这里重新导出并提供
//! handler 使用的响应构造函数。
//!
//! 所有接口都返回同一个信封 `{success, code, message, data}`，
//! 失败时同样如此。
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回成功响应
//! ok_with_message(view, "User created successfully")
//!
//! // 返回错误响应
//! fail(AppError::new(ErrorCode::EmployeeNotFound))
//! ```

use axum::Json;
use serde::Serialize;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success_with_message(message, data))
}

/// Create a failure response, logging system errors
pub fn fail<T: Serialize>(err: AppError) -> Json<ApiResponse<T>> {
    if err.code.is_system() {
        tracing::error!(code = %err.code, message = %err.message, "System error occurred");
    }
    Json(ApiResponse::from(err))
}
