//! Error codes and the response envelope shared by every endpoint
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::validation("\"phone\" is required");
//! let response = ApiResponse::<()>::from(err);
//! assert!(!response.success);
//! assert_eq!(response.code, ErrorCode::ValidationFailed.code());
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
