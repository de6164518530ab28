//! Shared types for the membership admin backend
//!
//! Data models, error codes and the uniform response envelope used by the
//! admin server and its API clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
