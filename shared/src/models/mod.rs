//! Data models
//!
//! Shared between the admin server and its API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod dashboard;
pub mod employee;
pub mod lab;
pub mod membership;
pub mod rebalance;

// Re-exports
pub use dashboard::*;
pub use employee::*;
pub use lab::*;
pub use membership::*;
pub use rebalance::*;
