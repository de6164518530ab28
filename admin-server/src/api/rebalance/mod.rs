//! Rebalance API Module
//!
//! Exposes rebalance jobs that exhausted their retries.

use axum::{Json, Router, extract::State, routing::get};
use shared::models::DeadLetter;

use crate::core::ServerState;
use crate::utils::{ApiResponse, ok_with_message};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/rebalance/dead-letters", get(dead_letters))
}

/// Oldest first
pub async fn dead_letters(State(state): State<ServerState>) -> Json<ApiResponse<Vec<DeadLetter>>> {
    let letters = state.dead_letters.snapshot();
    let message = format!("{} dead-lettered rebalance jobs", letters.len());
    ok_with_message(letters, message)
}
