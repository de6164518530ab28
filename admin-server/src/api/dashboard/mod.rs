//! Dashboard API Module

use axum::{Json, Router, extract::State, routing::get};
use shared::models::DashboardSnapshot;

use crate::core::ServerState;
use crate::utils::{ApiResponse, fail, ok_with_message};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/dashboard", get(snapshot))
}

/// Aggregate counters
pub async fn snapshot(State(state): State<ServerState>) -> Json<ApiResponse<DashboardSnapshot>> {
    match state.dashboard.snapshot().await {
        Ok(snapshot) => ok_with_message(snapshot, "Dashboard data"),
        Err(e) => fail(e.into()),
    }
}
