//! Employee API Handlers

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use shared::models::{
    EmployeeCreate, EmployeeDelete, EmployeeDeletion, EmployeeListQuery, EmployeePage,
    EmployeeUpdate, EmployeeView,
};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppError, fail, ok_with_message};

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<EmployeeCreate>, JsonRejection>,
) -> Json<ApiResponse<EmployeeView>> {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(e) => return fail(AppError::validation(e.body_text())),
    };
    match state.employees.create(payload).await {
        Ok(employee) => ok_with_message(employee, "User created successfully"),
        Err(e) => fail(e.into()),
    }
}

/// List employees, most recently updated first
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<EmployeeListQuery>, QueryRejection>,
) -> Json<ApiResponse<EmployeePage>> {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return fail(AppError::validation(e.body_text())),
    };
    match state.employees.list(query).await {
        Ok(page) => ok_with_message(page, "All Employees"),
        Err(e) => fail(e.into()),
    }
}

/// Update name and/or password of an employee
pub async fn update(
    State(state): State<ServerState>,
    payload: Result<Json<EmployeeUpdate>, JsonRejection>,
) -> Json<ApiResponse<EmployeeView>> {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(e) => return fail(AppError::validation(e.body_text())),
    };
    match state.employees.update(payload).await {
        Ok(employee) => ok_with_message(employee, "User updated successfully"),
        Err(e) => fail(e.into()),
    }
}

/// Delete an employee by phone; its work items are rebalanced
pub async fn delete(
    State(state): State<ServerState>,
    phone: Result<Path<String>, PathRejection>,
) -> Json<ApiResponse<EmployeeDeletion>> {
    let Path(phone) = match phone {
        Ok(p) => p,
        Err(e) => return fail(AppError::validation(e.body_text())),
    };
    match state.employees.delete(EmployeeDelete { phone }).await {
        Ok(deletion) => ok_with_message(deletion, "Employee deleted successfully"),
        Err(e) => fail(e.into()),
    }
}
