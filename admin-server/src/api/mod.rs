//! API 路由模块
//!
//! Thin transport over the services: every handler answers with the
//! `{success, code, message, data}` envelope.
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`employees`] - 员工管理接口
//! - [`dashboard`] - 仪表盘统计
//! - [`rebalance`] - 重分配死信查询

pub mod dashboard;
pub mod employees;
pub mod health;
pub mod rebalance;

use axum::Router;
use http::HeaderName;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build a router with all routes registered (no middleware, no state)
pub fn routes() -> Router<ServerState> {
    Router::new()
        .merge(employees::router())
        .merge(dashboard::router())
        .merge(rebalance::router())
        .merge(health::router())
}

/// Build the fully configured application with middleware and state
pub fn build_router(state: ServerState) -> Router {
    routes()
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            MakeRequestUuid,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::db::DbService;
    use crate::utils::ErrorCode;
    use axum::body::Body;
    use http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn app() -> Router {
        let db = DbService::in_memory().await.unwrap();
        let config = Config::with_overrides("./target/test-data", 0);
        build_router(ServerState::with_inline_rebalance(config, db))
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Value {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn employee(name: &str, phone: &str) -> Value {
        json!({
            "email": format!("{name}@Example.com"),
            "name": name,
            "phone": phone,
            "designation": "employee",
            "typeOfUser": "approver",
        })
    }

    #[tokio::test]
    async fn test_employee_lifecycle_over_http() {
        let app = app().await;

        let created = call(&app, "POST", "/api/employees", Some(employee("asha", "9000000001"))).await;
        assert_eq!(created["success"], true);
        assert_eq!(created["message"], "User created successfully");
        assert_eq!(created["data"]["email"], "asha@example.com");
        let id = created["data"]["id"].as_i64().unwrap();

        let listed = call(&app, "GET", "/api/employees?page=1&limit=10", None).await;
        assert_eq!(listed["message"], "All Employees");
        assert_eq!(listed["data"]["totalDocuments"], 1);
        assert!(listed["data"]["items"][0].get("hashPass").is_none());

        let updated = call(
            &app,
            "PUT",
            "/api/employees",
            Some(json!({ "id": id, "name": "Asha K", "password": "s3cret!" })),
        )
        .await;
        assert_eq!(updated["success"], true);
        assert_eq!(updated["data"]["name"], "Asha K");

        let deleted = call(&app, "DELETE", "/api/employees/9000000001", None).await;
        assert_eq!(deleted["success"], true);
        assert_eq!(deleted["data"]["rebalance"]["mode"], "completed");
    }

    #[tokio::test]
    async fn test_failures_use_the_envelope() {
        let app = app().await;

        let missing = call(&app, "DELETE", "/api/employees/9999999999", None).await;
        assert_eq!(missing["success"], false);
        assert_eq!(missing["code"], u16::from(ErrorCode::EmployeeNotFound));

        let past_end = call(&app, "GET", "/api/employees?page=5&limit=10", None).await;
        assert_eq!(past_end["success"], false);
        assert_eq!(past_end["message"], "Reached the end of the employees data");

        let malformed = call(&app, "POST", "/api/employees", Some(json!({ "name": "x" }))).await;
        assert_eq!(malformed["success"], false);
        assert_eq!(malformed["code"], u16::from(ErrorCode::ValidationFailed));
    }

    #[tokio::test]
    async fn test_undecodable_phone_path_uses_the_envelope() {
        let app = app().await;

        let rejected = call(&app, "DELETE", "/api/employees/%FF", None).await;
        assert_eq!(rejected["success"], false);
        assert_eq!(rejected["code"], u16::from(ErrorCode::ValidationFailed));
        assert!(rejected.get("data").is_none());
    }

    #[tokio::test]
    async fn test_dashboard_and_dead_letters() {
        let app = app().await;

        let dashboard = call(&app, "GET", "/api/dashboard", None).await;
        assert_eq!(dashboard["success"], true);
        assert_eq!(dashboard["data"]["labData"].as_array().unwrap().len(), 6);

        let letters = call(&app, "GET", "/api/rebalance/dead-letters", None).await;
        assert_eq!(letters["data"], json!([]));

        let health = call(&app, "GET", "/health", None).await;
        assert_eq!(health["status"], "ok");
    }
}
