//! Server Implementation
//!
//! HTTP 服务器启动和管理

use crate::api;
use crate::core::tasks::BackgroundTasks;
use crate::core::{Config, Result, ServerState};
use std::net::SocketAddr;

/// HTTP Server
pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Initialize state, then serve until Ctrl+C
    pub async fn run(&self) -> Result<()> {
        let (state, tasks) = ServerState::initialize(&self.config).await?;
        self.serve(state, tasks).await
    }

    /// Serve an already built state; `tasks` are shut down after the
    /// listener stops
    pub async fn serve(&self, state: ServerState, tasks: BackgroundTasks) -> Result<()> {
        let app = api::build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Admin server listening on {}", addr);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        let exited = tasks.finished();
        if !exited.is_empty() {
            tracing::warn!(tasks = ?exited, "Background tasks had already exited");
        }
        tasks.shutdown().await;
        served?;
        Ok(())
    }
}
