//! Admin Server - 会员管理机构的管理后台
//!
//! # 架构概述
//!
//! - **员工管理** (`employees`): 创建、分页、更新、删除员工账号
//! - **工作量重分配** (`employees::rebalancer`): 审批人离开时把其工作项转给负载最低的审批人
//! - **后台任务** (`core::tasks`): 重分配 worker，带重试和死信
//! - **仪表盘** (`dashboard`): 会员、员工、实验室统计
//! - **数据库** (`db`): SQLite (sqlx)
//! - **HTTP API** (`api`): axum 路由，统一响应信封
//!
//! # 模块结构
//!
//! ```text
//! admin-server/src/
//! ├── core/          # 配置、状态、错误、后台任务
//! ├── db/            # 连接池、迁移、store
//! ├── employees/     # 分页、重分配、员工服务
//! ├── dashboard/     # 仪表盘统计
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志、校验
//! ```

use anyhow::Context;

pub mod api;
pub mod core;
pub mod dashboard;
pub mod db;
pub mod employees;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{BackgroundTasks, Config, Server, ServerError, ServerState};
pub use employees::{EmployeeService, ServiceError, WorkloadRebalancer};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境
///
/// 1. 加载 `.env`
/// 2. 读取配置
/// 3. 创建工作目录 / 日志目录
/// 4. 初始化日志
pub fn setup_environment() -> crate::core::Result<Config> {
    dotenv::dotenv().ok();
    let config = Config::from_env();

    std::fs::create_dir_all(config.work_dir_path())
        .with_context(|| format!("Failed to create work dir {}", config.work_dir))?;
    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create log dir {dir}"))?;
    }

    init_logger_with_file(
        Some(&config.log_level),
        config.is_production(),
        config.log_dir.as_deref(),
    );
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ___       __          _
   /   | ____/ /___ ___  (_)___
  / /| |/ __  / __ `__ \/ / __ \
 / ___ / /_/ / / / / / / / / / /
/_/  |_\__,_/_/ /_/ /_/_/_/ /_/
    "#
    );
}
