use anyhow::Context;
use std::sync::Arc;

use crate::core::tasks::BackgroundTasks;
use crate::core::{Config, Result};
use crate::dashboard::DashboardService;
use crate::db::DbService;
use crate::db::repository::{
    EmployeeStore, LabStore, MembershipStore, SqliteEmployeeStore, SqliteLabStore,
    SqliteMembershipStore,
};
use crate::employees::{
    Argon2Hasher, DeadLetters, EmployeeService, RebalanceMode, RebalanceQueue, RebalanceWorker,
    RetryPolicy,
};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc / Clone 句柄实现浅拷贝，可以直接作为 axum 的 State。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | SQLite 连接池 |
/// | employees | 员工生命周期服务 |
/// | dashboard | 仪表盘统计 |
/// | dead_letters | 放弃重试的重分配任务 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub employees: EmployeeService,
    pub dashboard: DashboardService,
    pub dead_letters: DeadLetters,
}

struct Stores {
    employees: Arc<dyn EmployeeStore>,
    memberships: Arc<dyn MembershipStore>,
    labs: Arc<dyn LabStore>,
}

impl Stores {
    fn sqlite(db: &DbService) -> Self {
        Self {
            employees: Arc::new(SqliteEmployeeStore::new(db.pool.clone())),
            memberships: Arc::new(SqliteMembershipStore::new(db.pool.clone())),
            labs: Arc::new(SqliteLabStore::new(db.pool.clone())),
        }
    }
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录
    /// 2. 数据库 (DATABASE_URL, 自动迁移)
    /// 3. 各服务 + 后台重分配 worker
    pub async fn initialize(config: &Config) -> Result<(Self, BackgroundTasks)> {
        std::fs::create_dir_all(config.work_dir_path())
            .with_context(|| format!("Failed to create work dir {}", config.work_dir))?;

        let db = DbService::new(&config.database_url).await?;

        let mut tasks = BackgroundTasks::new();
        let state = Self::with_background_rebalance(config.clone(), db, &mut tasks);
        tasks.log_summary();
        Ok((state, tasks))
    }

    /// Deletions queue their rebalancing; the worker is registered in `tasks`
    pub fn with_background_rebalance(
        config: Config,
        db: DbService,
        tasks: &mut BackgroundTasks,
    ) -> Self {
        let stores = Stores::sqlite(&db);
        let dead_letters = DeadLetters::new(config.dead_letter_capacity);
        let (queue, rx) =
            RebalanceQueue::channel(config.rebalance_queue_capacity, dead_letters.clone());

        let employees = EmployeeService::new(
            stores.employees.clone(),
            stores.memberships.clone(),
            Arc::new(Argon2Hasher),
            RebalanceMode::Background(queue),
        );

        let policy = RetryPolicy {
            max_attempts: config.rebalance_max_attempts,
            delay: config.rebalance_retry_delay(),
        };
        let worker = RebalanceWorker::new(employees.rebalancer().clone(), policy, dead_letters.clone());
        tasks.spawn("rebalance_worker", worker.run(rx, tasks.shutdown_token()));

        let dashboard = DashboardService::new(stores.employees, stores.memberships, stores.labs);
        Self {
            config,
            db,
            employees,
            dashboard,
            dead_letters,
        }
    }

    /// Deletions rebalance before they return; no background task needed
    pub fn with_inline_rebalance(config: Config, db: DbService) -> Self {
        let stores = Stores::sqlite(&db);
        let dead_letters = DeadLetters::new(config.dead_letter_capacity);
        let employees = EmployeeService::new(
            stores.employees.clone(),
            stores.memberships.clone(),
            Arc::new(Argon2Hasher),
            RebalanceMode::Inline,
        );
        let dashboard = DashboardService::new(stores.employees, stores.memberships, stores.labs);
        Self {
            config,
            db,
            employees,
            dashboard,
            dead_letters,
        }
    }
}
