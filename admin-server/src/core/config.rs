use std::path::PathBuf;
use std::time::Duration;

/// 服务器配置 - 管理后台的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_URL | sqlite:{WORK_DIR}/admin.db | SQLite 连接串 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 设置后写入按天滚动的日志文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | REBALANCE_QUEUE_CAPACITY | 256 | 重分配队列容量 |
/// | REBALANCE_MAX_ATTEMPTS | 3 | 每个任务最多尝试次数 |
/// | REBALANCE_RETRY_DELAY_MS | 500 | 重试间隔(毫秒) |
/// | DEAD_LETTER_CAPACITY | 1000 | 保留的死信数量 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/admin HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    pub database_url: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 运行环境: development | production
    pub environment: String,

    // === 工作量重分配 ===
    pub rebalance_queue_capacity: usize,
    pub rebalance_max_attempts: u32,
    pub rebalance_retry_delay_ms: u64,
    pub dead_letter_capacity: usize,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| format!("sqlite:{work_dir}/admin.db"));

        Self {
            http_port: env_or("HTTP_PORT", 3000),
            database_url,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            rebalance_queue_capacity: env_or("REBALANCE_QUEUE_CAPACITY", 256),
            rebalance_max_attempts: env_or("REBALANCE_MAX_ATTEMPTS", 3),
            rebalance_retry_delay_ms: env_or("REBALANCE_RETRY_DELAY_MS", 500),
            dead_letter_capacity: env_or("DEAD_LETTER_CAPACITY", 1000),
            work_dir,
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_url = format!("sqlite:{}/admin.db", config.work_dir);
        config.http_port = http_port;
        config
    }

    pub fn work_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir)
    }

    pub fn rebalance_retry_delay(&self) -> Duration {
        Duration::from_millis(self.rebalance_retry_delay_ms)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_follow_work_dir() {
        let config = Config::with_overrides("/tmp/admin-test", 8080);
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.database_url, "sqlite:/tmp/admin-test/admin.db");
        assert_eq!(config.work_dir_path(), PathBuf::from("/tmp/admin-test"));
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        assert_eq!(env_or("ADMIN_SERVER_TEST_UNSET_KEY", 7u32), 7);
    }
}
