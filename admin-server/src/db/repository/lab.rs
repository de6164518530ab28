//! Lab Repository

use super::{LabStore, RepoResult};
use async_trait::async_trait;
use shared::models::Lab;
use sqlx::SqlitePool;

pub async fn create(pool: &SqlitePool, name: &str) -> RepoResult<Lab> {
    let id = shared::util::snowflake_id();
    let lab = sqlx::query_as::<_, Lab>("INSERT INTO lab (id, name) VALUES (?, ?) RETURNING id, name")
        .bind(id)
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(lab)
}

pub async fn count_by_name(pool: &SqlitePool, name: &str) -> RepoResult<u64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lab WHERE name = ?")
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(total.max(0) as u64)
}

/// [`LabStore`] backed by SQLite
#[derive(Clone)]
pub struct SqliteLabStore {
    pool: SqlitePool,
}

impl SqliteLabStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LabStore for SqliteLabStore {
    async fn count_by_name(&self, name: &str) -> RepoResult<u64> {
        count_by_name(&self.pool, name).await
    }
}
