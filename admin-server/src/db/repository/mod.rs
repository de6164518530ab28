//! Repository Module
//!
//! Store interfaces consumed by the services, plus their SQLite
//! implementations. Each store module exposes free functions over a
//! `SqlitePool` and a thin struct implementing the store trait.

pub mod employee;
pub mod lab;
pub mod membership;

// Re-exports
pub use employee::{EmployeeChanges, SqliteEmployeeStore};
pub use lab::SqliteLabStore;
pub use membership::{MembershipFilter, SqliteMembershipStore};

use async_trait::async_trait;
use shared::models::{Employee, EmployeeCreate, MembershipWorkItem};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violated; carries the column name
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            // SQLite: "UNIQUE constraint failed: employee.email"
            let field = db_err
                .message()
                .rsplit('.')
                .next()
                .unwrap_or("record")
                .trim()
                .to_string();
            return RepoError::Duplicate(field);
        }
        RepoError::Database(err.to_string())
    }
}

impl RepoError {
    /// Primary key clash from a generated id, not a caller-visible conflict
    pub fn is_id_collision(&self) -> bool {
        matches!(self, RepoError::Duplicate(field) if field == "id")
    }
}

/// Inserts per record before a generated id collision is given up on
pub(crate) const ID_ATTEMPTS: u32 = 2;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence over employee records
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Employee>>;

    async fn find_by_phone(&self, phone: &str) -> RepoResult<Option<Employee>>;

    /// Approver with the fewest `total_memberships`.
    ///
    /// Ties resolve to the earliest created record, then the smallest id.
    async fn find_least_loaded_approver(
        &self,
        exclude_phone: Option<&str>,
    ) -> RepoResult<Option<Employee>>;

    /// Page of employees, most recently updated first, then most recently created
    async fn find_page(&self, skip: u64, take: u64) -> RepoResult<Vec<Employee>>;

    /// Insert a new employee. Email must already be normalized.
    async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee>;

    /// Apply changes; `None` when no record has this id
    async fn update_by_id(&self, id: i64, changes: EmployeeChanges)
    -> RepoResult<Option<Employee>>;

    /// Bump `total_memberships` by one in a single statement; `None` when the
    /// phone no longer exists
    async fn record_assignment(&self, phone: &str) -> RepoResult<Option<Employee>>;

    /// Remove and return the record; `None` when absent
    async fn delete_by_phone(&self, phone: &str) -> RepoResult<Option<Employee>>;

    async fn count(&self) -> RepoResult<u64>;
}

/// Persistence over membership work items
#[async_trait]
pub trait MembershipStore: Send + Sync {
    async fn find_by_approver_phone(&self, phone: &str) -> RepoResult<Vec<MembershipWorkItem>>;

    /// Persist `approver_phone` and `membership_status` of an existing item
    async fn save(&self, item: &MembershipWorkItem) -> RepoResult<()>;

    async fn count(&self, filter: MembershipFilter<'_>) -> RepoResult<u64>;
}

/// Persistence over labs (read-only counts)
#[async_trait]
pub trait LabStore: Send + Sync {
    async fn count_by_name(&self, name: &str) -> RepoResult<u64>;
}
