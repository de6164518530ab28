//! Membership Repository

use super::{ID_ATTEMPTS, MembershipStore, RepoError, RepoResult};
use async_trait::async_trait;
use shared::models::{MembershipCreate, MembershipStatus, MembershipWorkItem};
use sqlx::SqlitePool;

const MEMBERSHIP_COLUMNS: &str =
    "id, approver_phone, membership_status, type_of_membership, company_type, created_at, updated_at";

/// Count filters supported by [`MembershipStore::count`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipFilter<'a> {
    Status(MembershipStatus),
    /// Any of pending, approved, rejected
    Reviewable,
    TypeOfMembership(&'a str),
    CompanyType(&'a str),
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MembershipWorkItem>> {
    let sql = format!("SELECT {MEMBERSHIP_COLUMNS} FROM membership WHERE id = ?");
    let item = sqlx::query_as::<_, MembershipWorkItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

pub async fn find_by_approver_phone(
    pool: &SqlitePool,
    phone: &str,
) -> RepoResult<Vec<MembershipWorkItem>> {
    let sql = format!(
        "SELECT {MEMBERSHIP_COLUMNS} FROM membership WHERE approver_phone = ? ORDER BY created_at ASC, id ASC"
    );
    let items = sqlx::query_as::<_, MembershipWorkItem>(&sql)
        .bind(phone)
        .fetch_all(pool)
        .await?;
    Ok(items)
}

pub async fn create(pool: &SqlitePool, data: MembershipCreate) -> RepoResult<MembershipWorkItem> {
    let now = shared::util::now_millis();
    let mut attempt = 1;
    let id = loop {
        let id = shared::util::snowflake_id();
        let inserted = sqlx::query(
            "INSERT INTO membership (id, approver_phone, membership_status, type_of_membership, company_type, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        )
        .bind(id)
        .bind(&data.approver_phone)
        .bind(data.membership_status)
        .bind(&data.type_of_membership)
        .bind(&data.company_type)
        .bind(now)
        .execute(pool)
        .await
        .map_err(RepoError::from);
        match inserted {
            Ok(_) => break id,
            Err(e) if e.is_id_collision() && attempt < ID_ATTEMPTS => {
                tracing::warn!(id, "Membership id collided, drawing a new one");
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    };

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create membership".into()))
}

pub async fn save_assignment(pool: &SqlitePool, item: &MembershipWorkItem) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE membership SET approver_phone = ?1, membership_status = ?2, updated_at = ?3 WHERE id = ?4",
    )
    .bind(&item.approver_phone)
    .bind(item.membership_status)
    .bind(now)
    .bind(item.id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Membership {} not found", item.id)));
    }
    Ok(())
}

pub async fn count(pool: &SqlitePool, filter: MembershipFilter<'_>) -> RepoResult<u64> {
    let total: i64 = match filter {
        MembershipFilter::Status(status) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM membership WHERE membership_status = ?")
                .bind(status)
                .fetch_one(pool)
                .await?
        }
        MembershipFilter::Reviewable => {
            sqlx::query_scalar(
                "SELECT COUNT(*) FROM membership WHERE membership_status IN ('approved', 'rejected', 'pending')",
            )
            .fetch_one(pool)
            .await?
        }
        MembershipFilter::TypeOfMembership(kind) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM membership WHERE type_of_membership = ?")
                .bind(kind)
                .fetch_one(pool)
                .await?
        }
        MembershipFilter::CompanyType(kind) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM membership WHERE company_type = ?")
                .bind(kind)
                .fetch_one(pool)
                .await?
        }
    };
    Ok(total.max(0) as u64)
}

/// [`MembershipStore`] backed by SQLite
#[derive(Clone)]
pub struct SqliteMembershipStore {
    pool: SqlitePool,
}

impl SqliteMembershipStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipStore for SqliteMembershipStore {
    async fn find_by_approver_phone(&self, phone: &str) -> RepoResult<Vec<MembershipWorkItem>> {
        find_by_approver_phone(&self.pool, phone).await
    }

    async fn save(&self, item: &MembershipWorkItem) -> RepoResult<()> {
        save_assignment(&self.pool, item).await
    }

    async fn count(&self, filter: MembershipFilter<'_>) -> RepoResult<u64> {
        count(&self.pool, filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn membership(phone: &str, status: MembershipStatus, kind: &str, company: &str) -> MembershipCreate {
        MembershipCreate {
            approver_phone: phone.to_string(),
            membership_status: status,
            type_of_membership: kind.to_string(),
            company_type: company.to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_by_approver_phone_ignores_status() {
        let db = DbService::in_memory().await.unwrap();
        create(&db.pool, membership("9000000001", MembershipStatus::Pending, "Ordinary", "private"))
            .await
            .unwrap();
        create(&db.pool, membership("9000000001", MembershipStatus::Approved, "Associate", "public"))
            .await
            .unwrap();
        create(&db.pool, membership("9000000002", MembershipStatus::Pending, "Ordinary", "private"))
            .await
            .unwrap();

        let items = find_by_approver_phone(&db.pool, "9000000001").await.unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.approver_phone == "9000000001"));
    }

    #[tokio::test]
    async fn test_save_assignment_persists_fields() {
        let db = DbService::in_memory().await.unwrap();
        let mut item = create(
            &db.pool,
            membership("9000000001", MembershipStatus::Rejected, "Ordinary", "private"),
        )
        .await
        .unwrap();

        item.reassign_to("9000000002");
        save_assignment(&db.pool, &item).await.unwrap();

        let stored = find_by_id(&db.pool, item.id).await.unwrap().unwrap();
        assert_eq!(stored.approver_phone, "9000000002");
        assert_eq!(stored.membership_status, MembershipStatus::Pending);
    }

    #[tokio::test]
    async fn test_save_missing_item_is_not_found() {
        let db = DbService::in_memory().await.unwrap();
        let mut item = create(
            &db.pool,
            membership("9000000001", MembershipStatus::Pending, "Ordinary", "private"),
        )
        .await
        .unwrap();
        item.id += 1;
        let err = save_assignment(&db.pool, &item).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_counts_by_filter() {
        let db = DbService::in_memory().await.unwrap();
        for (status, kind, company) in [
            (MembershipStatus::Pending, "Ordinary", "private"),
            (MembershipStatus::Pending, "Associate", "public"),
            (MembershipStatus::Approved, "Ordinary", "cooperative"),
            (MembershipStatus::Rejected, "Ordinary", "private"),
        ] {
            create(&db.pool, membership("9000000001", status, kind, company))
                .await
                .unwrap();
        }

        let pending = count(&db.pool, MembershipFilter::Status(MembershipStatus::Pending))
            .await
            .unwrap();
        assert_eq!(pending, 2);
        assert_eq!(count(&db.pool, MembershipFilter::Reviewable).await.unwrap(), 4);
        assert_eq!(
            count(&db.pool, MembershipFilter::TypeOfMembership("Ordinary"))
                .await
                .unwrap(),
            3
        );
        assert_eq!(
            count(&db.pool, MembershipFilter::CompanyType("private"))
                .await
                .unwrap(),
            2
        );
    }
}
