//! Employee Repository

use super::{EmployeeStore, ID_ATTEMPTS, RepoError, RepoResult};
use async_trait::async_trait;
use shared::models::{DEFAULT_PROFILE_IMAGE, Employee, EmployeeCreate};
use sqlx::SqlitePool;

const EMPLOYEE_COLUMNS: &str = "id, employee_id, name, designation, email, phone, type_of_user, total_memberships, completed_memberships, profile_image, hash_pass, created_at, updated_at";

/// Fields an update may touch; `None` leaves the column as is
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub hash_pass: Option<String>,
}

impl EmployeeChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.hash_pass.is_none()
    }
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE id = ?");
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(employee)
}

pub async fn find_by_phone(pool: &SqlitePool, phone: &str) -> RepoResult<Option<Employee>> {
    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE phone = ? LIMIT 1");
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(phone)
        .fetch_optional(pool)
        .await?;
    Ok(employee)
}

pub async fn find_least_loaded_approver(
    pool: &SqlitePool,
    exclude_phone: Option<&str>,
) -> RepoResult<Option<Employee>> {
    let sql = format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE type_of_user = 'approver' AND (?1 IS NULL OR phone <> ?1) ORDER BY total_memberships ASC, created_at ASC, id ASC LIMIT 1"
    );
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(exclude_phone)
        .fetch_optional(pool)
        .await?;
    Ok(employee)
}

pub async fn find_page(pool: &SqlitePool, skip: u64, take: u64) -> RepoResult<Vec<Employee>> {
    let sql = format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employee ORDER BY updated_at DESC, created_at DESC, id DESC LIMIT ? OFFSET ?"
    );
    let employees = sqlx::query_as::<_, Employee>(&sql)
        .bind(to_sql_int(take)?)
        .bind(to_sql_int(skip)?)
        .fetch_all(pool)
        .await?;
    Ok(employees)
}

pub async fn create(pool: &SqlitePool, data: EmployeeCreate) -> RepoResult<Employee> {
    create_with_ids(pool, data, shared::util::snowflake_id).await
}

/// Insert with ids drawn from `next_id`; an id collision draws once more
pub(crate) async fn create_with_ids(
    pool: &SqlitePool,
    data: EmployeeCreate,
    mut next_id: impl FnMut() -> i64,
) -> RepoResult<Employee> {
    let now = shared::util::now_millis();
    let profile_image = data
        .profile_image
        .clone()
        .unwrap_or_else(|| DEFAULT_PROFILE_IMAGE.to_string());

    let mut attempt = 1;
    let id = loop {
        let id = next_id();
        let inserted = sqlx::query(
            "INSERT INTO employee (id, employee_id, name, designation, email, phone, type_of_user, total_memberships, completed_memberships, profile_image, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, 0, ?8, ?9, ?9)",
        )
        .bind(id)
        .bind(&data.employee_id)
        .bind(&data.name)
        .bind(data.designation)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(data.type_of_user)
        .bind(&profile_image)
        .bind(now)
        .execute(pool)
        .await
        .map_err(RepoError::from);
        match inserted {
            Ok(_) => break id,
            Err(e) if e.is_id_collision() && attempt < ID_ATTEMPTS => {
                tracing::warn!(id, "Employee id collided, drawing a new one");
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    };

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    changes: EmployeeChanges,
) -> RepoResult<Option<Employee>> {
    let now = shared::util::now_millis();
    let sql = format!(
        "UPDATE employee SET name = COALESCE(?1, name), hash_pass = COALESCE(?2, hash_pass), updated_at = ?3 WHERE id = ?4 RETURNING {EMPLOYEE_COLUMNS}"
    );
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(changes.name)
        .bind(changes.hash_pass)
        .bind(now)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(employee)
}

/// Atomically add one routed work item to the employee's ledger
pub async fn increment_total_memberships(
    pool: &SqlitePool,
    phone: &str,
) -> RepoResult<Option<Employee>> {
    let now = shared::util::now_millis();
    let sql = format!(
        "UPDATE employee SET total_memberships = total_memberships + 1, updated_at = ?1 WHERE phone = ?2 RETURNING {EMPLOYEE_COLUMNS}"
    );
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(now)
        .bind(phone)
        .fetch_optional(pool)
        .await?;
    Ok(employee)
}

pub async fn delete_by_phone(pool: &SqlitePool, phone: &str) -> RepoResult<Option<Employee>> {
    let sql = format!("DELETE FROM employee WHERE phone = ? RETURNING {EMPLOYEE_COLUMNS}");
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(phone)
        .fetch_optional(pool)
        .await?;
    Ok(employee)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<u64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employee")
        .fetch_one(pool)
        .await?;
    Ok(total.max(0) as u64)
}

fn to_sql_int(value: u64) -> RepoResult<i64> {
    i64::try_from(value)
        .map_err(|_| RepoError::Validation(format!("Value {value} exceeds the storage range")))
}

/// [`EmployeeStore`] backed by SQLite
#[derive(Clone)]
pub struct SqliteEmployeeStore {
    pool: SqlitePool,
}

impl SqliteEmployeeStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for SqliteEmployeeStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Employee>> {
        find_by_id(&self.pool, id).await
    }

    async fn find_by_phone(&self, phone: &str) -> RepoResult<Option<Employee>> {
        find_by_phone(&self.pool, phone).await
    }

    async fn find_least_loaded_approver(
        &self,
        exclude_phone: Option<&str>,
    ) -> RepoResult<Option<Employee>> {
        find_least_loaded_approver(&self.pool, exclude_phone).await
    }

    async fn find_page(&self, skip: u64, take: u64) -> RepoResult<Vec<Employee>> {
        find_page(&self.pool, skip, take).await
    }

    async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        create(&self.pool, data).await
    }

    async fn update_by_id(
        &self,
        id: i64,
        changes: EmployeeChanges,
    ) -> RepoResult<Option<Employee>> {
        update(&self.pool, id, changes).await
    }

    async fn record_assignment(&self, phone: &str) -> RepoResult<Option<Employee>> {
        increment_total_memberships(&self.pool, phone).await
    }

    async fn delete_by_phone(&self, phone: &str) -> RepoResult<Option<Employee>> {
        delete_by_phone(&self.pool, phone).await
    }

    async fn count(&self) -> RepoResult<u64> {
        count(&self.pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::{Designation, UserType};

    fn approver(name: &str, phone: &str) -> EmployeeCreate {
        EmployeeCreate {
            email: format!("{}@example.com", name.to_lowercase()),
            name: name.to_string(),
            phone: phone.to_string(),
            designation: Designation::Employee,
            type_of_user: UserType::Approver,
            employee_id: None,
            profile_image: None,
        }
    }

    #[tokio::test]
    async fn test_create_sets_defaults() {
        let db = DbService::in_memory().await.unwrap();
        let e = create(&db.pool, approver("Asha", "9000000001")).await.unwrap();
        assert_eq!(e.profile_image, DEFAULT_PROFILE_IMAGE);
        assert_eq!(e.workload.total_memberships, 0);
        assert_eq!(e.workload.completed_memberships, 0);
        assert!(e.hash_pass.is_none());
        assert_eq!(e.created_at, e.updated_at);
    }

    #[tokio::test]
    async fn test_id_collision_draws_a_new_id() {
        let db = DbService::in_memory().await.unwrap();
        let first = create(&db.pool, approver("Asha", "9000000001")).await.unwrap();

        let mut ids = [first.id, first.id + 1].into_iter();
        let second = create_with_ids(&db.pool, approver("Bela", "9000000002"), || {
            ids.next().unwrap()
        })
        .await
        .unwrap();
        assert_eq!(second.id, first.id + 1);
        assert_eq!(second.phone, "9000000002");
    }

    #[tokio::test]
    async fn test_repeated_id_collision_is_not_a_field_conflict() {
        let db = DbService::in_memory().await.unwrap();
        let first = create(&db.pool, approver("Asha", "9000000001")).await.unwrap();

        let err = create_with_ids(&db.pool, approver("Bela", "9000000002"), || first.id)
            .await
            .unwrap_err();
        assert!(err.is_id_collision(), "{err:?}");
        assert_eq!(count(&db.pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_phone_reports_field() {
        let db = DbService::in_memory().await.unwrap();
        create(&db.pool, approver("Asha", "9000000001")).await.unwrap();
        let err = create(&db.pool, approver("Bela", "9000000001"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(ref f) if f == "phone"), "{err:?}");
    }

    #[tokio::test]
    async fn test_duplicate_email_reports_field() {
        let db = DbService::in_memory().await.unwrap();
        create(&db.pool, approver("Asha", "9000000001")).await.unwrap();
        let err = create(&db.pool, approver("Asha", "9000000002"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(ref f) if f == "email"), "{err:?}");
    }

    #[tokio::test]
    async fn test_least_loaded_tie_breaks_by_creation_order() {
        let db = DbService::in_memory().await.unwrap();
        let first = create(&db.pool, approver("Asha", "9000000001")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        create(&db.pool, approver("Bela", "9000000002")).await.unwrap();

        let picked = find_least_loaded_approver(&db.pool, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(picked.id, first.id);

        increment_total_memberships(&db.pool, "9000000001")
            .await
            .unwrap();
        let picked = find_least_loaded_approver(&db.pool, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(picked.phone, "9000000002");
    }

    #[tokio::test]
    async fn test_least_loaded_skips_excluded_and_non_approvers() {
        let db = DbService::in_memory().await.unwrap();
        create(&db.pool, approver("Asha", "9000000001")).await.unwrap();
        let mut manager = approver("Chitra", "9000000003");
        manager.type_of_user = UserType::MagazineManager;
        create(&db.pool, manager).await.unwrap();

        let picked = find_least_loaded_approver(&db.pool, Some("9000000001"))
            .await
            .unwrap();
        assert!(picked.is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_unset_columns() {
        let db = DbService::in_memory().await.unwrap();
        let e = create(&db.pool, approver("Asha", "9000000001")).await.unwrap();

        let changes = EmployeeChanges {
            name: None,
            hash_pass: Some("hashed".into()),
        };
        let updated = update(&db.pool, e.id, changes).await.unwrap().unwrap();
        assert_eq!(updated.name, "Asha");
        assert_eq!(updated.hash_pass.as_deref(), Some("hashed"));

        let missing = update(&db.pool, e.id + 1, EmployeeChanges::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_returns_removed_record() {
        let db = DbService::in_memory().await.unwrap();
        create(&db.pool, approver("Asha", "9000000001")).await.unwrap();

        let removed = delete_by_phone(&db.pool, "9000000001").await.unwrap();
        assert_eq!(removed.unwrap().name, "Asha");
        assert_eq!(count(&db.pool).await.unwrap(), 0);
        assert!(delete_by_phone(&db.pool, "9000000001").await.unwrap().is_none());
    }
}
