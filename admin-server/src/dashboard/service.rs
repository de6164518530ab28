//! Dashboard Service

use crate::db::repository::{EmployeeStore, LabStore, MembershipFilter, MembershipStore};
use crate::employees::ServiceResult;
use shared::models::{
    COMPANY_TYPES, DashboardSnapshot, LAB_CATEGORIES, MEMBERSHIP_TYPES, MembershipStatus,
};
use std::sync::Arc;

/// Read-only aggregate counts for the admin dashboard
#[derive(Clone)]
pub struct DashboardService {
    employees: Arc<dyn EmployeeStore>,
    memberships: Arc<dyn MembershipStore>,
    labs: Arc<dyn LabStore>,
}

impl DashboardService {
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        memberships: Arc<dyn MembershipStore>,
        labs: Arc<dyn LabStore>,
    ) -> Self {
        Self {
            employees,
            memberships,
            labs,
        }
    }

    /// Every number is its own query; no snapshot isolation across them.
    pub async fn snapshot(&self) -> ServiceResult<DashboardSnapshot> {
        let pending_memberships_count = self
            .memberships
            .count(MembershipFilter::Status(MembershipStatus::Pending))
            .await?;
        let approved_memberships_count = self
            .memberships
            .count(MembershipFilter::Status(MembershipStatus::Approved))
            .await?;
        let total_memberships_count = self.memberships.count(MembershipFilter::Reviewable).await?;
        let employee_count = self.employees.count().await?;

        let mut type_of_membership_data = Vec::with_capacity(MEMBERSHIP_TYPES.len());
        for kind in MEMBERSHIP_TYPES {
            type_of_membership_data.push(
                self.memberships
                    .count(MembershipFilter::TypeOfMembership(kind))
                    .await?,
            );
        }

        let mut lab_data = Vec::with_capacity(LAB_CATEGORIES.len());
        for name in LAB_CATEGORIES {
            lab_data.push(self.labs.count_by_name(name).await?);
        }

        let mut company_type_data = Vec::with_capacity(COMPANY_TYPES.len());
        for kind in COMPANY_TYPES {
            company_type_data.push(
                self.memberships
                    .count(MembershipFilter::CompanyType(kind))
                    .await?,
            );
        }

        Ok(DashboardSnapshot {
            pending_memberships_count,
            approved_memberships_count,
            total_memberships_count,
            employee_count,
            type_of_membership_data,
            lab_data,
            company_type_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::{
        SqliteEmployeeStore, SqliteLabStore, SqliteMembershipStore, employee, lab, membership,
    };
    use crate::employees::rebalancer::tests::approver;
    use shared::models::MembershipCreate;

    fn service(db: &DbService) -> DashboardService {
        DashboardService::new(
            Arc::new(SqliteEmployeeStore::new(db.pool.clone())),
            Arc::new(SqliteMembershipStore::new(db.pool.clone())),
            Arc::new(SqliteLabStore::new(db.pool.clone())),
        )
    }

    #[tokio::test]
    async fn test_empty_snapshot_has_fixed_shape() {
        let db = DbService::in_memory().await.unwrap();
        let snapshot = service(&db).snapshot().await.unwrap();
        assert_eq!(snapshot.total_memberships_count, 0);
        assert_eq!(snapshot.type_of_membership_data, vec![0, 0]);
        assert_eq!(snapshot.lab_data, vec![0; 6]);
        assert_eq!(snapshot.company_type_data, vec![0; 4]);
    }

    #[tokio::test]
    async fn test_snapshot_counts() {
        let db = DbService::in_memory().await.unwrap();
        employee::create(&db.pool, approver("Asha", "9000000001")).await.unwrap();
        employee::create(&db.pool, approver("Bela", "9000000002")).await.unwrap();

        for (status, kind, company) in [
            (MembershipStatus::Pending, "Associate", "private"),
            (MembershipStatus::Pending, "Ordinary", "public"),
            (MembershipStatus::Approved, "Ordinary", "others"),
            (MembershipStatus::Rejected, "Ordinary", "private"),
        ] {
            membership::create(
                &db.pool,
                MembershipCreate {
                    approver_phone: "9000000001".into(),
                    membership_status: status,
                    type_of_membership: kind.into(),
                    company_type: company.into(),
                },
            )
            .await
            .unwrap();
        }
        lab::create(&db.pool, "cable").await.unwrap();
        lab::create(&db.pool, "cable").await.unwrap();
        lab::create(&db.pool, "calibration").await.unwrap();
        lab::create(&db.pool, "unlisted").await.unwrap();

        let snapshot = service(&db).snapshot().await.unwrap();
        assert_eq!(snapshot.pending_memberships_count, 2);
        assert_eq!(snapshot.approved_memberships_count, 1);
        assert_eq!(snapshot.total_memberships_count, 4);
        assert_eq!(snapshot.employee_count, 2);
        assert_eq!(snapshot.type_of_membership_data, vec![1, 3]);
        assert_eq!(snapshot.lab_data, vec![0, 0, 2, 0, 0, 1]);
        assert_eq!(snapshot.company_type_data, vec![2, 1, 0, 1]);
    }
}
