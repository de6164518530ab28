//! Workload Rebalancer
//!
//! Moves the work items of a departing approver to the least-loaded
//! remaining approver, one item at a time. Items are independent: a failure
//! on one item is recorded in the report and the loop moves on.

use super::error::{ServiceError, ServiceResult};
use crate::db::repository::{EmployeeStore, MembershipStore};
use shared::models::{Employee, MembershipWorkItem, RebalanceReport};
use std::sync::Arc;

#[derive(Clone)]
pub struct WorkloadRebalancer {
    employees: Arc<dyn EmployeeStore>,
    memberships: Arc<dyn MembershipStore>,
}

impl WorkloadRebalancer {
    pub fn new(employees: Arc<dyn EmployeeStore>, memberships: Arc<dyn MembershipStore>) -> Self {
        Self {
            employees,
            memberships,
        }
    }

    /// Reassign every work item still pointing at `departing`.
    ///
    /// Only a failure to fetch the items is returned as an error; per-item
    /// failures end up in the report.
    pub async fn reassign_pending(&self, departing: &Employee) -> ServiceResult<RebalanceReport> {
        self.reassign_pending_for(&departing.phone).await
    }

    /// Same as [`Self::reassign_pending`], keyed by phone only (the employee
    /// record may already be gone)
    pub async fn reassign_pending_for(&self, departing_phone: &str) -> ServiceResult<RebalanceReport> {
        let items = self
            .memberships
            .find_by_approver_phone(departing_phone)
            .await?;

        let mut report = RebalanceReport::new(departing_phone);
        if items.is_empty() {
            tracing::debug!(phone = %departing_phone, "No work items to rebalance");
            return Ok(report);
        }

        for item in items {
            let item_id = item.id;
            match self.reassign_one(item, departing_phone).await {
                Ok(target) => {
                    tracing::debug!(item_id, target = %target, "Work item reassigned");
                    report.push_reassigned(item_id, target);
                }
                Err(e) => {
                    tracing::warn!(item_id, phone = %departing_phone, error = %e, "Work item not reassigned");
                    report.push_failed(item_id, e.to_string());
                }
            }
        }

        tracing::info!(
            phone = %departing_phone,
            reassigned = report.reassigned_count(),
            failed = report.failed_count(),
            "Rebalance finished"
        );
        Ok(report)
    }

    /// Move one item; returns the phone of the receiving approver
    async fn reassign_one(
        &self,
        mut item: MembershipWorkItem,
        departing_phone: &str,
    ) -> ServiceResult<String> {
        // Selected fresh for every item so a batch spreads across approvers
        let target = self
            .employees
            .find_least_loaded_approver(Some(departing_phone))
            .await?
            .ok_or(ServiceError::NoApproverAvailable)?;

        item.reassign_to(&target.phone);
        self.memberships.save(&item).await?;

        let mut expected = target.workload;
        expected.record_assignment();
        let expected_total = expected.total_memberships;
        match self.employees.record_assignment(&target.phone).await {
            Ok(Some(updated)) if updated.workload.total_memberships != expected_total => {
                tracing::debug!(
                    target = %target.phone,
                    expected = expected_total,
                    actual = updated.workload.total_memberships,
                    "Approver counter moved concurrently"
                );
            }
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::warn!(item_id = item.id, target = %target.phone, "Approver vanished before its counter was updated");
            }
            Err(e) => {
                tracing::warn!(item_id = item.id, target = %target.phone, error = %e, "Approver counter not updated");
            }
        }

        Ok(target.phone)
    }
}
