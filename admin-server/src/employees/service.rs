//! Employee lifecycle service
//!
//! Create, list, update and delete employees. Deleting an employee hands
//! the departing approver's work items to the [`WorkloadRebalancer`],
//! either inline or through the background queue.

use super::credential::CredentialHasher;
use super::error::{ServiceError, ServiceResult};
use super::paginator::paginate;
use super::rebalancer::WorkloadRebalancer;
use super::worker::{RebalanceJob, RebalanceQueue};
use crate::db::repository::{EmployeeChanges, EmployeeStore, MembershipStore};
use crate::utils::validation::{validate_employee_create, validate_employee_update, validate_phone_key};
use shared::models::{
    EmployeeCreate, EmployeeDelete, EmployeeDeletion, EmployeeListQuery, EmployeePage,
    EmployeeUpdate, EmployeeView, RebalanceOutcome,
};
use shared::util::normalize_email;
use std::sync::Arc;

/// Where the rebalancing that follows a deletion runs
#[derive(Clone)]
pub enum RebalanceMode {
    /// Awaited before `delete` returns; the report is part of the result
    Inline,
    /// Handed to the background worker
    Background(RebalanceQueue),
}

#[derive(Clone)]
pub struct EmployeeService {
    employees: Arc<dyn EmployeeStore>,
    rebalancer: WorkloadRebalancer,
    hasher: Arc<dyn CredentialHasher>,
    mode: RebalanceMode,
}

impl EmployeeService {
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        memberships: Arc<dyn MembershipStore>,
        hasher: Arc<dyn CredentialHasher>,
        mode: RebalanceMode,
    ) -> Self {
        let rebalancer = WorkloadRebalancer::new(employees.clone(), memberships);
        Self {
            employees,
            rebalancer,
            hasher,
            mode,
        }
    }

    pub fn rebalancer(&self) -> &WorkloadRebalancer {
        &self.rebalancer
    }

    pub async fn create(&self, mut cmd: EmployeeCreate) -> ServiceResult<EmployeeView> {
        validate_employee_create(&cmd).map_err(|e| ServiceError::ValidationFailed(e.message))?;
        cmd.email = normalize_email(&cmd.email);
        cmd.name = cmd.name.trim().to_string();

        let employee = self.employees.create(cmd).await?;
        tracing::info!(id = employee.id, phone = %employee.phone, "Employee created");
        Ok(employee.into())
    }

    /// Most recently updated first, then most recently created
    pub async fn list(&self, query: EmployeeListQuery) -> ServiceResult<EmployeePage> {
        let total = self.employees.count().await?;
        let bounds = paginate(query.page, query.limit, total)?;
        let employees = self.employees.find_page(bounds.skip, bounds.take).await?;

        Ok(EmployeePage {
            items: employees.into_iter().map(EmployeeView::from).collect(),
            total_pages: bounds.last_page,
            total_documents: total,
            current_page: bounds.page,
        })
    }

    pub async fn update(&self, cmd: EmployeeUpdate) -> ServiceResult<EmployeeView> {
        validate_employee_update(&cmd).map_err(|e| ServiceError::ValidationFailed(e.message))?;

        if self.employees.find_by_id(cmd.id).await?.is_none() {
            return Err(ServiceError::NotFound("Employee"));
        }

        let hash_pass = match cmd.password.as_deref() {
            Some(password) => Some(self.hasher.hash(password).map_err(ServiceError::Internal)?),
            None => None,
        };
        let changes = EmployeeChanges {
            name: cmd.name.map(|n| n.trim().to_string()),
            hash_pass,
        };

        let updated = self
            .employees
            .update_by_id(cmd.id, changes)
            .await?
            .ok_or(ServiceError::NotFound("Employee"))?;
        tracing::info!(id = updated.id, "Employee updated");
        Ok(updated.into())
    }

    /// Remove the employee, then rebalance its work items.
    ///
    /// The deletion stands whatever happens to the rebalancing.
    pub async fn delete(&self, cmd: EmployeeDelete) -> ServiceResult<EmployeeDeletion> {
        validate_phone_key(&cmd.phone).map_err(|e| ServiceError::ValidationFailed(e.message))?;

        let removed = self
            .employees
            .delete_by_phone(&cmd.phone)
            .await?
            .ok_or(ServiceError::NotFound("Employee"))?;
        tracing::info!(
            id = removed.id,
            phone = %removed.phone,
            approver = removed.is_approver(),
            "Employee deleted"
        );

        let rebalance = match &self.mode {
            RebalanceMode::Inline => match self.rebalancer.reassign_pending(&removed).await {
                Ok(report) => RebalanceOutcome::Completed { report },
                Err(e) => {
                    tracing::error!(phone = %removed.phone, error = %e, "Rebalance after deletion failed");
                    RebalanceOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            },
            RebalanceMode::Background(queue) => {
                if queue.submit(RebalanceJob::new(removed.phone.clone())) {
                    RebalanceOutcome::Queued
                } else {
                    RebalanceOutcome::Failed {
                        reason: "Rebalance job could not be queued".to_string(),
                    }
                }
            }
        };

        Ok(EmployeeDeletion {
            phone: removed.phone,
            rebalance,
        })
    }
}
