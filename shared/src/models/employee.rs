//! Employee Model

use serde::{Deserialize, Serialize};

/// Profile image assigned when none is supplied
pub const DEFAULT_PROFILE_IMAGE: &str = "images/dp.jpg";

/// Employee designation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum Designation {
    Manager,
    Employee,
}

/// Staff account type
///
/// Only approvers take part in workload rebalancing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "kebab-case"))]
pub enum UserType {
    Approver,
    MagazineManager,
}

/// Workload counters of an employee
///
/// `total_memberships` counts work items ever routed to the employee (it is
/// not decremented when an item leaves), `completed_memberships` counts items
/// the employee finished. Both saturate at zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct WorkloadLedger {
    pub total_memberships: i64,
    pub completed_memberships: i64,
}

impl WorkloadLedger {
    pub fn new(total_memberships: i64, completed_memberships: i64) -> Self {
        Self {
            total_memberships: total_memberships.max(0),
            completed_memberships: completed_memberships.max(0),
        }
    }

    /// A work item was routed to this employee
    pub fn record_assignment(&mut self) {
        self.total_memberships = self.total_memberships.saturating_add(1);
    }

    /// A work item routed to this employee was finished
    pub fn record_completion(&mut self) {
        self.completed_memberships = self.completed_memberships.saturating_add(1);
    }

    /// Items routed but not yet finished
    pub fn outstanding(&self) -> i64 {
        (self.total_memberships - self.completed_memberships).max(0)
    }
}

/// Employee entity (staff account)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    /// External display code
    pub employee_id: Option<String>,
    pub name: String,
    pub designation: Designation,
    /// Always stored lower-cased
    pub email: String,
    pub phone: String,
    pub type_of_user: UserType,
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub workload: WorkloadLedger,
    pub profile_image: String,
    #[serde(skip_serializing, default)]
    pub hash_pass: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Employee {
    pub fn is_approver(&self) -> bool {
        self.type_of_user == UserType::Approver
    }
}

/// Employee as returned to callers (credential column stripped)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeView {
    pub id: i64,
    pub employee_id: Option<String>,
    pub name: String,
    pub designation: Designation,
    pub email: String,
    pub phone: String,
    pub type_of_user: UserType,
    #[serde(flatten)]
    pub workload: WorkloadLedger,
    pub profile_image: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Employee> for EmployeeView {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            employee_id: e.employee_id,
            name: e.name,
            designation: e.designation,
            email: e.email,
            phone: e.phone,
            type_of_user: e.type_of_user,
            workload: e.workload,
            profile_image: e.profile_image,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub designation: Designation,
    pub type_of_user: UserType,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Update employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    /// Plain text; hashed before it reaches the store
    #[serde(default)]
    pub password: Option<String>,
}

/// Delete employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDelete {
    pub phone: String,
}

/// Employee list query (both values may be absent or non-positive)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmployeeListQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// One page of employees
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePage {
    pub items: Vec<EmployeeView>,
    pub total_pages: u64,
    pub total_documents: u64,
    pub current_page: u64,
}
