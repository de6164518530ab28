//! Dashboard Model

use serde::{Deserialize, Serialize};

/// Admin dashboard counters
///
/// Each number comes from an independent count; under concurrent writes the
/// values may reflect slightly different instants.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub pending_memberships_count: u64,
    pub approved_memberships_count: u64,
    /// Pending + approved + rejected
    pub total_memberships_count: u64,
    pub employee_count: u64,
    /// Ordered as [`super::MEMBERSHIP_TYPES`]
    pub type_of_membership_data: Vec<u64>,
    /// Ordered as [`super::LAB_CATEGORIES`]
    pub lab_data: Vec<u64>,
    /// Ordered as [`super::COMPANY_TYPES`]
    pub company_type_data: Vec<u64>,
}
