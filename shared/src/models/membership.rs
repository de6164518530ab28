//! Membership Work Item Model
//!
//! Membership records belong to the membership-management side; the admin
//! backend only reads them and rewrites `approver_phone` / `membership_status`
//! when an approver leaves.

use serde::{Deserialize, Serialize};

/// Review status of a membership application
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum MembershipStatus {
    Pending,
    Approved,
    Rejected,
}

/// Membership types shown on the dashboard, in display order
pub const MEMBERSHIP_TYPES: [&str; 2] = ["Associate", "Ordinary"];

/// Company types shown on the dashboard, in display order
pub const COMPANY_TYPES: [&str; 4] = ["private", "public", "cooperative", "others"];

/// Membership work item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MembershipWorkItem {
    pub id: i64,
    /// Phone of the employee currently responsible
    pub approver_phone: String,
    pub membership_status: MembershipStatus,
    pub type_of_membership: String,
    pub company_type: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MembershipWorkItem {
    /// Hand the item to another approver; it goes back to review
    pub fn reassign_to(&mut self, approver_phone: &str) {
        self.approver_phone = approver_phone.to_string();
        self.membership_status = MembershipStatus::Pending;
    }
}

/// Create membership payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipCreate {
    pub approver_phone: String,
    pub membership_status: MembershipStatus,
    pub type_of_membership: String,
    pub company_type: String,
}
