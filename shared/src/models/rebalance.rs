//! Workload Rebalancing Report Models

use serde::{Deserialize, Serialize};

/// Result of moving one work item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReassignmentOutcome {
    /// Item now points at `approver_phone`
    Reassigned { approver_phone: String },
    /// Item was left untouched
    Failed { reason: String },
}

/// Per-item entry of a [`RebalanceReport`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemReassignment {
    pub item_id: i64,
    pub outcome: ReassignmentOutcome,
}

/// Outcome of rebalancing a departing approver's work items
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceReport {
    pub departing_phone: String,
    pub items: Vec<ItemReassignment>,
}

impl RebalanceReport {
    pub fn new(departing_phone: impl Into<String>) -> Self {
        Self {
            departing_phone: departing_phone.into(),
            items: Vec::new(),
        }
    }

    pub fn push_reassigned(&mut self, item_id: i64, approver_phone: impl Into<String>) {
        self.items.push(ItemReassignment {
            item_id,
            outcome: ReassignmentOutcome::Reassigned {
                approver_phone: approver_phone.into(),
            },
        });
    }

    pub fn push_failed(&mut self, item_id: i64, reason: impl Into<String>) {
        self.items.push(ItemReassignment {
            item_id,
            outcome: ReassignmentOutcome::Failed {
                reason: reason.into(),
            },
        });
    }

    pub fn reassigned_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.outcome, ReassignmentOutcome::Reassigned { .. }))
            .count()
    }

    /// Items that could not be moved, with their reasons
    pub fn failures(&self) -> impl Iterator<Item = (i64, &str)> {
        self.items.iter().filter_map(|i| match &i.outcome {
            ReassignmentOutcome::Failed { reason } => Some((i.item_id, reason.as_str())),
            ReassignmentOutcome::Reassigned { .. } => None,
        })
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// True when every fetched item was moved (vacuously true for no items)
    pub fn is_complete(&self) -> bool {
        self.failed_count() == 0
    }
}

/// What happened to the rebalancing that follows a deletion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RebalanceOutcome {
    /// Rebalancing ran before the deletion returned
    Completed { report: RebalanceReport },
    /// Rebalancing was handed to the background worker
    Queued,
    /// Rebalancing never started: the work items could not be fetched, or
    /// the job could not be queued. The deletion still stands
    Failed { reason: String },
}

/// Result of a successful employee deletion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDeletion {
    pub phone: String,
    pub rebalance: RebalanceOutcome,
}

/// Rebalancing job that exhausted its attempts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeadLetter {
    pub departing_phone: String,
    pub attempts: u32,
    pub last_error: String,
    /// Items still pointing at the departed approver
    pub item_ids: Vec<i64>,
    pub recorded_at: i64,
}
