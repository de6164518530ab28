//! Lab Model

use serde::{Deserialize, Serialize};

/// Lab categories counted on the dashboard, in display order
pub const LAB_CATEGORIES: [&str; 6] = [
    "power electronic",
    "advance materials",
    "cable",
    "high voltage",
    "magnetic material",
    "calibration",
];

/// Lab entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Lab {
    pub id: i64,
    pub name: String,
}
