//! Page bound computation for the employee listing
//!
//! Pure arithmetic, no I/O. A page is rejected when it is not the last page
//! and `page * limit > total + 1`; the `+ 1` lets a request sit exactly on
//! the boundary.

use serde::Serialize;

/// Resolved bounds of a requested page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    /// Normalized page number (>= 1)
    pub page: u64,
    /// Normalized page size (>= 1)
    pub limit: u64,
    pub skip: u64,
    pub take: u64,
    /// `ceil(total / limit)`, 0 for an empty collection
    pub last_page: u64,
}

/// The requested page lies past the end of the data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutOfRangePage {
    pub page: u64,
    pub last_page: u64,
}

/// Absent or non-positive values normalize to 1.
fn normalize(value: Option<i64>) -> u64 {
    match value {
        Some(v) if v > 0 => v as u64,
        _ => 1,
    }
}

/// Compute `skip`/`take` for `page` of size `limit` over `total` records.
pub fn paginate(
    page: Option<i64>,
    limit: Option<i64>,
    total: u64,
) -> Result<PageBounds, OutOfRangePage> {
    let page = normalize(page);
    let limit = normalize(limit);
    let last_page = total.div_ceil(limit);

    if page != last_page && page.saturating_mul(limit) > total.saturating_add(1) {
        return Err(OutOfRangePage { page, last_page });
    }

    Ok(PageBounds {
        page,
        limit,
        skip: (page - 1).saturating_mul(limit),
        take: limit,
        last_page,
    })
}
