//! Leave request models and DTOs.

use chrono::NaiveDate;
use hrflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `leaves` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Leave {
    pub id: DbId,
    pub employee_id: DbId,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a new leave request. The initial status is decided by
/// the workflow hook, not the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLeave {
    pub employee_id: DbId,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

/// Query-string filter for listing leaves.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaveFilter {
    pub employee_id: Option<DbId>,
    pub status: Option<String>,
}
