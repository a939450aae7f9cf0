//! Time-correction request models and DTOs.

use chrono::NaiveDate;
use hrflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `time_corrections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeCorrection {
    pub id: DbId,
    pub employee_id: DbId,
    pub work_date: NaiveDate,
    pub requested_clock_in: Option<Timestamp>,
    pub requested_clock_out: Option<Timestamp>,
    pub reason: Option<String>,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a new time-correction request. The initial status is
/// decided by the workflow hook, not the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimeCorrection {
    pub employee_id: DbId,
    pub work_date: NaiveDate,
    pub requested_clock_in: Option<Timestamp>,
    pub requested_clock_out: Option<Timestamp>,
    pub reason: Option<String>,
}

/// Query-string filter for listing time corrections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeCorrectionFilter {
    pub employee_id: Option<DbId>,
    pub status: Option<String>,
}
