//! Repository for the `time_corrections` table.

use hrflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::time_correction::{
    CreateTimeCorrection, TimeCorrection, TimeCorrectionFilter,
};

/// Column list for time_corrections queries.
const CORRECTION_COLUMNS: &str = "id, employee_id, work_date, requested_clock_in, \
    requested_clock_out, reason, status, rejection_reason, created_at, updated_at";

/// Provides CRUD operations for time-correction requests.
pub struct TimeCorrectionRepo;

impl TimeCorrectionRepo {
    /// Insert a new time correction with the given initial status.
    ///
    /// The status is a parameter because the workflow hook decides it:
    /// `pending_approval` when an instance is opened, the default otherwise.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTimeCorrection,
        status: &str,
    ) -> Result<TimeCorrection, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_corrections
                (employee_id, work_date, requested_clock_in, requested_clock_out, reason, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {CORRECTION_COLUMNS}"
        );
        sqlx::query_as::<_, TimeCorrection>(&query)
            .bind(input.employee_id)
            .bind(input.work_date)
            .bind(input.requested_clock_in)
            .bind(input.requested_clock_out)
            .bind(&input.reason)
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Find a time correction by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TimeCorrection>, sqlx::Error> {
        let query = format!("SELECT {CORRECTION_COLUMNS} FROM time_corrections WHERE id = $1");
        sqlx::query_as::<_, TimeCorrection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List time corrections, optionally filtered by employee and/or status.
    pub async fn list(
        pool: &PgPool,
        filter: &TimeCorrectionFilter,
    ) -> Result<Vec<TimeCorrection>, sqlx::Error> {
        let query = format!(
            "SELECT {CORRECTION_COLUMNS} FROM time_corrections
             WHERE ($1::bigint IS NULL OR employee_id = $1)
               AND ($2::text IS NULL OR status = $2)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, TimeCorrection>(&query)
            .bind(filter.employee_id)
            .bind(&filter.status)
            .fetch_all(pool)
            .await
    }
}
