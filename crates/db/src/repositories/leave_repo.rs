//! Repository for the `leaves` table.

use hrflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::leave::{CreateLeave, Leave, LeaveFilter};

/// Column list for leaves queries.
const LEAVE_COLUMNS: &str = "id, employee_id, leave_type, start_date, end_date, reason, \
    status, rejection_reason, created_at, updated_at";

/// Provides CRUD operations for leave requests.
pub struct LeaveRepo;

impl LeaveRepo {
    /// Insert a new leave request with the given initial status.
    ///
    /// The status is a parameter because the workflow hook decides it:
    /// `pending_approval` when an instance is opened, the default otherwise.
    pub async fn create(
        pool: &PgPool,
        input: &CreateLeave,
        status: &str,
    ) -> Result<Leave, sqlx::Error> {
        let query = format!(
            "INSERT INTO leaves (employee_id, leave_type, start_date, end_date, reason, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {LEAVE_COLUMNS}"
        );
        sqlx::query_as::<_, Leave>(&query)
            .bind(input.employee_id)
            .bind(&input.leave_type)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.reason)
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Find a leave by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Leave>, sqlx::Error> {
        let query = format!("SELECT {LEAVE_COLUMNS} FROM leaves WHERE id = $1");
        sqlx::query_as::<_, Leave>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List leaves, optionally filtered by employee and/or status.
    pub async fn list(pool: &PgPool, filter: &LeaveFilter) -> Result<Vec<Leave>, sqlx::Error> {
        let query = format!(
            "SELECT {LEAVE_COLUMNS} FROM leaves
             WHERE ($1::bigint IS NULL OR employee_id = $1)
               AND ($2::text IS NULL OR status = $2)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Leave>(&query)
            .bind(filter.employee_id)
            .bind(&filter.status)
            .fetch_all(pool)
            .await
    }

    /// Delete a leave. Returns `false` if it did not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leaves WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
