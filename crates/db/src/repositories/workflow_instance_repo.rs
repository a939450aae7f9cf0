//! Repository for the `workflow_instances` table.

use hrflow_core::types::DbId;
use hrflow_core::workflow::{ActionRecord, STATUS_IN_PROGRESS, STATUS_PENDING};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::workflow::{CreateWorkflowInstance, InstanceFilter, WorkflowInstance};

/// Column list for workflow_instances queries.
const INSTANCE_COLUMNS: &str = "id, workflow_id, module, reference_id, status, current_step, \
    steps_snapshot, step_history, created_at, updated_at";

/// Provides persistence for workflow instances.
pub struct WorkflowInstanceRepo;

impl WorkflowInstanceRepo {
    /// Open a new instance at the first step, with the template's steps
    /// frozen into the snapshot and an empty history.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWorkflowInstance,
    ) -> Result<WorkflowInstance, sqlx::Error> {
        let query = format!(
            "INSERT INTO workflow_instances
                (workflow_id, module, reference_id, status, current_step, steps_snapshot)
             VALUES ($1, $2, $3, '{STATUS_PENDING}', 0, $4)
             RETURNING {INSTANCE_COLUMNS}"
        );
        sqlx::query_as::<_, WorkflowInstance>(&query)
            .bind(input.workflow_id)
            .bind(&input.module)
            .bind(input.reference_id)
            .bind(Json(&input.steps))
            .fetch_one(pool)
            .await
    }

    /// Find an instance by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WorkflowInstance>, sqlx::Error> {
        let query = format!("SELECT {INSTANCE_COLUMNS} FROM workflow_instances WHERE id = $1");
        sqlx::query_as::<_, WorkflowInstance>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List instances, optionally filtered by module and/or status.
    pub async fn list(
        pool: &PgPool,
        filter: &InstanceFilter,
    ) -> Result<Vec<WorkflowInstance>, sqlx::Error> {
        let query = format!(
            "SELECT {INSTANCE_COLUMNS} FROM workflow_instances
             WHERE ($1::text IS NULL OR module = $1)
               AND ($2::text IS NULL OR status = $2)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, WorkflowInstance>(&query)
            .bind(&filter.module)
            .bind(&filter.status)
            .fetch_all(pool)
            .await
    }

    /// Persist one state transition: set status and current step and append
    /// the history entry, in a single conditional update.
    ///
    /// The status predicate is the concurrency guard: a competing action
    /// that already resolved the instance makes this update match zero rows,
    /// in which case `None` is returned and nothing is written. Terminal
    /// instances are therefore immutable at the database level, not just by
    /// handler convention.
    pub async fn apply_action(
        pool: &PgPool,
        id: DbId,
        status: &str,
        current_step: i32,
        entry: &ActionRecord,
    ) -> Result<Option<WorkflowInstance>, sqlx::Error> {
        let query = format!(
            "UPDATE workflow_instances SET
                status = $2,
                current_step = $3,
                step_history = step_history || $4,
                updated_at = now()
             WHERE id = $1 AND status IN ('{STATUS_PENDING}', '{STATUS_IN_PROGRESS}')
             RETURNING {INSTANCE_COLUMNS}"
        );
        sqlx::query_as::<_, WorkflowInstance>(&query)
            .bind(id)
            .bind(status)
            .bind(current_step)
            .bind(Json(entry))
            .fetch_optional(pool)
            .await
    }
}
