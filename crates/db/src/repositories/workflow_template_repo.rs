//! Repository for the `workflow_templates` table.

use hrflow_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::workflow::{
    CreateWorkflowTemplate, TemplateFilter, UpdateWorkflowTemplate, WorkflowTemplate,
};

/// Column list for workflow_templates queries.
const TEMPLATE_COLUMNS: &str =
    "id, name, description, module, is_active, steps, created_at, updated_at";

/// Provides CRUD operations for workflow templates.
pub struct WorkflowTemplateRepo;

impl WorkflowTemplateRepo {
    /// Insert a new template, returning the created row.
    ///
    /// Callers are expected to have validated and sorted `input.steps`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWorkflowTemplate,
    ) -> Result<WorkflowTemplate, sqlx::Error> {
        let query = format!(
            "INSERT INTO workflow_templates (name, description, module, is_active, steps)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {TEMPLATE_COLUMNS}"
        );
        sqlx::query_as::<_, WorkflowTemplate>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.module)
            .bind(input.is_active.unwrap_or(true))
            .bind(Json(&input.steps))
            .fetch_one(pool)
            .await
    }

    /// List templates, optionally filtered by module and/or active flag.
    pub async fn list(
        pool: &PgPool,
        filter: &TemplateFilter,
    ) -> Result<Vec<WorkflowTemplate>, sqlx::Error> {
        let query = format!(
            "SELECT {TEMPLATE_COLUMNS} FROM workflow_templates
             WHERE ($1::text IS NULL OR module = $1)
               AND ($2::boolean IS NULL OR is_active = $2)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, WorkflowTemplate>(&query)
            .bind(&filter.module)
            .bind(filter.active)
            .fetch_all(pool)
            .await
    }

    /// Find a template by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WorkflowTemplate>, sqlx::Error> {
        let query = format!("SELECT {TEMPLATE_COLUMNS} FROM workflow_templates WHERE id = $1");
        sqlx::query_as::<_, WorkflowTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the active template for a module, if one exists.
    ///
    /// When several are active the oldest wins, so activating a second
    /// template does not silently change behaviour mid-flight.
    pub async fn find_active_for_module(
        pool: &PgPool,
        module: &str,
    ) -> Result<Option<WorkflowTemplate>, sqlx::Error> {
        let query = format!(
            "SELECT {TEMPLATE_COLUMNS} FROM workflow_templates
             WHERE module = $1 AND is_active
             ORDER BY id ASC
             LIMIT 1"
        );
        sqlx::query_as::<_, WorkflowTemplate>(&query)
            .bind(module)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update, returning the updated row or `None` if the
    /// template does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWorkflowTemplate,
    ) -> Result<Option<WorkflowTemplate>, sqlx::Error> {
        let query = format!(
            "UPDATE workflow_templates SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                module = COALESCE($4, module),
                is_active = COALESCE($5, is_active),
                steps = COALESCE($6, steps),
                updated_at = now()
             WHERE id = $1
             RETURNING {TEMPLATE_COLUMNS}"
        );
        sqlx::query_as::<_, WorkflowTemplate>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.module)
            .bind(input.is_active)
            .bind(input.steps.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Delete a template. Returns `false` if it did not exist.
    ///
    /// In-flight instances are unaffected: they progress against their own
    /// step snapshot.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workflow_templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
