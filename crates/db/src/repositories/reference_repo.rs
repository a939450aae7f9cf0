//! Storage access for reference documents: the business records a workflow
//! instance governs via a non-owning id reference.
//!
//! The table is resolved through [`Module::collection`], so the set of
//! addressable tables is closed at compile time. Only the `id`, `status`
//! and `rejection_reason` columns are assumed to exist.

use hrflow_core::module::Module;
use hrflow_core::types::DbId;
use sqlx::PgPool;

/// Reads and writes business documents by module + id.
pub struct ReferenceDocRepo;

impl ReferenceDocRepo {
    /// Fetch a reference document as raw JSON for display enrichment.
    pub async fn fetch_json(
        pool: &PgPool,
        module: Module,
        id: DbId,
    ) -> Result<Option<serde_json::Value>, sqlx::Error> {
        let query = format!(
            "SELECT to_jsonb(d) FROM {} d WHERE d.id = $1",
            module.collection()
        );
        sqlx::query_scalar::<_, serde_json::Value>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Write a resolved workflow outcome onto the document's status, and the
    /// rejection reason when one is given. Returns `false` if the document
    /// no longer exists.
    pub async fn set_status(
        pool: &PgPool,
        module: Module,
        id: DbId,
        status: &str,
        rejection_reason: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET
                status = $2,
                rejection_reason = COALESCE($3, rejection_reason),
                updated_at = now()
             WHERE id = $1",
            module.collection()
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(status)
            .bind(rejection_reason)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
