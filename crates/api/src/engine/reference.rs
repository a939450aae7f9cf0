//! Reference-document mutator: writes a resolved workflow outcome back onto
//! the business document the instance governs.
//!
//! Failures here are logged and swallowed. The instance's own state and
//! step history are the source of truth, and the referenced document may
//! legitimately have been deleted while the workflow was in flight.

use hrflow_core::module::Module;
use hrflow_core::types::DbId;
use hrflow_core::workflow::InstanceStatus;
use hrflow_db::repositories::ReferenceDocRepo;
use hrflow_db::DbPool;

/// Reflect a terminal workflow outcome on the referenced business document.
///
/// Sets the document's status to the outcome and, on rejection, records the
/// action comment as the rejection reason.
pub async fn apply_outcome(
    pool: &DbPool,
    module: Module,
    reference_id: DbId,
    outcome: InstanceStatus,
    reason: Option<&str>,
) {
    debug_assert!(outcome.is_terminal());

    let rejection_reason = match outcome {
        InstanceStatus::Rejected => reason,
        _ => None,
    };

    match ReferenceDocRepo::set_status(pool, module, reference_id, outcome.as_str(), rejection_reason)
        .await
    {
        Ok(true) => {
            tracing::info!(
                module = module.tag(),
                reference_id,
                outcome = outcome.as_str(),
                "Workflow outcome written to reference document"
            );
        }
        Ok(false) => {
            tracing::warn!(
                module = module.tag(),
                reference_id,
                outcome = outcome.as_str(),
                "Reference document missing, workflow outcome not written back"
            );
        }
        Err(err) => {
            tracing::warn!(
                module = module.tag(),
                reference_id,
                error = %err,
                "Failed to write workflow outcome to reference document"
            );
        }
    }
}
