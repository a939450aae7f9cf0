//! Workflow instance lifecycle: opening instances for business documents
//! and applying approve/reject actions.

use hrflow_core::error::CoreError;
use hrflow_core::module::Module;
use hrflow_core::types::DbId;
use hrflow_core::workflow::{self, ActionKind, ActionRecord, InstanceStatus};
use hrflow_db::models::workflow::{
    ActionRequest, CreateWorkflowInstance, WorkflowInstance, WorkflowInstanceDetails,
    WorkflowTemplate,
};
use hrflow_db::repositories::{ReferenceDocRepo, WorkflowInstanceRepo, WorkflowTemplateRepo};
use hrflow_db::DbPool;

use crate::engine::reference;
use crate::error::AppResult;

/// Look up the workflow template that currently gates a module, if any.
///
/// A template with no steps gates nothing, so it is treated the same as no
/// template at all. Module hooks call this before persisting a business
/// document to decide its initial status.
pub async fn active_template(
    pool: &DbPool,
    module: Module,
) -> Result<Option<WorkflowTemplate>, sqlx::Error> {
    let template = WorkflowTemplateRepo::find_active_for_module(pool, module.tag()).await?;
    Ok(template.filter(|t| !t.steps.0.is_empty()))
}

/// Open a workflow instance for a newly created business document.
///
/// The template's steps are frozen into the instance snapshot: later edits
/// or deletion of the template do not affect this instance.
pub async fn open_instance(
    pool: &DbPool,
    template: &WorkflowTemplate,
    module: Module,
    reference_id: DbId,
) -> Result<WorkflowInstance, sqlx::Error> {
    let create = CreateWorkflowInstance {
        workflow_id: template.id,
        module: module.tag().to_string(),
        reference_id,
        steps: template.steps.0.clone(),
    };
    let instance = WorkflowInstanceRepo::create(pool, &create).await?;

    tracing::info!(
        instance_id = instance.id,
        workflow_id = template.id,
        module = module.tag(),
        reference_id,
        "Workflow instance opened"
    );
    Ok(instance)
}

/// Apply an approve/reject action to an instance.
///
/// The action is recorded in the step history unconditionally as part of the
/// same write that performs the state transition. A terminal instance
/// refuses the action with `InvalidState`; so does a concurrent submission
/// that loses the conditional update.
pub async fn apply_action(
    pool: &DbPool,
    instance_id: DbId,
    input: &ActionRequest,
    acting_user_id: DbId,
) -> AppResult<WorkflowInstance> {
    let action = ActionKind::parse(&input.action)?;

    let instance = WorkflowInstanceRepo::find_by_id(pool, instance_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "WorkflowInstance",
            id: instance_id,
        })?;

    let status = InstanceStatus::parse(&instance.status)?;
    let next = workflow::advance(status, instance.current_step, &instance.steps_snapshot.0, action)?;

    let entry = ActionRecord {
        action,
        comment: input.comment.clone(),
        user_id: acting_user_id,
        timestamp: chrono::Utc::now(),
    };

    let updated = WorkflowInstanceRepo::apply_action(
        pool,
        instance_id,
        next.status.as_str(),
        next.current_step,
        &entry,
    )
    .await?
    .ok_or_else(|| {
        // Lost the conditional update: another action resolved the instance
        // between our read and this write.
        CoreError::InvalidState(format!(
            "Workflow instance {instance_id} is already resolved"
        ))
    })?;

    tracing::info!(
        instance_id,
        user_id = acting_user_id,
        action = action.as_str(),
        status = %updated.status,
        current_step = updated.current_step,
        "Workflow action applied"
    );

    if next.status.is_terminal() {
        let module = Module::from_tag(&updated.module)?;
        reference::apply_outcome(
            pool,
            module,
            updated.reference_id,
            next.status,
            input.comment.as_deref(),
        )
        .await;
    }

    Ok(updated)
}

/// Fetch an instance enriched with its template and reference document.
///
/// Both enrichments are weak references: a template or business document
/// that has since been deleted yields a null field, never an error.
pub async fn get_details(pool: &DbPool, instance_id: DbId) -> AppResult<WorkflowInstanceDetails> {
    let instance = WorkflowInstanceRepo::find_by_id(pool, instance_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "WorkflowInstance",
            id: instance_id,
        })?;

    let workflow = WorkflowTemplateRepo::find_by_id(pool, instance.workflow_id).await?;

    let reference_document = match Module::from_tag(&instance.module) {
        Ok(module) => ReferenceDocRepo::fetch_json(pool, module, instance.reference_id).await?,
        Err(_) => None,
    };

    Ok(WorkflowInstanceDetails {
        instance,
        workflow,
        reference_document,
    })
}
