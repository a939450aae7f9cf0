//! Workflow template and instance models and DTOs.

use hrflow_core::types::{DbId, Timestamp};
use hrflow_core::workflow::{ActionRecord, StepDef};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// A row from the `workflow_templates` table.
///
/// `steps` is stored as JSONB, kept sorted by `order` ascending on write.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkflowTemplate {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub module: String,
    pub is_active: bool,
    pub steps: Json<Vec<StepDef>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a new workflow template.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkflowTemplate {
    pub name: String,
    pub description: Option<String>,
    pub module: String,
    pub is_active: Option<bool>,
    #[serde(default)]
    pub steps: Vec<StepDef>,
}

/// Input for updating an existing template. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorkflowTemplate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub module: Option<String>,
    pub is_active: Option<bool>,
    pub steps: Option<Vec<StepDef>>,
}

/// Query-string filter for listing templates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateFilter {
    pub module: Option<String>,
    pub active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Instances
// ---------------------------------------------------------------------------

/// A row from the `workflow_instances` table.
///
/// `steps_snapshot` is the template's step list frozen at creation time;
/// progression never consults the live template. `step_history` is the
/// append-only audit log of every action taken.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkflowInstance {
    pub id: DbId,
    pub workflow_id: DbId,
    pub module: String,
    pub reference_id: DbId,
    pub status: String,
    pub current_step: i32,
    pub steps_snapshot: Json<Vec<StepDef>>,
    pub step_history: Json<Vec<ActionRecord>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for opening a new workflow instance.
#[derive(Debug, Clone)]
pub struct CreateWorkflowInstance {
    pub workflow_id: DbId,
    pub module: String,
    pub reference_id: DbId,
    pub steps: Vec<StepDef>,
}

/// Query-string filter for listing instances.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstanceFilter {
    pub module: Option<String>,
    pub status: Option<String>,
}

/// Request body for the instance action endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    pub comment: Option<String>,
}

/// An instance enriched with its template and reference document for
/// display. Either enrichment may be null when the weak reference no longer
/// resolves.
#[derive(Debug, Serialize)]
pub struct WorkflowInstanceDetails {
    #[serde(flatten)]
    pub instance: WorkflowInstance,
    pub workflow: Option<WorkflowTemplate>,
    pub reference_document: Option<serde_json::Value>,
}
