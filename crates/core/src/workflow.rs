//! Workflow approval domain types and the instance state machine.
//!
//! A workflow template defines an ordered chain of approval steps for a
//! business module. An instance tracks one document's progress through that
//! chain. The functions here are pure: step validation, sorting, and the
//! state transition applied on each approve/reject action. Persistence lives
//! in the `db` crate.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Instance is waiting for the first approver.
pub const STATUS_PENDING: &str = "pending";

/// At least one step has been approved; later steps remain.
pub const STATUS_IN_PROGRESS: &str = "in_progress";

/// Every required step was approved. Terminal.
pub const STATUS_APPROVED: &str = "approved";

/// Some step was rejected. Terminal.
pub const STATUS_REJECTED: &str = "rejected";

/// Lifecycle state of a workflow instance.
///
/// Transitions are one-way: `Pending`/`InProgress` resolve to `Approved` or
/// `Rejected` and never move back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    Pending,
    InProgress,
    Approved,
    Rejected,
}

impl InstanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::Approved => STATUS_APPROVED,
            Self::Rejected => STATUS_REJECTED,
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_IN_PROGRESS => Ok(Self::InProgress),
            STATUS_APPROVED => Ok(Self::Approved),
            STATUS_REJECTED => Ok(Self::Rejected),
            other => Err(CoreError::Internal(format!(
                "Unknown workflow instance status '{other}'"
            ))),
        }
    }

    /// Terminal instances accept no further actions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// Action an approver can take on the current step of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Approve,
    Reject,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            other => Err(CoreError::Validation(format!(
                "Invalid action '{other}'. Must be one of: approve, reject"
            ))),
        }
    }
}

/// Who is expected to act on a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApproverType {
    Manager,
    DepartmentHead,
    Role,
    Other,
}

/// One step of an approval chain.
///
/// `order` defines the sequence; values need not be contiguous. A `role`
/// step must name the role via `approver_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDef {
    pub order: i32,
    pub name: String,
    pub approver_type: ApproverType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_id: Option<DbId>,
    #[serde(default)]
    pub can_skip: bool,
}

/// One entry in an instance's append-only step history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    pub action: ActionKind,
    pub comment: Option<String>,
    pub user_id: DbId,
    pub timestamp: Timestamp,
}

/// Validate a template's step list.
///
/// An empty list is accepted (module hooks treat a stepless template as "no
/// workflow"), but a `role` step without an `approver_id` is rejected.
pub fn validate_steps(steps: &[StepDef]) -> Result<(), CoreError> {
    for step in steps {
        if step.approver_type == ApproverType::Role && step.approver_id.is_none() {
            return Err(CoreError::Validation(format!(
                "Step '{}' has approver_type 'role' but no approver_id",
                step.name
            )));
        }
    }
    Ok(())
}

/// Sort steps by `order` ascending. Sequencing everywhere else assumes this.
pub fn sort_steps(steps: &mut [StepDef]) {
    steps.sort_by_key(|step| step.order);
}

/// Result of applying an action to a non-terminal instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub status: InstanceStatus,
    pub current_step: i32,
}

/// Compute the state transition for one approve/reject action.
///
/// `current_step` indexes into `steps` (the instance's snapshot, sorted by
/// order). A reject resolves the instance immediately regardless of
/// position. An approve advances past the current step and any directly
/// following `can_skip` steps; if that run reaches the end of the chain the
/// instance resolves approved, otherwise it is in progress at the next
/// required step.
pub fn advance(
    status: InstanceStatus,
    current_step: i32,
    steps: &[StepDef],
    action: ActionKind,
) -> Result<Transition, CoreError> {
    if status.is_terminal() {
        return Err(CoreError::InvalidState(format!(
            "Workflow instance is already {}",
            status.as_str()
        )));
    }

    match action {
        ActionKind::Reject => Ok(Transition {
            status: InstanceStatus::Rejected,
            current_step,
        }),
        ActionKind::Approve => {
            let mut next = current_step.max(0) + 1;
            while (next as usize) < steps.len() && steps[next as usize].can_skip {
                next += 1;
            }
            if next as usize >= steps.len() {
                Ok(Transition {
                    status: InstanceStatus::Approved,
                    current_step,
                })
            } else {
                Ok(Transition {
                    status: InstanceStatus::InProgress,
                    current_step: next,
                })
            }
        }
    }
}
