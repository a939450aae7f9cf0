//! Registry of business modules that can be governed by an approval workflow.
//!
//! A workflow template or instance carries a module tag identifying which
//! business domain it applies to. The set of supported modules is closed:
//! each variant knows the table its documents live in, and an unknown tag is
//! a validation error rather than a silent no-op.

use crate::error::CoreError;

/// Module tag for leave requests.
pub const MODULE_LEAVE: &str = "leave";

/// Module tag for time-correction requests.
pub const MODULE_TIME_CORRECTION: &str = "time_correction";

/// Status a module hook writes onto a business document while a workflow
/// instance is open against it.
pub const STATUS_PENDING_APPROVAL: &str = "pending_approval";

/// Default status for a freshly created business document with no workflow.
pub const STATUS_DEFAULT: &str = "pending";

/// A business domain whose documents can be gated by an approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Module {
    Leave,
    TimeCorrection,
}

impl Module {
    /// Resolve a free-form module tag into a known module.
    pub fn from_tag(tag: &str) -> Result<Self, CoreError> {
        match tag {
            MODULE_LEAVE => Ok(Self::Leave),
            MODULE_TIME_CORRECTION => Ok(Self::TimeCorrection),
            other => Err(CoreError::Validation(format!(
                "Unknown workflow module '{other}'. Must be one of: {MODULE_LEAVE}, {MODULE_TIME_CORRECTION}"
            ))),
        }
    }

    /// The canonical tag stored on templates and instances.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Leave => MODULE_LEAVE,
            Self::TimeCorrection => MODULE_TIME_CORRECTION,
        }
    }

    /// The table holding this module's business documents.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Leave => "leaves",
            Self::TimeCorrection => "time_corrections",
        }
    }
}
