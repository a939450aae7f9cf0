//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod leave_repo;
pub mod reference_repo;
pub mod time_correction_repo;
pub mod workflow_instance_repo;
pub mod workflow_template_repo;

pub use leave_repo::LeaveRepo;
pub use reference_repo::ReferenceDocRepo;
pub use time_correction_repo::TimeCorrectionRepo;
pub use workflow_instance_repo::WorkflowInstanceRepo;
pub use workflow_template_repo::WorkflowTemplateRepo;
