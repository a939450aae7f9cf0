//! Domain logic for the hrflow backend.
//!
//! Pure types and functions with no I/O: the workflow state machine, step
//! validation, the business-module registry, and the shared error taxonomy.
//! The `db` and `api` crates build on top of this.

pub mod error;
pub mod module;
pub mod types;
pub mod workflow;
