//! Workflow approval engine.
//!
//! `instance` drives the lifecycle of workflow instances; `reference`
//! writes resolved outcomes back onto the business documents they govern.

pub mod instance;
pub mod reference;
