pub mod health;
pub mod leave;
pub mod time_correction;
pub mod workflow;
