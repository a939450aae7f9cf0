//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` filter/update DTO where the API exposes one

pub mod leave;
pub mod time_correction;
pub mod workflow;
