//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - An update DTO (all `Option` fields) for patches

pub mod casting_call;
pub mod message;
pub mod pending_registration;
pub mod profile_video;
pub mod role_switch_request;
pub mod user;
pub mod video;
