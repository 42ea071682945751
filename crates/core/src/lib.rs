//! Domain rules for the Actory casting marketplace.
//!
//! Everything in this crate is pure logic: no database, no HTTP. The `db`
//! and `api` crates call into these functions before persisting anything.

pub mod attendance;
pub mod casting;
pub mod error;
pub mod messaging;
pub mod profile_video;
pub mod role_switch;
pub mod roles;
pub mod submission;
pub mod types;
pub mod users;
pub mod verification;
