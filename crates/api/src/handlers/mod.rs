//! Request handlers, one submodule per resource.
//!
//! Handlers delegate persistence to the repositories in `actory_db`, domain
//! rules to `actory_core`, and map failures via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod actor;
pub mod admin;
pub mod auth;
pub mod casting;
pub mod messages;
pub mod prediction;
pub mod profile;
pub mod videos;
