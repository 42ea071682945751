//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- The signed-in user, loaded from the database.
//! - [`auth::MaybeAuthUser`] -- Same lookup, but never rejects.
//! - [`rbac::RequireActor`], [`rbac::RequireProducer`], [`rbac::RequireAdmin`]
//!   -- Reject every other role with 403.

pub mod auth;
pub mod rbac;
