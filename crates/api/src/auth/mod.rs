//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT session tokens and reset-token hashing.

pub mod jwt;
pub mod password;
