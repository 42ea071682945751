//! User entity model and DTOs.

use actory_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash and reset token -- NEVER serialize this to API
/// responses directly. Use [`UserResponse`] or [`UserSummary`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub experience_level: Option<String>,
    pub bio: Option<String>,
    pub profile_image: String,
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub skills: Vec<String>,
    pub is_email_verified: bool,
    pub is_verified: bool,
    pub reset_password_token: Option<String>,
    pub reset_password_expire: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub experience_level: Option<String>,
    pub bio: Option<String>,
    pub profile_image: String,
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub skills: Vec<String>,
    pub is_email_verified: bool,
    pub is_verified: bool,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role.clone(),
            phone: u.phone.clone(),
            location: u.location.clone(),
            age: u.age,
            gender: u.gender.clone(),
            experience_level: u.experience_level.clone(),
            bio: u.bio.clone(),
            profile_image: u.profile_image.clone(),
            company_name: u.company_name.clone(),
            website: u.website.clone(),
            skills: u.skills.clone(),
            is_email_verified: u.is_email_verified,
            is_verified: u.is_verified,
            created_at: u.created_at,
        }
    }
}

/// Minimal user card used in search results, conversations and submissions.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserSummary {
    pub id: DbId,
    pub name: String,
    pub role: String,
    pub profile_image: String,
    pub is_verified: bool,
}

impl From<&User> for UserSummary {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            role: u.role.clone(),
            profile_image: u.profile_image.clone(),
            is_verified: u.is_verified,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub experience_level: Option<String>,
    pub bio: Option<String>,
    pub company_name: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub is_email_verified: bool,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub experience_level: Option<String>,
    pub bio: Option<String>,
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub skills: Option<Vec<String>>,
    pub is_verified: Option<bool>,
}

impl UpdateUser {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.role.is_none()
            && self.phone.is_none()
            && self.location.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.experience_level.is_none()
            && self.bio.is_none()
            && self.company_name.is_none()
            && self.website.is_none()
            && self.skills.is_none()
            && self.is_verified.is_none()
    }
}
