//! Sign-ups awaiting email confirmation.

use actory_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::user::CreateUser;

#[derive(Debug, Clone, FromRow)]
pub struct PendingRegistration {
    pub id: DbId,
    pub email: String,
    pub name: String,
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
    pub skills: Vec<String>,
    pub otp: String,
    pub expire_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PendingRegistration {
    /// The verified user this registration turns into.
    pub fn into_create_user(self) -> CreateUser {
        CreateUser {
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
            phone: self.phone,
            location: self.location,
            age: self.age,
            gender: self.gender,
            experience_level: self.experience_level,
            bio: self.bio,
            company_name: self.company_name,
            website: self.website,
            skills: self.skills,
            is_email_verified: true,
        }
    }
}

/// Registration data plus the code emailed to the applicant.
#[derive(Debug, Clone)]
pub struct UpsertPendingRegistration {
    pub user: CreateUser,
    pub otp: String,
    pub expire_at: Timestamp,
}
