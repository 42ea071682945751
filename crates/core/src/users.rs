//! User profile constants and role-conditional validation.
//!
//! Registration, self-service profile edits and admin edits all funnel
//! through [`validate_profile`] so the same rules apply everywhere.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::roles::Role;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_BIO_LENGTH: usize = 500;
pub const MIN_AGE: i32 = 1;
pub const MAX_AGE: i32 = 120;

/// Minimum password length for registration, reset and change.
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub const VALID_GENDERS: &[&str] = &["male", "female", "other", "prefer-not-to-say"];

pub const VALID_EXPERIENCE_LEVELS: &[&str] =
    &["beginner", "intermediate", "experienced", "professional"];

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+([\.-]?\w+)*@\w+([\.-]?\w+)*(\.\w{2,})+$").expect("valid regex")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\-\s]{7,15}$").expect("valid regex"));

/* --------------------------------------------------------------------------
Profile validation
-------------------------------------------------------------------------- */

/// The subset of user fields whose validity depends on the role.
#[derive(Debug, Clone, Copy)]
pub struct ProfileFields<'a> {
    pub role: Role,
    pub name: &'a str,
    pub phone: Option<&'a str>,
    pub location: Option<&'a str>,
    pub age: Option<i32>,
    pub gender: Option<&'a str>,
    pub experience_level: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub company_name: Option<&'a str>,
}

/// Validate a complete user profile against the rules for its role.
///
/// Actors need age, gender, experience level, phone and location. Producers
/// need a company name, phone and location. Admins need only a name.
pub fn validate_profile(fields: &ProfileFields<'_>) -> Result<(), CoreError> {
    validate_name(fields.name)?;

    if let Some(phone) = non_blank(fields.phone) {
        validate_phone(phone)?;
    }
    if let Some(gender) = non_blank(fields.gender) {
        validate_gender(gender)?;
    }
    if let Some(level) = non_blank(fields.experience_level) {
        validate_experience_level(level)?;
    }
    if let Some(bio) = fields.bio {
        if bio.chars().count() > MAX_BIO_LENGTH {
            return Err(CoreError::Validation(format!(
                "Bio must be at most {MAX_BIO_LENGTH} characters"
            )));
        }
    }
    if let Some(age) = fields.age {
        validate_age(age)?;
    }

    match fields.role {
        Role::Actor => {
            if fields.age.is_none() {
                return Err(CoreError::Validation(format!(
                    "Age must be between {MIN_AGE} and {MAX_AGE}"
                )));
            }
            if non_blank(fields.gender).is_none() {
                return Err(CoreError::Validation(format!(
                    "Gender must be one of {}",
                    VALID_GENDERS.join(", ")
                )));
            }
            if non_blank(fields.experience_level).is_none() {
                return Err(CoreError::Validation(format!(
                    "Experience level must be one of {}",
                    VALID_EXPERIENCE_LEVELS.join(", ")
                )));
            }
            require(fields.phone, "Phone is required")?;
            require(fields.location, "Location is required")?;
        }
        Role::Producer => {
            require(
                fields.company_name,
                "Production House / Company Name is required",
            )?;
            require(fields.phone, "Phone is required")?;
            require(fields.location, "Location is required")?;
        }
        Role::Admin => {}
    }

    Ok(())
}

/// Validate a display name: 2..=50 characters after trimming.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let len = name.trim().chars().count();
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Full Name must be {MIN_NAME_LENGTH}-{MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_age(age: i32) -> Result<(), CoreError> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(CoreError::Validation(format!(
            "Age must be between {MIN_AGE} and {MAX_AGE}"
        )));
    }
    Ok(())
}

pub fn validate_gender(gender: &str) -> Result<(), CoreError> {
    if VALID_GENDERS.contains(&gender) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Gender must be one of {}",
            VALID_GENDERS.join(", ")
        )))
    }
}

pub fn validate_experience_level(level: &str) -> Result<(), CoreError> {
    if VALID_EXPERIENCE_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Experience level must be one of {}",
            VALID_EXPERIENCE_LEVELS.join(", ")
        )))
    }
}

pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Please provide a valid phone number".into(),
        ))
    }
}

/// Lower-case and trim an email address and check its shape.
pub fn normalize_email(email: &str) -> Result<String, CoreError> {
    let normalized = email.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(CoreError::Validation("Email is required".into()));
    }
    if !EMAIL_RE.is_match(&normalized) {
        return Err(CoreError::Validation("Please add a valid email".into()));
    }
    Ok(normalized)
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn require(value: Option<&str>, message: &str) -> Result<(), CoreError> {
    non_blank(value)
        .map(|_| ())
        .ok_or_else(|| CoreError::Validation(message.to_string()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn actor<'a>() -> ProfileFields<'a> {
        ProfileFields {
            role: Role::Actor,
            name: "Ada Lovelace",
            phone: Some("+44 20 7946 0018"),
            location: Some("London"),
            age: Some(28),
            gender: Some("female"),
            experience_level: Some("intermediate"),
            bio: None,
            company_name: None,
        }
    }

    fn producer<'a>() -> ProfileFields<'a> {
        ProfileFields {
            role: Role::Producer,
            name: "Studio Owner",
            phone: Some("5551234567"),
            location: Some("Mumbai"),
            age: None,
            gender: None,
            experience_level: None,
            bio: None,
            company_name: Some("Bright Lights Films"),
        }
    }

    #[test]
    fn complete_actor_profile_is_valid() {
        assert!(validate_profile(&actor()).is_ok());
    }

    #[test]
    fn actor_without_age_is_rejected() {
        let fields = ProfileFields {
            age: None,
            ..actor()
        };
        assert_matches!(validate_profile(&fields), Err(CoreError::Validation(msg)) if msg.contains("Age"));
    }

    #[test]
    fn actor_age_out_of_range_is_rejected() {
        let fields = ProfileFields {
            age: Some(121),
            ..actor()
        };
        assert!(validate_profile(&fields).is_err());
    }

    #[test]
    fn actor_with_unknown_gender_is_rejected() {
        let fields = ProfileFields {
            gender: Some("robot"),
            ..actor()
        };
        assert!(validate_profile(&fields).is_err());
    }

    #[test]
    fn producer_requires_company_name() {
        let fields = ProfileFields {
            company_name: Some("   "),
            ..producer()
        };
        assert_matches!(validate_profile(&fields), Err(CoreError::Validation(msg)) if msg.contains("Company"));
    }

    #[test]
    fn producer_does_not_need_actor_fields() {
        assert!(validate_profile(&producer()).is_ok());
    }

    #[test]
    fn admin_only_needs_a_name() {
        let fields = ProfileFields {
            role: Role::Admin,
            name: "Root",
            phone: None,
            location: None,
            age: None,
            gender: None,
            experience_level: None,
            bio: None,
            company_name: None,
        };
        assert!(validate_profile(&fields).is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(validate_name("  a ").is_err());
        assert!(validate_name(&"x".repeat(51)).is_err());
    }

    #[test]
    fn bad_phone_is_rejected() {
        let fields = ProfileFields {
            phone: Some("call me"),
            ..actor()
        };
        assert!(validate_profile(&fields).is_err());
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(
            normalize_email("  Jane.Doe@Example.COM ").unwrap(),
            "jane.doe@example.com"
        );
        assert!(normalize_email("not-an-email").is_err());
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
    }
}
