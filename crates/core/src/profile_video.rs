//! Portfolio videos shown on an actor's public profile.

use crate::error::CoreError;

pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
const DEFAULT_TITLE_CHARS: usize = 80;
const FALLBACK_TITLE: &str = "Profile Video";

pub const VALID_CATEGORIES: &[&str] = &["Monologue", "Dance", "Demo Reel", "Other"];

pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Category must be one of {}",
            VALID_CATEGORIES.join(", ")
        )))
    }
}

/// Resolve the stored title: explicit title, else the head of the
/// description, else a fixed fallback.
pub fn resolve_title(title: Option<&str>, description: Option<&str>) -> Result<String, CoreError> {
    if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(CoreError::Validation(format!(
                "Title cannot exceed {MAX_TITLE_LENGTH} characters"
            )));
        }
        return Ok(title.to_string());
    }
    Ok(description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| d.chars().take(DEFAULT_TITLE_CHARS).collect())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string()))
}

pub fn validate_description(description: Option<&str>) -> Result<(), CoreError> {
    match description {
        Some(d) if d.chars().count() > MAX_DESCRIPTION_LENGTH => Err(CoreError::Validation(
            format!("Description cannot exceed {MAX_DESCRIPTION_LENGTH} characters"),
        )),
        _ => Ok(()),
    }
}
