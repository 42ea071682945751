//! Handlers for the `/auth` resource: registration with email codes, login,
//! password reset and self-service account edits.

use actory_core::casting::normalize_skills;
use actory_core::roles::Role;
use actory_core::users::{normalize_email, validate_password, validate_profile, ProfileFields};
use actory_core::verification::{
    generate_otp, generate_reset_token, OTP_TTL_MINS, RESET_TOKEN_TTL_MINS,
};
use actory_db::models::pending_registration::UpsertPendingRegistration;
use actory_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use actory_db::repositories::{PendingRegistrationRepo, UserRepo};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_token, hash_reset_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, ValidJson};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Largest accepted profile photo.
pub const MAX_PHOTO_BYTES: usize = 2 * 1024 * 1024;

const NEUTRAL_RESET_MESSAGE: &str =
    "If an account with that email exists, a password reset link has been sent";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 50, message = "Full Name must be 2-50 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Defaults to `Actor`.
    pub role: Option<Role>,
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
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "OTP is required"))]
    pub otp: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EmailRequest {
    #[validate(length(min = 1, message = "Please provide an email address"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Please provide an email and password"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please provide an email and password"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckEmailQuery {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckEmailResponse {
    pub success: bool,
    pub available: bool,
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 1, message = "Please provide current and new passwords"))]
    pub current_password: String,
    #[validate(length(min = 1, message = "Please provide current and new passwords"))]
    pub new_password: String,
}

/// Self-service profile patch. Role and verification flags are not editable.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub experience_level: Option<String>,
    pub bio: Option<String>,
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub skills: Option<Vec<String>>,
}

/// Token plus the signed-in user, returned by login and password changes.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn token_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    Ok(AuthResponse {
        success: true,
        token,
        user: UserResponse::from(user),
    })
}

/// Re-validate `user` as it would look after applying `patch`.
pub(crate) fn validate_merged_profile(user: &User, patch: &UpdateUser) -> AppResult<()> {
    let role: Role = patch.role.as_deref().unwrap_or(&user.role).parse()?;
    validate_profile(&ProfileFields {
        role,
        name: patch.name.as_deref().unwrap_or(&user.name),
        phone: patch.phone.as_deref().or(user.phone.as_deref()),
        location: patch.location.as_deref().or(user.location.as_deref()),
        age: patch.age.or(user.age),
        gender: patch.gender.as_deref().or(user.gender.as_deref()),
        experience_level: patch
            .experience_level
            .as_deref()
            .or(user.experience_level.as_deref()),
        bio: patch.bio.as_deref().or(user.bio.as_deref()),
        company_name: patch.company_name.as_deref().or(user.company_name.as_deref()),
    })?;
    Ok(())
}

async fn send_verification_code(
    state: &AppState,
    email: &str,
    name: &str,
    otp: &str,
) -> AppResult<()> {
    match &state.mailer {
        Some(mailer) => mailer
            .send_verification_code(email, name, otp, OTP_TTL_MINS)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, email, "Verification email failed");
                AppError::MailDelivery(
                    "Could not send verification email. Please try again in a moment.".into(),
                )
            }),
        None => {
            tracing::warn!(email, otp, "SMTP not configured; verification code not emailed");
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Validate the sign-up, park it as a pending registration and email a
/// 6-digit code. The user row is only created by `verify_email`.
pub async fn register(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let email = normalize_email(&input.email)?;
    validate_password(&input.password)?;

    let role = input.role.unwrap_or(Role::Actor);
    if role == Role::Admin {
        return Err(AppError::validation("Cannot register as Admin"));
    }

    validate_profile(&ProfileFields {
        role,
        name: &input.name,
        phone: input.phone.as_deref(),
        location: input.location.as_deref(),
        age: input.age,
        gender: input.gender.as_deref(),
        experience_level: input.experience_level.as_deref(),
        bio: input.bio.as_deref(),
        company_name: input.company_name.as_deref(),
    })?;

    if UserRepo::email_exists(&state.pool, &email).await? {
        return Err(AppError::conflict("Email already in use"));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let otp = generate_otp();
    let pending = PendingRegistrationRepo::upsert(
        &state.pool,
        &UpsertPendingRegistration {
            user: CreateUser {
                name: input.name.trim().to_string(),
                email: email.clone(),
                password_hash,
                role: role.as_str().to_string(),
                phone: input.phone,
                location: input.location,
                age: input.age,
                gender: input.gender,
                experience_level: input.experience_level,
                bio: input.bio,
                company_name: input.company_name,
                website: input.website,
                skills: normalize_skills(&input.skills),
                is_email_verified: false,
            },
            otp: otp.clone(),
            expire_at: Utc::now() + Duration::minutes(OTP_TTL_MINS),
        },
    )
    .await?;

    send_verification_code(&state, &pending.email, &pending.name, &otp).await?;
    tracing::info!(email = %pending.email, role = %role, "Registration pending verification");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: format!(
                "Registration received. We emailed a 6-digit code valid for {OTP_TTL_MINS} minutes."
            ),
            email: pending.email,
        }),
    ))
}

/// POST /api/v1/auth/verify-email
pub async fn verify_email(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<VerifyEmailRequest>,
) -> AppResult<Json<MessageResponse>> {
    let email = normalize_email(&input.email)?;

    let user = PendingRegistrationRepo::confirm(&state.pool, &email, input.otp.trim(), Utc::now())
        .await?
        .ok_or_else(|| {
            AppError::validation("Invalid or expired OTP. Please request a new one.")
        })?;

    tracing::info!(user_id = user.id, "Email verified, account created");
    Ok(Json(MessageResponse::new(
        "Email verified successfully! You can now log in to your account.",
    )))
}

/// POST /api/v1/auth/resend-verification
pub async fn resend_verification(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<EmailRequest>,
) -> AppResult<Json<MessageResponse>> {
    let email = normalize_email(&input.email)?;
    let otp = generate_otp();

    let pending = PendingRegistrationRepo::refresh_otp(
        &state.pool,
        &email,
        &otp,
        Utc::now() + Duration::minutes(OTP_TTL_MINS),
    )
    .await?
    .ok_or_else(|| {
        AppError::NotFound("No pending or unverified account found with that email address".into())
    })?;

    send_verification_code(&state, &pending.email, &pending.name, &otp).await?;

    Ok(Json(MessageResponse::new(format!(
        "Verification code sent! It is valid for {OTP_TTL_MINS} minutes."
    ))))
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = input.email.trim().to_lowercase();

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    if !user.is_email_verified && user.role != Role::Admin.as_str() {
        return Err(AppError::forbidden(
            "Please verify your email address before logging in.",
        ));
    }

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(token_response(&state, &user)?))
}

/// GET /api/v1/auth/check-email?email=
pub async fn check_email(
    State(state): State<AppState>,
    Query(query): Query<CheckEmailQuery>,
) -> AppResult<Json<CheckEmailResponse>> {
    let raw = query
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::validation("Email is required"))?;
    let email = normalize_email(&raw)?;

    let taken = UserRepo::email_exists(&state.pool, &email).await?;
    Ok(Json(CheckEmailResponse {
        success: true,
        available: !taken,
        message: if taken {
            "Email is already registered"
        } else {
            "Email is available"
        },
    }))
}

// ---------------------------------------------------------------------------
// Password reset
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/forgotpassword
///
/// Always answers with the same message so the endpoint cannot be used to
/// probe for accounts.
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<EmailRequest>,
) -> AppResult<Json<MessageResponse>> {
    let email = input.email.trim().to_lowercase();

    let Some(user) = UserRepo::find_by_email(&state.pool, &email).await? else {
        return Ok(Json(MessageResponse::new(NEUTRAL_RESET_MESSAGE)));
    };

    let token = generate_reset_token();
    UserRepo::set_reset_token(
        &state.pool,
        user.id,
        Some(&hash_reset_token(&token)),
        Some(Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINS)),
    )
    .await?;

    let reset_url = format!("{}/reset-password/{token}", state.config.frontend_url);
    match &state.mailer {
        Some(mailer) => {
            if let Err(e) = mailer
                .send_password_reset(&user.email, &reset_url, RESET_TOKEN_TTL_MINS)
                .await
            {
                tracing::error!(error = %e, user_id = user.id, "Password reset email failed");
                UserRepo::set_reset_token(&state.pool, user.id, None, None).await?;
                return Err(AppError::MailDelivery("Email could not be sent".into()));
            }
        }
        None => {
            tracing::warn!(user_id = user.id, %reset_url, "SMTP not configured; reset link not emailed");
        }
    }

    Ok(Json(MessageResponse::new(NEUTRAL_RESET_MESSAGE)))
}

/// GET /api/v1/auth/check-reset-token/{token}
pub async fn check_reset_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    UserRepo::find_by_reset_token(&state.pool, &hash_reset_token(&token), Utc::now())
        .await?
        .ok_or_else(|| AppError::validation("Invalid or expired reset token"))?;
    Ok(Json(MessageResponse::new("Valid reset token")))
}

/// PUT /api/v1/auth/resetpassword/{token}
pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    AppJson(input): AppJson<ResetPasswordRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_reset_token(&state.pool, &hash_reset_token(&token), Utc::now())
        .await?
        .ok_or_else(|| AppError::validation("Invalid or expired reset token"))?;

    validate_password(&input.password)?;
    if input.password != input.confirm_password {
        return Err(AppError::validation("Passwords do not match"));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;

    tracing::info!(user_id = user.id, "Password reset");
    Ok(Json(token_response(&state, &user)?))
}

// ---------------------------------------------------------------------------
// Current user
// ---------------------------------------------------------------------------

/// GET /api/v1/auth/me
pub async fn get_me(auth: AuthUser) -> AppResult<Json<DataResponse<UserResponse>>> {
    Ok(Json(DataResponse::new(UserResponse::from(&auth.user))))
}

/// PUT /api/v1/auth/me
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<UpdateMeRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let patch = UpdateUser {
        name: input.name.map(|n| n.trim().to_string()),
        phone: input.phone,
        location: input.location,
        age: input.age,
        gender: input.gender,
        experience_level: input.experience_level,
        bio: input.bio,
        company_name: input.company_name,
        website: input.website,
        skills: input
            .skills
            .map(|s| normalize_skills(&s)),
        ..UpdateUser::default()
    };
    if patch.is_empty() {
        return Err(AppError::validation("No valid fields provided"));
    }

    validate_merged_profile(&auth.user, &patch)?;

    let user = UserRepo::update(&state.pool, auth.user_id, &patch)
        .await?
        .ok_or(AppError::not_found("User", auth.user_id))?;
    Ok(Json(DataResponse::new(UserResponse::from(&user))))
}

/// PUT /api/v1/auth/updatepassword
pub async fn update_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<UpdatePasswordRequest>,
) -> AppResult<Json<AuthResponse>> {
    let current_ok = verify_password(&input.current_password, &auth.user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_ok {
        return Err(AppError::unauthorized("Invalid credentials"));
    }
    validate_password(&input.new_password)?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, auth.user_id, &password_hash).await?;

    Ok(Json(token_response(&state, &auth.user)?))
}

/// PUT /api/v1/auth/me/photo
///
/// Multipart upload with a single `photo` field (PNG or JPEG, at most 2 MiB).
/// The file is written under `<upload_dir>/profile-photos/` and served at
/// `/uploads/profile-photos/<file>`.
pub async fn upload_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let mut photo: Option<(&'static str, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("photo") {
            continue;
        }
        let extension = match field.content_type() {
            Some("image/png") => "png",
            Some("image/jpeg") | Some("image/jpg") => "jpg",
            _ => {
                return Err(AppError::BadRequest(
                    "Only PNG and JPEG images are allowed".into(),
                ))
            }
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        if data.len() > MAX_PHOTO_BYTES {
            return Err(AppError::BadRequest("Photo must be at most 2 MB".into()));
        }
        photo = Some((extension, data.to_vec()));
    }

    let (extension, data) = photo.ok_or_else(|| AppError::BadRequest("No file uploaded".into()))?;

    let dir = state.config.upload_dir.join("profile-photos");
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    let file_name = format!("user_{}_{}.{extension}", auth.user_id, uuid::Uuid::new_v4());
    tokio::fs::write(dir.join(&file_name), &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to write photo: {e}")))?;

    let public_path = format!("/uploads/profile-photos/{file_name}");
    let user = UserRepo::set_profile_image(&state.pool, auth.user_id, &public_path)
        .await?
        .ok_or(AppError::not_found("User", auth.user_id))?;

    tracing::info!(user_id = auth.user_id, path = %public_path, "Profile photo updated");
    Ok(Json(DataResponse::new(UserResponse::from(&user))))
}
