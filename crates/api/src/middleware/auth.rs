//! JWT-based authentication extractors for Axum handlers.

use std::convert::Infallible;

use actory_core::error::CoreError;
use actory_core::roles::Role;
use actory_core::types::DbId;
use actory_db::models::user::User;
use actory_db::repositories::UserRepo;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from a JWT.
///
/// The token is read from `Authorization: Bearer <token>`, falling back to a
/// `?token=` query parameter for contexts that cannot set headers (media
/// embeds, WebSocket upgrades). The user row is loaded on every request so
/// role changes and deletions apply immediately.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user_id, role = %auth.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's current role.
    pub role: Role,
    /// The full user row.
    pub user: User,
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Pull the raw token out of the request, header first.
fn bearer_token(parts: &Parts) -> Option<String> {
    let from_header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    from_header.or_else(|| {
        Query::<TokenQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.token)
            .filter(|t| !t.is_empty())
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Not authorized to access this route".into(),
            ))
        })?;

        let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Forbidden(
                    "User for this token no longer exists".into(),
                ))
            })?;

        let role: Role = user.role.parse().map_err(|_| {
            AppError::InternalError(format!("User {} has unknown role '{}'", user.id, user.role))
        })?;

        Ok(AuthUser {
            user_id: user.id,
            role,
            user,
        })
    }
}

/// Optional authentication: `Some` for a valid token of an existing user,
/// `None` otherwise. Never rejects the request.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(MaybeAuthUser(Some(user))),
            Err(AppError::Database(e)) => {
                tracing::warn!(error = %e, "Optional auth lookup failed");
                Ok(MaybeAuthUser(None))
            }
            Err(_) => Ok(MaybeAuthUser(None)),
        }
    }
}
