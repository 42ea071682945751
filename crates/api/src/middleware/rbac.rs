//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! match. Roles are exclusive: an admin is not implicitly a producer.

use actory_core::error::CoreError;
use actory_core::roles::Role;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    role: Role,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if user.role != role {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "User role {} is not authorized to access this route",
            user.role
        ))));
    }
    Ok(user)
}

/// Requires the `Actor` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn actor_only(RequireActor(user): RequireActor) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireActor(pub AuthUser);

impl FromRequestParts<AppState> for RequireActor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, Role::Actor).await.map(RequireActor)
    }
}

/// Requires the `Producer` role. Rejects with 403 Forbidden otherwise.
pub struct RequireProducer(pub AuthUser);

impl FromRequestParts<AppState> for RequireProducer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, Role::Producer)
            .await
            .map(RequireProducer)
    }
}

/// Requires the `Admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, Role::Admin).await.map(RequireAdmin)
    }
}
