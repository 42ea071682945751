//! Admin-only handlers: role switch review and moderation of users, casting
//! calls and submissions.
//!
//! Every handler takes [`RequireAdmin`]; the admin's own id is recorded on
//! reviewed switch requests.

use actory_core::role_switch::{SwitchDecision, SwitchStatus};
use actory_core::submission::SubmissionStatus;
use actory_core::types::DbId;
use actory_db::models::casting_call::{CastingCall, CastingCallWithProducer, UpdateCastingCall};
use actory_db::models::role_switch_request::{RoleSwitchRequest, RoleSwitchRequestWithActor};
use actory_db::models::user::{UpdateUser, UserResponse};
use actory_db::models::video::{UpdateVideo, Video, VideoWithContext};
use actory_db::repositories::{CastingCallRepo, RoleSwitchRequestRepo, UserRepo, VideoRepo};
use axum::extract::{Path, State};
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::auth::validate_merged_profile;
use crate::handlers::casting::{normalize_update, validate_call_update};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Role switch requests
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/switch-requests
pub async fn list_switch_requests(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ListResponse<RoleSwitchRequestWithActor>>> {
    let requests = RoleSwitchRequestRepo::list(&state.pool).await?;
    Ok(Json(ListResponse::new(requests)))
}

async fn review_switch_request(
    state: &AppState,
    admin_id: DbId,
    id: DbId,
    decision: SwitchDecision,
) -> AppResult<RoleSwitchRequest> {
    let request = RoleSwitchRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("RoleSwitchRequest", id))?;
    let current: SwitchStatus = request.status.parse()?;
    let outcome = current.review(decision)?;

    // Lost a race with another reviewer.
    let reviewed = RoleSwitchRequestRepo::review(&state.pool, id, outcome, admin_id)
        .await?
        .ok_or_else(|| AppError::validation("Request already reviewed"))?;

    tracing::info!(
        request_id = id,
        actor_id = reviewed.actor_id,
        admin_id,
        outcome = %outcome,
        "Role switch request reviewed",
    );
    Ok(reviewed)
}

/// PUT /api/v1/admin/switch-requests/{id}/approve
///
/// Promotes the requesting actor to Producer.
pub async fn approve_switch_request(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RoleSwitchRequest>>> {
    let request = review_switch_request(&state, admin.user_id, id, SwitchDecision::Approve).await?;
    Ok(Json(DataResponse::new(request)))
}

/// PUT /api/v1/admin/switch-requests/{id}/reject
pub async fn reject_switch_request(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RoleSwitchRequest>>> {
    let request = review_switch_request(&state, admin.user_id, id, SwitchDecision::Reject).await?;
    Ok(Json(DataResponse::new(request)))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ListResponse<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(ListResponse::new(
        users.iter().map(UserResponse::from).collect(),
    )))
}

/// PUT /api/v1/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateUser>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if input.is_empty() {
        return Err(AppError::validation("No valid fields provided"));
    }
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("User", id))?;
    validate_merged_profile(&user, &input)?;

    let updated = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("User", id))?;
    Ok(Json(DataResponse::new(UserResponse::from(&updated))))
}

/// DELETE /api/v1/admin/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if id == admin.user_id {
        return Err(AppError::validation("Admins cannot delete their own account"));
    }
    if !UserRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("User", id));
    }
    tracing::info!(user_id = id, admin_id = admin.user_id, "User deleted");
    Ok(Json(MessageResponse::new("User deleted")))
}

// ---------------------------------------------------------------------------
// Casting calls
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/castingcalls
///
/// Includes expired calls.
pub async fn list_casting_calls(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ListResponse<CastingCallWithProducer>>> {
    let calls = CastingCallRepo::list_all(&state.pool).await?;
    Ok(Json(ListResponse::new(calls)))
}

/// PUT /api/v1/admin/castingcalls/{id}
pub async fn update_casting_call(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateCastingCall>,
) -> AppResult<Json<DataResponse<CastingCall>>> {
    let call = CastingCallRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("CastingCall", id))?;
    validate_call_update(&call, &input)?;

    let updated = CastingCallRepo::update(&state.pool, id, &normalize_update(input))
        .await?
        .ok_or(AppError::not_found("CastingCall", id))?;
    Ok(Json(DataResponse::new(updated)))
}

/// DELETE /api/v1/admin/castingcalls/{id}
pub async fn delete_casting_call(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !CastingCallRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("CastingCall", id));
    }
    Ok(Json(MessageResponse::new("Casting call deleted")))
}

// ---------------------------------------------------------------------------
// Videos
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/videos
pub async fn list_videos(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ListResponse<VideoWithContext>>> {
    let videos = VideoRepo::list_all(&state.pool).await?;
    Ok(Json(ListResponse::new(videos)))
}

/// PUT /api/v1/admin/videos/{id}
pub async fn update_video(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateVideo>,
) -> AppResult<Json<DataResponse<Video>>> {
    if let Some(status) = &input.status {
        status.parse::<SubmissionStatus>()?;
    }
    if let Some(title) = &input.title {
        if title.trim().is_empty() {
            return Err(AppError::validation("Title is required"));
        }
    }

    let video = VideoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Video", id))?;
    Ok(Json(DataResponse::new(video)))
}

/// DELETE /api/v1/admin/videos/{id}
pub async fn delete_video(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !VideoRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Video", id));
    }
    Ok(Json(MessageResponse::new("Video deleted")))
}
