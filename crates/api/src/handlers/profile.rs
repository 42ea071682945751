//! Handlers for the `/profile` resource: portfolio pages, portfolio videos,
//! search and follows.

use actory_core::casting::normalize_skills;
use actory_core::profile_video::{resolve_title, validate_category, validate_description};
use actory_core::types::{DbId, Timestamp};
use actory_db::models::profile_video::{CreateProfileVideo, ProfileStats, ProfileVideo};
use actory_db::models::user::{UpdateUser, User, UserResponse, UserSummary};
use actory_db::repositories::{FollowRepo, ProfileVideoRepo, UserRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::auth::validate_merged_profile;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::rbac::{RequireActor, RequireAdmin};
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// The caller's own profile page.
#[derive(Debug, Serialize)]
pub struct MyProfile {
    pub user: UserResponse,
    pub videos: Vec<ProfileVideo>,
    pub stats: ProfileStats,
}

/// Fields of a user that anyone may see. Contact details are left out.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: DbId,
    pub name: String,
    pub role: String,
    pub location: Option<String>,
    pub experience_level: Option<String>,
    pub bio: Option<String>,
    pub profile_image: String,
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub skills: Vec<String>,
    pub is_verified: bool,
    pub created_at: Timestamp,
}

impl From<&User> for PublicUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            role: u.role.clone(),
            location: u.location.clone(),
            experience_level: u.experience_level.clone(),
            bio: u.bio.clone(),
            profile_image: u.profile_image.clone(),
            company_name: u.company_name.clone(),
            website: u.website.clone(),
            skills: u.skills.clone(),
            is_verified: u.is_verified,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PublicProfile {
    pub user: PublicUser,
    pub videos: Vec<ProfileVideo>,
    pub stats: ProfileStats,
    /// Whether the signed-in caller follows this user; `false` when anonymous.
    pub is_following: bool,
}

/// Portfolio fields a user may edit from their profile page.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience_level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddVideoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub duration_secs: Option<i32>,
}

fn default_category() -> String {
    "Other".to_string()
}

#[derive(Debug, Serialize)]
pub struct ViewCount {
    pub views: i32,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/profile/me
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<MyProfile>>> {
    let videos = ProfileVideoRepo::list_for_user(&state.pool, auth.user_id, false).await?;
    let stats = ProfileVideoRepo::stats(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse::new(MyProfile {
        user: UserResponse::from(&auth.user),
        videos,
        stats,
    })))
}

/// PUT /api/v1/profile/me
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<UpdateProfileRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let patch = UpdateUser {
        bio: input.bio,
        location: input.location,
        skills: input.skills.map(|s| normalize_skills(&s)),
        experience_level: input.experience_level,
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

/// GET /api/v1/profile/search?username=
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ListResponse<UserSummary>>> {
    let term = query
        .username
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::validation("Username query is required"))?;

    let users = UserRepo::search(&state.pool, term).await?;
    Ok(Json(ListResponse::new(users)))
}

/// GET /api/v1/profile/{id}
pub async fn get_public(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PublicProfile>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("User", id))?;

    let videos = ProfileVideoRepo::list_for_user(&state.pool, id, true).await?;
    let stats = ProfileVideoRepo::stats(&state.pool, id).await?;
    let is_following = match viewer {
        Some(viewer) if viewer.user_id != id => {
            FollowRepo::is_following(&state.pool, viewer.user_id, id).await?
        }
        _ => false,
    };

    Ok(Json(DataResponse::new(PublicProfile {
        user: PublicUser::from(&user),
        videos,
        stats,
        is_following,
    })))
}

/// POST /api/v1/profile/videos
///
/// Records metadata for a video already uploaded to the media host.
pub async fn add_video(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    AppJson(input): AppJson<AddVideoRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ProfileVideo>>)> {
    if input.url.trim().is_empty() {
        return Err(AppError::validation("Video URL is required"));
    }
    validate_category(&input.category)?;
    validate_description(input.description.as_deref())?;
    let title = resolve_title(input.title.as_deref(), input.description.as_deref())?;
    if matches!(input.duration_secs, Some(d) if d < 0) {
        return Err(AppError::validation("Duration cannot be negative"));
    }

    let video = ProfileVideoRepo::create(
        &state.pool,
        &CreateProfileVideo {
            user_id: actor.user_id,
            title,
            description: input.description,
            category: input.category,
            url: input.url.trim().to_string(),
            thumbnail_url: input.thumbnail_url,
            duration_secs: input.duration_secs,
        },
    )
    .await?;

    tracing::info!(video_id = video.id, user_id = actor.user_id, "Profile video added");
    Ok((StatusCode::CREATED, Json(DataResponse::new(video))))
}

/// PUT /api/v1/profile/videos/{id}/view
pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ViewCount>>> {
    let views = ProfileVideoRepo::increment_views(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("ProfileVideo", id))?;
    Ok(Json(DataResponse::new(ViewCount { views })))
}

/// DELETE /api/v1/profile/videos/{id}
pub async fn delete_video(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !ProfileVideoRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("ProfileVideo", id));
    }
    tracing::info!(video_id = id, admin_id = admin.user_id, "Profile video removed");
    Ok(Json(MessageResponse::new("Video deleted")))
}

/// POST /api/v1/profile/{id}/follow
pub async fn follow(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if id == auth.user_id {
        return Err(AppError::validation("You cannot follow yourself"));
    }
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("User", id))?;

    FollowRepo::follow(&state.pool, auth.user_id, id).await?;
    Ok(Json(MessageResponse::new("Followed")))
}

/// DELETE /api/v1/profile/{id}/unfollow
pub async fn unfollow(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    FollowRepo::unfollow(&state.pool, auth.user_id, id).await?;
    Ok(Json(MessageResponse::new("Unfollowed")))
}
