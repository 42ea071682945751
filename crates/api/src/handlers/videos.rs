//! Handlers for audition submissions.
//!
//! Submissions are created and listed under `/casting/{id}/videos`; the
//! actor's own list, producer review and withdrawal live under `/videos`.

use actory_core::casting::accepts_submissions;
use actory_core::submission::{
    validate_physical, validate_submission_skills, PhysicalAttributes, SubmissionStatus,
};
use actory_core::types::DbId;
use actory_core::users::normalize_email;
use actory_db::models::video::{CreateVideo, Video, VideoWithContext};
use actory_db::repositories::{CastingCallRepo, VideoRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use validator::Validate;

use crate::config::MediaConfig;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, ValidJson};
use crate::handlers::casting::ensure_call_owner;
use crate::middleware::rbac::{RequireActor, RequireProducer};
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;

/// Folder on the media host that audition uploads land in.
pub const UPLOAD_FOLDER: &str = "actory/auditions";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

/// Parameters the browser needs to upload straight to the media host.
#[derive(Debug, Serialize)]
pub struct UploadSignature {
    pub cloud_name: String,
    pub api_key: String,
    pub timestamp: i64,
    pub folder: &'static str,
    pub signature: String,
    pub signature_algorithm: &'static str,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Hex SHA-256 over the sorted upload parameters followed by the API secret.
pub fn sign_upload_params(folder: &str, timestamp: i64, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("folder={folder}&timestamp={timestamp}{api_secret}").as_bytes());
    format!("{:x}", hasher.finalize())
}

fn build_upload_signature(media: &MediaConfig, timestamp: i64) -> UploadSignature {
    UploadSignature {
        cloud_name: media.cloud_name.clone(),
        api_key: media.api_key.clone(),
        timestamp,
        folder: UPLOAD_FOLDER,
        signature: sign_upload_params(UPLOAD_FOLDER, timestamp, &media.api_secret),
        signature_algorithm: "sha256",
    }
}

fn require_text(value: &str, label: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{label} is required")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/casting/{id}/videos
pub async fn list_for_call(
    State(state): State<AppState>,
    RequireProducer(producer): RequireProducer,
    Path(call_id): Path<DbId>,
) -> AppResult<Json<ListResponse<VideoWithContext>>> {
    ensure_call_owner(&state, call_id, producer.user_id).await?;
    let videos = VideoRepo::list_for_call(&state.pool, call_id).await?;
    Ok(Json(ListResponse::new(videos)))
}

/// POST /api/v1/casting/{id}/videos
pub async fn submit(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(call_id): Path<DbId>,
    AppJson(mut input): AppJson<CreateVideo>,
) -> AppResult<(StatusCode, Json<DataResponse<Video>>)> {
    let call = CastingCallRepo::find_by_id(&state.pool, call_id)
        .await?
        .ok_or(AppError::not_found("CastingCall", call_id))?;
    if !accepts_submissions(call.submission_deadline, Utc::now()) {
        return Err(AppError::validation(
            "The submission deadline for this casting call has passed",
        ));
    }

    require_text(&input.title, "Title")?;
    require_text(&input.video_url, "Video URL")?;
    require_text(&input.permanent_address, "Permanent address")?;
    require_text(&input.living_city, "Living city")?;
    require_text(&input.phone_number, "Phone number")?;
    validate_physical(&PhysicalAttributes {
        height_cm: input.height_cm,
        weight_kg: input.weight_kg,
        age: input.age,
        skin_tone: &input.skin_tone,
    })?;
    input.skills = validate_submission_skills(&input.skills)?;
    input.email = input
        .email
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .map(normalize_email)
        .transpose()?;

    let video = VideoRepo::create(&state.pool, actor.user_id, call_id, &input).await?;

    tracing::info!(
        video_id = video.id,
        call_id,
        actor_id = actor.user_id,
        "Audition submitted",
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(video))))
}

/// GET /api/v1/videos/mine
pub async fn mine(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
) -> AppResult<Json<ListResponse<VideoWithContext>>> {
    let videos = VideoRepo::list_for_actor(&state.pool, actor.user_id).await?;
    Ok(Json(ListResponse::new(videos)))
}

/// PATCH /api/v1/videos/{id}/status
///
/// Only the producer owning the submission's casting call may review it.
pub async fn update_status(
    State(state): State<AppState>,
    RequireProducer(producer): RequireProducer,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateStatusRequest>,
) -> AppResult<Json<DataResponse<Video>>> {
    let status: SubmissionStatus = input.status.parse()?;

    let video = VideoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Video", id))?;
    let call = CastingCallRepo::find_by_id(&state.pool, video.casting_call_id)
        .await?
        .ok_or(AppError::not_found("CastingCall", video.casting_call_id))?;
    if call.producer_id != producer.user_id {
        return Err(AppError::forbidden(
            "Not authorized to update this video status",
        ));
    }

    let updated = VideoRepo::update_status(&state.pool, id, status.as_str())
        .await?
        .ok_or(AppError::not_found("Video", id))?;

    tracing::info!(
        video_id = id,
        status = %status,
        producer_id = producer.user_id,
        "Submission reviewed",
    );
    Ok(Json(DataResponse::new(updated)))
}

/// DELETE /api/v1/videos/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let video = VideoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Video", id))?;
    if video.actor_id != actor.user_id {
        return Err(AppError::forbidden("Not authorized to delete this video"));
    }

    VideoRepo::delete(&state.pool, id).await?;
    Ok(Json(MessageResponse::new("Video deleted")))
}

/// GET /api/v1/videos/upload-signature
pub async fn upload_signature(
    State(state): State<AppState>,
    RequireActor(_actor): RequireActor,
) -> AppResult<Json<DataResponse<UploadSignature>>> {
    let media = state
        .config
        .media
        .as_ref()
        .ok_or_else(|| AppError::InternalError("Media upload signing is not configured".into()))?;
    Ok(Json(DataResponse::new(build_upload_signature(
        media,
        Utc::now().timestamp(),
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_hex_sha256() {
        let sig = sign_upload_params(UPLOAD_FOLDER, 1_700_000_000, "secret");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn signature_depends_on_timestamp_and_secret() {
        let a = sign_upload_params(UPLOAD_FOLDER, 1, "secret");
        assert_ne!(a, sign_upload_params(UPLOAD_FOLDER, 2, "secret"));
        assert_ne!(a, sign_upload_params(UPLOAD_FOLDER, 1, "other"));
        assert_eq!(a, sign_upload_params(UPLOAD_FOLDER, 1, "secret"));
    }

    #[test]
    fn upload_signature_carries_public_credentials_only() {
        let media = MediaConfig {
            cloud_name: "demo".into(),
            api_key: "key".into(),
            api_secret: "shh".into(),
        };
        let sig = build_upload_signature(&media, 42);
        let json = serde_json::to_value(&sig).unwrap();
        assert_eq!(json["cloud_name"], "demo");
        assert_eq!(json["folder"], UPLOAD_FOLDER);
        assert!(!json.to_string().contains("shh"));
    }
}
