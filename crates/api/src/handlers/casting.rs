//! Handlers for the `/casting` resource.
//!
//! Listing and detail are public and hide calls whose audition date has
//! passed. Mutations are restricted to the producer that posted the call.

use actory_core::casting::{
    normalize_skills, validate_age_range, validate_height_range, validate_schedule,
    ScheduleChanges,
};
use actory_core::types::DbId;
use actory_db::models::casting_call::{
    CastingCall, CastingCallWithProducer, CreateCastingCall, UpdateCastingCall,
};
use actory_db::repositories::CastingCallRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireProducer;
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a call and check that `producer_id` posted it.
pub(crate) async fn ensure_call_owner(
    state: &AppState,
    call_id: DbId,
    producer_id: DbId,
) -> AppResult<CastingCall> {
    let call = CastingCallRepo::find_by_id(&state.pool, call_id)
        .await?
        .ok_or(AppError::not_found("CastingCall", call_id))?;
    if call.producer_id != producer_id {
        return Err(AppError::forbidden(
            "Not authorized to modify this casting call",
        ));
    }
    Ok(call)
}

fn require_text(value: &str, label: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{label} is required")));
    }
    Ok(())
}

/// Validate `patch` as applied on top of `call`: schedule, age and height
/// ranges are checked in their merged form.
pub(crate) fn validate_call_update(call: &CastingCall, patch: &UpdateCastingCall) -> AppResult<()> {
    if let Some(role_name) = &patch.role_name {
        require_text(role_name, "Role name")?;
    }
    if let Some(description) = &patch.description {
        require_text(description, "Description")?;
    }
    if let Some(location) = &patch.location {
        require_text(location, "Location")?;
    }

    validate_age_range(
        patch.age_min.unwrap_or(call.age_min),
        patch.age_max.unwrap_or(call.age_max),
    )?;
    validate_height_range(
        patch.height_min_cm.or(call.height_min_cm),
        patch.height_max_cm.or(call.height_max_cm),
    )?;

    let changes = ScheduleChanges {
        submission_deadline: patch.submission_deadline,
        audition_date: patch.audition_date,
        shoot_start_date: patch.shoot_start_date,
        shoot_end_date: patch.shoot_end_date,
    };
    if !changes.is_empty() {
        validate_schedule(&call.schedule().merge(&changes), Utc::now())?;
    }
    Ok(())
}

/// Trim a patch's skills in place.
pub(crate) fn normalize_update(mut patch: UpdateCastingCall) -> UpdateCastingCall {
    patch.skills = patch.skills.map(|s| normalize_skills(&s));
    patch
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/casting
pub async fn list_open(
    State(state): State<AppState>,
) -> AppResult<Json<ListResponse<CastingCallWithProducer>>> {
    let calls = CastingCallRepo::list_open(&state.pool, Utc::now()).await?;
    Ok(Json(ListResponse::new(calls)))
}

/// POST /api/v1/casting
pub async fn create(
    State(state): State<AppState>,
    RequireProducer(producer): RequireProducer,
    AppJson(mut input): AppJson<CreateCastingCall>,
) -> AppResult<(StatusCode, Json<DataResponse<CastingCall>>)> {
    require_text(&input.role_name, "Role name")?;
    require_text(&input.description, "Description")?;
    require_text(&input.location, "Location")?;
    validate_age_range(input.age_min, input.age_max)?;
    validate_height_range(input.height_min_cm, input.height_max_cm)?;
    validate_schedule(&input.schedule(), Utc::now())?;
    input.skills = normalize_skills(&input.skills);

    let call = CastingCallRepo::create(&state.pool, producer.user_id, &input).await?;

    tracing::info!(
        call_id = call.id,
        producer_id = producer.user_id,
        role_name = %call.role_name,
        "Casting call created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(call))))
}

/// GET /api/v1/casting/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CastingCallWithProducer>>> {
    let call = CastingCallRepo::find_open(&state.pool, id, Utc::now())
        .await?
        .ok_or(AppError::not_found("CastingCall", id))?;
    Ok(Json(DataResponse::new(call)))
}

/// PUT /api/v1/casting/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireProducer(producer): RequireProducer,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateCastingCall>,
) -> AppResult<Json<DataResponse<CastingCall>>> {
    let call = ensure_call_owner(&state, id, producer.user_id).await?;
    validate_call_update(&call, &input)?;

    let updated = CastingCallRepo::update(&state.pool, id, &normalize_update(input))
        .await?
        .ok_or(AppError::not_found("CastingCall", id))?;
    Ok(Json(DataResponse::new(updated)))
}

/// DELETE /api/v1/casting/{id}
///
/// Submissions for the call are removed with it.
pub async fn delete(
    State(state): State<AppState>,
    RequireProducer(producer): RequireProducer,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    ensure_call_owner(&state, id, producer.user_id).await?;

    if !CastingCallRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("CastingCall", id));
    }
    tracing::info!(call_id = id, producer_id = producer.user_id, "Casting call deleted");
    Ok(Json(MessageResponse::new("Casting call deleted")))
}
