//! Actor self-service: requesting promotion to Producer.

use actory_core::role_switch::validate_reason;
use actory_db::models::role_switch_request::RoleSwitchRequest;
use actory_db::repositories::RoleSwitchRequestRepo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireActor;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SwitchRequestBody {
    #[serde(default)]
    pub reason: String,
}

/// POST /api/v1/actor/request-switch
///
/// At most one pending request per actor. The partial unique index on
/// `role_switch_requests` backs the pre-check up under concurrent requests.
pub async fn request_switch(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    AppJson(input): AppJson<SwitchRequestBody>,
) -> AppResult<(StatusCode, Json<DataResponse<RoleSwitchRequest>>)> {
    let reason = validate_reason(&input.reason)?;

    if RoleSwitchRequestRepo::find_pending_for_actor(&state.pool, actor.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::validation(
            "You already have a pending switch request",
        ));
    }

    let request = RoleSwitchRequestRepo::create(&state.pool, actor.user_id, &reason).await?;
    tracing::info!(request_id = request.id, actor_id = actor.user_id, "Role switch requested");
    Ok((StatusCode::CREATED, Json(DataResponse::new(request))))
}
