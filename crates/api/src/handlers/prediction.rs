//! Audition attendance prediction.

use actory_core::attendance::{predict as predict_attendance, AttendanceInput, AttendancePrediction};
use axum::Json;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::DataResponse;

/// POST /api/v1/prediction/predict
///
/// Body and response use camelCase keys (`daysUntil`, `willAttend`, ...).
pub async fn predict(
    AppJson(input): AppJson<AttendanceInput>,
) -> AppResult<Json<DataResponse<AttendancePrediction>>> {
    let prediction = predict_attendance(&input)?;
    tracing::debug!(
        will_attend = prediction.will_attend,
        confidence = prediction.confidence,
        "Attendance predicted",
    );
    Ok(Json(DataResponse::new(prediction)))
}
