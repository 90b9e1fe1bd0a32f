use crate::error::AppError;
use crate::identity::CurrentUser;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Json},
};
use cropwise_core::error::{CropwiseError, FieldIssue};
use cropwise_core::history::HistoryRecord;
use cropwise_core::model::WeatherReport;
use cropwise_core::rules::schema::CropTableDef;
use cropwise_core::scoring::PredictionResult;
use cropwise_core::LocatedPrediction;
use serde_json::Value;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "weatherBackend": state.service.weather_backend(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn predict(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    body: Bytes,
) -> Result<Json<PredictionResult>, AppError> {
    let body = parse_body(&body)?;
    let result = state.service.predict(&body, user.as_ref()).await?;
    Ok(Json(result))
}

/// Body: `{ "soil": {...}, "location": { "lat": .., "lon": .. } }`.
pub async fn predict_at_location(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    body: Bytes,
) -> Result<Json<LocatedPrediction>, AppError> {
    let body = parse_body(&body)?;
    let located = state
        .service
        .predict_at(&body["soil"], &body["location"], user.as_ref())
        .await?;
    Ok(Json(located))
}

pub async fn weather(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<WeatherReport>, AppError> {
    let body = parse_body(&body)?;
    let report = state.service.weather(&body).await?;
    Ok(Json(report))
}

pub async fn history(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<HistoryRecord>>, AppError> {
    let user = user.ok_or(AppError::Unauthorized)?;
    let records = state.service.history(&user).await?;
    Ok(Json(records))
}

pub async fn crops(State(state): State<AppState>) -> Json<CropTableDef> {
    Json(state.service.table().clone())
}

/// Malformed JSON is reported like any other invalid input.
fn parse_body(bytes: &Bytes) -> Result<Value, AppError> {
    serde_json::from_slice(bytes).map_err(|e| {
        AppError::Core(CropwiseError::Validation(vec![FieldIssue {
            field: "body".into(),
            reason: e.to_string(),
        }]))
    })
}
