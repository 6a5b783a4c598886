use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use super::AppState;
use crate::api::models::{UpdateRequest, UpdateResponse};
use crate::error::{AppError, Result};
use crate::models::{DeviceView, TelemetryReport};

/// GET /api/bornes
pub async fn list_bornes(State(state): State<AppState>) -> Result<Json<Vec<DeviceView>>> {
    let devices = state.devices.list_all().await?;
    tracing::debug!(count = devices.len(), "listed devices");
    Ok(Json(devices))
}

/// POST /api/update
pub async fn update(
    State(state): State<AppState>,
    body: std::result::Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<UpdateResponse>> {
    let Json(payload) = body?;

    let report = TelemetryReport {
        device_id: payload
            .device_id
            .ok_or_else(|| AppError::Validation("deviceId is required".into()))?,
        fill_level: payload
            .fill_level
            .ok_or_else(|| AppError::Validation("fillLevel is required".into()))?,
        battery_level: payload
            .battery_level
            .ok_or_else(|| AppError::Validation("batteryLevel is required".into()))?,
    };

    state.devices.upsert(report).await?;

    Ok(Json(UpdateResponse {
        message: "Data received and stored".into(),
    }))
}
