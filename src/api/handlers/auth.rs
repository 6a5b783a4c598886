use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use super::AppState;
use crate::api::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::error::{AppError, Result};
use crate::models::Role;

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    body: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(payload) = body?;

    let user = state
        .accounts
        .authenticate(&payload.login, &payload.secret)
        .await
        .inspect_err(|e| {
            if matches!(e, AppError::Authentication) {
                tracing::info!(login = %payload.login, "login rejected");
            }
        })?;

    tracing::info!(
        login = %payload.login,
        display_name = %user.display_name,
        role = %user.role,
        "login succeeded"
    );

    Ok(Json(LoginResponse {
        success: true,
        role: user.role,
        display_name: user.display_name,
        id: user.id,
    }))
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    body: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let Json(payload) = body?;

    let login = required(payload.login, "login")?;
    let secret = required(payload.secret, "secret")?;
    let display_name = required(payload.display_name, "displayName")?;
    let role = required(payload.role, "role")?
        .parse::<Role>()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let id = state
        .accounts
        .register(&login, &secret, &display_name, role)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "User registered".into(),
            id,
        }),
    ))
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}
