use crate::dtos::StatusCheckCreate;
use crate::models::StatusCheck;
use crate::services::STATUS_LIST_LIMIT;
use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use service_core::error::AppError;
use validator::Validate;

pub async fn create_status_check(
    State(state): State<AppState>,
    Json(payload): Json<StatusCheckCreate>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let check = StatusCheck::new(payload.client_name);
    state.store.insert_status_check(&check).await?;

    tracing::info!(id = %check.id, client_name = %check.client_name, "Status check recorded");

    Ok(Json(check))
}

pub async fn list_status_checks(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let checks = state.store.list_status_checks(STATUS_LIST_LIMIT).await?;
    Ok(Json(checks))
}
