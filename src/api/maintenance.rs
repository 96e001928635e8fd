//! Maintenance endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::maintenance::{MaintenanceLog, MaintenanceRequest},
};

use super::ApiJson;

/// Log a maintenance event; the equipment becomes Active
#[utoipa::path(
    post,
    path = "/maintenance",
    tag = "maintenance",
    request_body = MaintenanceRequest,
    responses(
        (status = 201, description = "Maintenance logged", body = MaintenanceLog),
        (status = 400, description = "Invalid fields", body = crate::error::ErrorResponse),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn log_maintenance(
    State(state): State<crate::AppState>,
    ApiJson(data): ApiJson<MaintenanceRequest>,
) -> AppResult<(StatusCode, Json<MaintenanceLog>)> {
    let log = state.services.maintenance.log(&data).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// Maintenance history of one equipment, newest first
#[utoipa::path(
    get,
    path = "/equipment/{id}/maintenance",
    tag = "maintenance",
    params(("id" = i64, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Maintenance history", body = Vec<MaintenanceLog>),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn maintenance_history(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<MaintenanceLog>>> {
    let history = state.services.maintenance.history(id).await?;
    Ok(Json(history))
}
