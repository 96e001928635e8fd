//! Equipment type endpoints

use axum::{extract::State, Json};

use crate::{error::AppResult, models::equipment_type::EquipmentType};

/// List equipment types, used to populate the type selector
#[utoipa::path(
    get,
    path = "/equipment-types",
    tag = "equipment-types",
    responses(
        (status = 200, description = "All equipment types", body = Vec<EquipmentType>)
    )
)]
pub async fn list_equipment_types(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<EquipmentType>>> {
    let types = state.services.equipment_types.list().await?;
    Ok(Json(types))
}
