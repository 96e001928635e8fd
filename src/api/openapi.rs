//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{equipment, equipment_types, health, maintenance};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EquipTrack API",
        version = "1.0.0",
        description = "Equipment tracking and maintenance REST API"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Equipment types
        equipment_types::list_equipment_types,
        // Maintenance
        maintenance::log_maintenance,
        maintenance::maintenance_history,
    ),
    components(
        schemas(
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentRequest,
            crate::models::equipment::EquipmentStatus,
            crate::models::equipment::SortField,
            crate::models::equipment::SortDirection,
            crate::models::page::EquipmentPage,
            crate::models::equipment_type::EquipmentType,
            crate::models::maintenance::MaintenanceLog,
            crate::models::maintenance::MaintenanceRequest,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment management"),
        (name = "equipment-types", description = "Equipment type reference data"),
        (name = "maintenance", description = "Maintenance logging and history")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
