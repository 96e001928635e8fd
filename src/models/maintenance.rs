//! Maintenance log model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::equipment::NOT_BLANK;

/// Maintenance log entry, joined with the equipment name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLog {
    pub id: i64,
    pub equipment_id: i64,
    pub equipment_name: String,
    pub maintenance_date: NaiveDate,
    pub notes: Option<String>,
    pub performed_by: String,
    pub created_at: DateTime<Utc>,
}

/// Log maintenance request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    #[validate(required(message = "Equipment ID is required"))]
    pub equipment_id: Option<i64>,
    #[validate(required(message = "Maintenance date is required"))]
    pub maintenance_date: Option<NaiveDate>,
    pub notes: Option<String>,
    #[validate(
        required(message = "Performed by is required"),
        regex(path = *NOT_BLANK, message = "Performed by is required"),
        length(max = 255, message = "Performed by must be at most 255 characters")
    )]
    pub performed_by: Option<String>,
}

impl MaintenanceRequest {
    pub fn new(
        equipment_id: i64,
        maintenance_date: NaiveDate,
        performed_by: impl Into<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            equipment_id: Some(equipment_id),
            maintenance_date: Some(maintenance_date),
            notes,
            performed_by: Some(performed_by.into()),
        }
    }
}
