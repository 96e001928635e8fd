//! Maintenance service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::maintenance::{MaintenanceLog, MaintenanceRequest},
    repository::Repository,
};

#[derive(Clone)]
pub struct MaintenanceService {
    repository: Repository,
}

impl MaintenanceService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Record a maintenance event. The equipment becomes Active with its
    /// last cleaned date set to the maintenance date; the activation rule
    /// does not apply since the date is the cleaning itself.
    pub async fn log(&self, request: &MaintenanceRequest) -> AppResult<MaintenanceLog> {
        request.validate()?;

        let (Some(equipment_id), Some(maintenance_date), Some(performed_by)) = (
            request.equipment_id,
            request.maintenance_date,
            request.performed_by.as_deref(),
        ) else {
            return Err(AppError::Validation("Incomplete maintenance request".to_string()));
        };
        let notes = request
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        let log = self
            .repository
            .maintenance
            .record(equipment_id, maintenance_date, performed_by.trim(), notes)
            .await?;

        tracing::info!(
            equipment_id,
            log_id = log.id,
            %maintenance_date,
            "Maintenance logged, equipment set to Active"
        );
        Ok(log)
    }

    /// Maintenance history of one equipment, newest first
    pub async fn history(&self, equipment_id: i64) -> AppResult<Vec<MaintenanceLog>> {
        if !self.repository.equipment.exists(equipment_id).await? {
            return Err(AppError::not_found("Equipment", equipment_id));
        }
        self.repository.maintenance.list_for_equipment(equipment_id).await
    }
}
