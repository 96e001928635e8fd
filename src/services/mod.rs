//! Business logic services

pub mod equipment;
pub mod equipment_types;
pub mod maintenance;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
    pub equipment_types: equipment_types::EquipmentTypesService,
    pub maintenance: maintenance::MaintenanceService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            equipment: equipment::EquipmentService::new(repository.clone()),
            equipment_types: equipment_types::EquipmentTypesService::new(repository.clone()),
            maintenance: maintenance::MaintenanceService::new(repository.clone()),
            repository,
        }
    }

    /// Whether the database answers
    pub async fn is_ready(&self) -> bool {
        match self.repository.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Readiness check failed: {}", e);
                false
            }
        }
    }
}
