//! Equipment types service

use crate::{error::AppResult, models::equipment_type::EquipmentType, repository::Repository};

#[derive(Clone)]
pub struct EquipmentTypesService {
    repository: Repository,
}

impl EquipmentTypesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<EquipmentType>> {
        self.repository.equipment_types.list().await
    }
}
