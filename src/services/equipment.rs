//! Equipment service

use chrono::{NaiveDate, Utc};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{Equipment, EquipmentRequest, EquipmentStatus, ListParams},
        page::Page,
    },
    repository::Repository,
};

/// Equipment may only be Active if cleaned within this many days
pub const MAX_DAYS_SINCE_CLEANING: i64 = 30;

/// Enforce the activation rule: Active requires a last cleaned date no
/// older than [`MAX_DAYS_SINCE_CLEANING`] days before `today`.
pub fn check_activation(
    status: EquipmentStatus,
    last_cleaned_date: Option<NaiveDate>,
    today: NaiveDate,
) -> AppResult<()> {
    if status != EquipmentStatus::Active {
        return Ok(());
    }
    let Some(cleaned) = last_cleaned_date else {
        return Err(AppError::BusinessRule(
            "Cannot set status to 'Active': Last Cleaned Date is required when activating equipment."
                .to_string(),
        ));
    };
    let days_since = (today - cleaned).num_days();
    if days_since > MAX_DAYS_SINCE_CLEANING {
        return Err(AppError::BusinessRule(format!(
            "Cannot set status to 'Active': Last Cleaned Date is {} days ago. \
             Equipment must have been cleaned within the last {} days to be marked Active.",
            days_since, MAX_DAYS_SINCE_CLEANING
        )));
    }
    Ok(())
}

/// Request fields after validation
struct EquipmentFields {
    name: String,
    type_id: i64,
    status: EquipmentStatus,
    last_cleaned_date: Option<NaiveDate>,
}

impl TryFrom<&EquipmentRequest> for EquipmentFields {
    type Error = AppError;

    fn try_from(request: &EquipmentRequest) -> AppResult<Self> {
        request.validate()?;

        let (Some(name), Some(type_id), Some(status)) =
            (request.name.as_deref(), request.type_id, request.status.as_deref())
        else {
            return Err(AppError::Validation("Incomplete equipment request".to_string()));
        };
        let status = status
            .parse::<EquipmentStatus>()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(Self {
            name: name.trim().to_string(),
            type_id,
            status,
            last_cleaned_date: request.last_cleaned_date,
        })
    }
}

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Paginated, filtered, sorted listing
    pub async fn list(&self, params: &ListParams) -> AppResult<Page<Equipment>> {
        let (content, total) = self.repository.equipment.list(params).await?;
        Ok(Page::new(content, params.page, params.effective_size(), total))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, request: &EquipmentRequest) -> AppResult<Equipment> {
        let fields = self.checked(request).await?;
        let equipment = self
            .repository
            .equipment
            .create(&fields.name, fields.type_id, fields.status, fields.last_cleaned_date)
            .await?;
        tracing::info!(id = equipment.id, name = %equipment.name, "Equipment created");
        Ok(equipment)
    }

    pub async fn update(&self, id: i64, request: &EquipmentRequest) -> AppResult<Equipment> {
        let fields = self.checked(request).await?;
        let equipment = self
            .repository
            .equipment
            .update(id, &fields.name, fields.type_id, fields.status, fields.last_cleaned_date)
            .await?;
        tracing::info!(id, status = %equipment.status, "Equipment updated");
        Ok(equipment)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.equipment.delete(id).await?;
        tracing::info!(id, "Equipment deleted");
        Ok(())
    }

    /// Validate the request, resolve its type, then apply the activation rule
    async fn checked(&self, request: &EquipmentRequest) -> AppResult<EquipmentFields> {
        let fields = EquipmentFields::try_from(request)?;
        self.repository.equipment_types.get_by_id(fields.type_id).await?;
        check_activation(fields.status, fields.last_cleaned_date, Utc::now().date_naive())?;
        Ok(fields)
    }
}
