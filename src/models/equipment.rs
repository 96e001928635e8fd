//! Equipment model

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Matches any string holding at least one non-whitespace character.
pub(crate) static NOT_BLANK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S").unwrap());

static STATUS_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(Active|Inactive|Under Maintenance)$").unwrap());

/// Default page size of the equipment listing
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Largest page size the listing endpoint will serve
pub const MAX_PAGE_SIZE: u32 = 100;

/// Equipment operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum EquipmentStatus {
    Active,
    Inactive,
    #[serde(rename = "Under Maintenance")]
    UnderMaintenance,
}

impl EquipmentStatus {
    pub const ALL: [EquipmentStatus; 3] = [
        EquipmentStatus::Active,
        EquipmentStatus::Inactive,
        EquipmentStatus::UnderMaintenance,
    ];

    /// Label stored in the database and exchanged over the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Active => "Active",
            EquipmentStatus::Inactive => "Inactive",
            EquipmentStatus::UnderMaintenance => "Under Maintenance",
        }
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown equipment status: {0}")]
pub struct UnknownStatus(pub String);

impl std::str::FromStr for EquipmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EquipmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl TryFrom<String> for EquipmentStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Equipment record, joined with its type name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: i64,
    pub name: String,
    pub type_id: i64,
    /// Display name of the referenced equipment type
    pub type_name: String,
    #[sqlx(try_from = "String")]
    pub status: EquipmentStatus,
    pub last_cleaned_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create or update equipment request.
///
/// Fields are optional on the wire so that missing values come back as
/// per-field validation errors instead of a body rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRequest {
    #[validate(
        required(message = "Equipment name is required"),
        regex(path = *NOT_BLANK, message = "Equipment name is required"),
        length(max = 255, message = "Equipment name must be at most 255 characters")
    )]
    pub name: Option<String>,
    #[validate(required(message = "Equipment type is required"))]
    pub type_id: Option<i64>,
    /// One of `Active`, `Inactive`, `Under Maintenance`
    #[validate(
        required(message = "Status is required"),
        regex(
            path = *STATUS_VALUE,
            message = "Status must be one of: Active, Inactive, Under Maintenance"
        )
    )]
    pub status: Option<String>,
    pub last_cleaned_date: Option<NaiveDate>,
}

impl EquipmentRequest {
    pub fn new(
        name: impl Into<String>,
        type_id: i64,
        status: EquipmentStatus,
        last_cleaned_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            type_id: Some(type_id),
            status: Some(status.as_str().to_string()),
            last_cleaned_date,
        }
    }
}

/// Columns the listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    TypeName,
    Status,
    LastCleanedDate,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// SQL expression the field orders by
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Name => "e.name",
            SortField::TypeName => "t.name",
            SortField::Status => "e.status",
            SortField::LastCleanedDate => "e.last_cleaned_date",
            SortField::CreatedAt => "e.created_at",
            SortField::UpdatedAt => "e.updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Equipment listing parameters.
///
/// Used both as the listing endpoint's query string and as the console's
/// list query key. Page index is zero-based.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, IntoParams)]
#[serde(default, rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Case-insensitive substring of the equipment name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search: String,
    /// Restrict to one status; blank means every status
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[param(value_type = Option<String>)]
    pub status: Option<EquipmentStatus>,
    pub page: u32,
    pub size: u32,
    #[param(value_type = Option<String>)]
    pub sort_by: SortField,
    #[param(value_type = Option<String>)]
    pub sort_dir: SortDirection,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: None,
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort_by: SortField::default(),
            sort_dir: SortDirection::default(),
        }
    }
}

impl ListParams {
    /// Trimmed search term, `None` when blank
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }

    /// Page size clamped to the served range
    pub fn effective_size(&self) -> u32 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }
}
