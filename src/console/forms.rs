//! Dialog state machines.
//!
//! Each dialog owns its field values, client-side validation errors and a
//! banner message. Rendering is left to the caller.

use chrono::NaiveDate;

use super::error::ClientError;
use crate::{
    error::FieldErrors,
    models::{Equipment, EquipmentRequest, EquipmentStatus, MaintenanceRequest},
};

/// Banner shown when the server rejected individual fields
pub const FIX_FIELDS_MESSAGE: &str = "Please fix the validation errors below.";
const SAVE_FAILED_MESSAGE: &str = "Something went wrong. Please try again.";
const LOG_FAILED_MESSAGE: &str = "Failed to log maintenance.";

/// Form inputs, keyed the way the service reports field errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    TypeId,
    Status,
    LastCleanedDate,
    MaintenanceDate,
    PerformedBy,
    Notes,
}

impl FormField {
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::TypeId => "typeId",
            FormField::Status => "status",
            FormField::LastCleanedDate => "lastCleanedDate",
            FormField::MaintenanceDate => "maintenanceDate",
            FormField::PerformedBy => "performedBy",
            FormField::Notes => "notes",
        }
    }
}

/// Errors and banner shared by every form
#[derive(Debug, Clone, Default, PartialEq)]
struct Feedback {
    errors: FieldErrors,
    banner: Option<String>,
}

impl Feedback {
    /// An edited field drops its own error and the banner
    fn touched(&mut self, field: FormField) {
        self.errors.remove(field.key());
        self.banner = None;
    }

    fn require(&mut self, ok: bool, field: FormField, message: &str) {
        if !ok {
            self.errors.insert(field.key().to_string(), message.to_string());
        }
    }

    fn rejected(&mut self, error: &ClientError, fallback: &str) {
        match error.field_errors() {
            Some(fields) => {
                self.errors = fields.clone();
                self.banner = Some(FIX_FIELDS_MESSAGE.to_string());
            }
            None => self.banner = Some(error.user_message(fallback)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: i64 },
}

/// Create/edit equipment form
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentForm {
    mode: FormMode,
    pub name: String,
    pub type_id: Option<i64>,
    pub status: Option<EquipmentStatus>,
    pub last_cleaned_date: Option<NaiveDate>,
    feedback: Feedback,
}

impl EquipmentForm {
    /// Blank form for registering equipment
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            name: String::new(),
            type_id: None,
            status: None,
            last_cleaned_date: None,
            feedback: Feedback::default(),
        }
    }

    /// Form pre-filled from an existing record
    pub fn edit(equipment: &Equipment) -> Self {
        Self {
            mode: FormMode::Edit { id: equipment.id },
            name: equipment.name.clone(),
            type_id: Some(equipment.type_id),
            status: Some(equipment.status),
            last_cleaned_date: equipment.last_cleaned_date,
            feedback: Feedback::default(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add New Equipment",
            FormMode::Edit { .. } => "Edit Equipment",
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.feedback.touched(FormField::Name);
    }

    pub fn set_type_id(&mut self, type_id: Option<i64>) {
        self.type_id = type_id;
        self.feedback.touched(FormField::TypeId);
    }

    pub fn set_status(&mut self, status: Option<EquipmentStatus>) {
        self.status = status;
        self.feedback.touched(FormField::Status);
    }

    pub fn set_last_cleaned_date(&mut self, date: Option<NaiveDate>) {
        self.last_cleaned_date = date;
        self.feedback.touched(FormField::LastCleanedDate);
    }

    /// Replace the field errors with the current ones; true when none
    pub fn validate(&mut self) -> bool {
        let mut feedback = Feedback::default();
        feedback.require(!self.name.trim().is_empty(), FormField::Name, "Equipment name is required");
        feedback.require(self.type_id.is_some(), FormField::TypeId, "Please select a type");
        feedback.require(self.status.is_some(), FormField::Status, "Please select a status");
        self.feedback = feedback;
        self.feedback.errors.is_empty()
    }

    /// Validated request body, or `None` when submission is blocked
    pub fn request(&mut self) -> Option<EquipmentRequest> {
        if !self.validate() {
            return None;
        }
        Some(EquipmentRequest::new(
            self.name.trim(),
            self.type_id?,
            self.status?,
            self.last_cleaned_date,
        ))
    }

    pub(crate) fn reject(&mut self, error: &ClientError) {
        self.feedback.rejected(error, SAVE_FAILED_MESSAGE);
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.feedback.errors
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.feedback.errors.get(field.key()).map(String::as_str)
    }

    pub fn banner(&self) -> Option<&str> {
        self.feedback.banner.as_deref()
    }
}

/// Log-maintenance form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceForm {
    pub maintenance_date: Option<NaiveDate>,
    pub performed_by: String,
    pub notes: String,
    feedback: Feedback,
}

impl MaintenanceForm {
    pub fn set_maintenance_date(&mut self, date: Option<NaiveDate>) {
        self.maintenance_date = date;
        self.feedback.touched(FormField::MaintenanceDate);
    }

    pub fn set_performed_by(&mut self, performed_by: impl Into<String>) {
        self.performed_by = performed_by.into();
        self.feedback.touched(FormField::PerformedBy);
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        self.feedback.touched(FormField::Notes);
    }

    pub fn validate(&mut self) -> bool {
        let mut feedback = Feedback::default();
        feedback.require(
            self.maintenance_date.is_some(),
            FormField::MaintenanceDate,
            "Date is required",
        );
        feedback.require(
            !self.performed_by.trim().is_empty(),
            FormField::PerformedBy,
            "Performed by is required",
        );
        self.feedback = feedback;
        self.feedback.errors.is_empty()
    }

    /// Validated request body for `equipment_id`, or `None` when blocked
    pub fn request(&mut self, equipment_id: i64) -> Option<MaintenanceRequest> {
        if !self.validate() {
            return None;
        }
        let notes = (!self.notes.is_empty()).then(|| self.notes.clone());
        Some(MaintenanceRequest::new(
            equipment_id,
            self.maintenance_date?,
            self.performed_by.trim(),
            notes,
        ))
    }

    pub(crate) fn reject(&mut self, error: &ClientError) {
        self.feedback.rejected(error, LOG_FAILED_MESSAGE);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.feedback.errors
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.feedback.errors.get(field.key()).map(String::as_str)
    }

    pub fn banner(&self) -> Option<&str> {
        self.feedback.banner.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaintenanceTab {
    #[default]
    Log,
    History,
}

/// Maintenance dialog for one equipment: log form plus history tab
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceDialog {
    equipment: Equipment,
    pub tab: MaintenanceTab,
    pub form: MaintenanceForm,
}

impl MaintenanceDialog {
    pub fn new(equipment: &Equipment) -> Self {
        Self {
            equipment: equipment.clone(),
            tab: MaintenanceTab::Log,
            form: MaintenanceForm::default(),
        }
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn title(&self) -> String {
        format!("Maintenance - {}", self.equipment.name)
    }

    pub fn show(&mut self, tab: MaintenanceTab) {
        self.tab = tab;
    }
}

/// Delete confirmation for one equipment
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteDialog {
    equipment: Equipment,
}

impl DeleteDialog {
    pub fn new(equipment: &Equipment) -> Self {
        Self {
            equipment: equipment.clone(),
        }
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }
}
