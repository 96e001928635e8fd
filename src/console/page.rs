//! Equipment page controller.
//!
//! Owns the listing parameters, the query cache and the one open dialog.
//! Mutations never touch cached rows: on success they invalidate the
//! affected queries, and the next [`PageController::refresh`] or
//! [`PageController::load_history`] refetches them. Until then the previous
//! answer stays readable and is reported as stale.

use super::{
    cache::{QueryCache, QueryScope},
    client::EquipmentApi,
    forms::{DeleteDialog, EquipmentForm, FormMode, MaintenanceDialog, MaintenanceTab},
    notice::Notice,
};
use crate::{
    config::ConsoleConfig,
    models::{Equipment, EquipmentStatus, EquipmentType, ListParams, MaintenanceLog, Page, SortField},
};

const LIST_FAILED_MESSAGE: &str = "Could not connect to the server.";
const HISTORY_FAILED_MESSAGE: &str = "Failed to load maintenance history.";

/// The dialog currently open over the listing
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Modal {
    #[default]
    Closed,
    Form(EquipmentForm),
    Maintenance(MaintenanceDialog),
    Delete(DeleteDialog),
}

/// Rows of one page as displayed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListSnapshot<'a> {
    pub rows: &'a [Equipment],
    pub page: u32,
    pub total_pages: u32,
    pub total_elements: i64,
    /// A refetch is due; the rows may be out of date
    pub stale: bool,
    /// Rows belong to the previous parameters while the current ones load
    pub placeholder: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListView<'a> {
    Loading,
    Failed(String),
    Empty,
    Rows(ListSnapshot<'a>),
}

/// Summary cards above the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: i64,
    pub active: usize,
    pub under_maintenance: usize,
    pub inactive: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryView<'a> {
    /// No maintenance dialog, or the Log tab is shown
    Hidden,
    Loading,
    Failed(String),
    Empty,
    Entries(&'a [MaintenanceLog]),
}

/// Outcome of submitting a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Client-side validation failed, or no matching dialog is open
    Blocked,
    Accepted,
    Rejected,
}

pub struct PageController<A> {
    api: A,
    cache: QueryCache,
    params: ListParams,
    /// Parameters of the last page loaded, shown while new ones load
    shown: Option<ListParams>,
    list_error: Option<(ListParams, String)>,
    history_error: Option<(i64, String)>,
    modal: Modal,
    notices: Vec<Notice>,
}

impl<A: EquipmentApi> PageController<A> {
    pub fn new(api: A, config: &ConsoleConfig) -> Self {
        Self {
            api,
            cache: QueryCache::new(config.stale_after(), config.gc_after()),
            params: ListParams::with_page_size(config.page_size),
            shown: None,
            list_error: None,
            history_error: None,
            modal: Modal::Closed,
            notices: Vec::new(),
        }
    }

    pub fn params(&self) -> &ListParams {
        &self.params
    }

    pub fn search(&mut self, search: impl Into<String>) {
        self.params.set_search(search);
    }

    pub fn filter_status(&mut self, status: Option<EquipmentStatus>) {
        self.params.set_status_filter(status);
    }

    pub fn sort_by(&mut self, field: SortField) {
        self.params.toggle_sort(field);
    }

    pub fn set_page_size(&mut self, size: u32) {
        self.params.set_page_size(size);
    }

    pub fn next_page(&mut self) {
        let total_pages = self.displayed().map_or(0, |(page, _, _)| page.total_pages);
        self.params.next_page(total_pages);
    }

    pub fn previous_page(&mut self) {
        self.params.previous_page();
    }

    /// Load the listing for the current parameters unless a fresh answer is cached
    pub async fn refresh(&mut self) {
        let params = self.params.clone();
        if self.cache.equipment_page(&params).is_some_and(|cached| !cached.stale) {
            self.shown = Some(params);
            return;
        }

        tracing::debug!(?params, "Fetching equipment page");
        match self.api.list_equipment(&params).await {
            Ok(page) => {
                self.cache.store_equipment_page(params.clone(), page);
                self.shown = Some(params);
                self.list_error = None;
            }
            Err(e) => {
                tracing::warn!("Failed to load equipment: {}", e);
                self.list_error = Some((params, e.user_message(LIST_FAILED_MESSAGE)));
            }
        }
    }

    /// Current page, or the previous one while it loads
    fn displayed(&self) -> Option<(&Page<Equipment>, bool, bool)> {
        if let Some(cached) = self.cache.equipment_page(&self.params) {
            return Some((cached.value, cached.stale, false));
        }
        let shown = self.shown.as_ref()?;
        self.cache
            .equipment_page(shown)
            .map(|cached| (cached.value, cached.stale, true))
    }

    pub fn list_view(&self) -> ListView<'_> {
        let current = self.cache.equipment_page(&self.params).is_some();
        if !current {
            if let Some((params, message)) = &self.list_error {
                if *params == self.params {
                    return ListView::Failed(message.clone());
                }
            }
        }

        match self.displayed() {
            None => ListView::Loading,
            Some((page, _, true)) if page.is_empty() => ListView::Loading,
            Some((page, _, false)) if page.is_empty() => ListView::Empty,
            Some((page, stale, placeholder)) => ListView::Rows(ListSnapshot {
                rows: &page.content,
                page: page.page,
                total_pages: page.total_pages,
                total_elements: page.total_elements,
                stale,
                placeholder,
            }),
        }
    }

    /// Counts over the displayed page; `total` covers the whole listing
    pub fn stats(&self) -> Stats {
        let Some((page, _, _)) = self.displayed() else {
            return Stats::default();
        };
        let count = |status: EquipmentStatus| page.content.iter().filter(|e| e.status == status).count();
        Stats {
            total: page.total_elements,
            active: count(EquipmentStatus::Active),
            under_maintenance: count(EquipmentStatus::UnderMaintenance),
            inactive: count(EquipmentStatus::Inactive),
        }
    }

    pub async fn load_equipment_types(&mut self) {
        if self.cache.equipment_types().is_some_and(|cached| !cached.stale) {
            return;
        }
        match self.api.list_equipment_types().await {
            Ok(types) => self.cache.store_equipment_types(types),
            Err(e) => tracing::warn!("Failed to load equipment types: {}", e),
        }
    }

    /// Options for the type selector, empty until loaded
    pub fn equipment_types(&self) -> &[EquipmentType] {
        self.cache
            .equipment_types()
            .map(|cached| cached.value.as_slice())
            .unwrap_or_default()
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn open_create(&mut self) {
        self.modal = Modal::Form(EquipmentForm::create());
    }

    pub fn open_edit(&mut self, equipment: &Equipment) {
        self.modal = Modal::Form(EquipmentForm::edit(equipment));
    }

    pub fn open_maintenance(&mut self, equipment: &Equipment) {
        self.history_error = None;
        self.modal = Modal::Maintenance(MaintenanceDialog::new(equipment));
    }

    pub fn open_delete(&mut self, equipment: &Equipment) {
        self.modal = Modal::Delete(DeleteDialog::new(equipment));
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }

    pub fn form_mut(&mut self) -> Option<&mut EquipmentForm> {
        match &mut self.modal {
            Modal::Form(form) => Some(form),
            _ => None,
        }
    }

    pub fn maintenance_mut(&mut self) -> Option<&mut MaintenanceDialog> {
        match &mut self.modal {
            Modal::Maintenance(dialog) => Some(dialog),
            _ => None,
        }
    }

    /// Create or update from the open equipment form
    pub async fn submit_form(&mut self) -> Submission {
        let Some(form) = self.form_mut() else {
            return Submission::Blocked;
        };
        let Some(request) = form.request() else {
            return Submission::Blocked;
        };
        let mode = form.mode();

        let result = match mode {
            FormMode::Create => self.api.create_equipment(&request).await,
            FormMode::Edit { id } => self.api.update_equipment(id, &request).await,
        };

        match result {
            Ok(equipment) => {
                self.cache.invalidate(QueryScope::EquipmentLists);
                self.notices.push(match mode {
                    FormMode::Create => Notice::success(
                        "Equipment added",
                        format!("{} has been added to the system.", equipment.name),
                    ),
                    FormMode::Edit { .. } => Notice::success(
                        "Equipment updated",
                        format!("{} has been updated successfully.", equipment.name),
                    ),
                });
                self.modal = Modal::Closed;
                Submission::Accepted
            }
            Err(e) => {
                tracing::warn!("Equipment save rejected: {}", e);
                if let Some(form) = self.form_mut() {
                    form.reject(&e);
                }
                Submission::Rejected
            }
        }
    }

    /// Log maintenance from the open dialog, then switch it to the History tab
    pub async fn submit_maintenance(&mut self) -> Submission {
        let Some(dialog) = self.maintenance_mut() else {
            return Submission::Blocked;
        };
        let equipment_id = dialog.equipment().id;
        let name = dialog.equipment().name.clone();
        let Some(request) = dialog.form.request(equipment_id) else {
            return Submission::Blocked;
        };

        match self.api.log_maintenance(&request).await {
            Ok(_) => {
                self.cache.invalidate(QueryScope::EquipmentLists);
                self.cache.invalidate(QueryScope::MaintenanceHistory(equipment_id));
                self.notices.push(Notice::success(
                    "Maintenance logged",
                    format!("Maintenance recorded for {}. Status updated to Active.", name),
                ));
                if let Some(dialog) = self.maintenance_mut() {
                    dialog.form.reset();
                    dialog.show(MaintenanceTab::History);
                }
                Submission::Accepted
            }
            Err(e) => {
                tracing::warn!(equipment_id, "Maintenance log rejected: {}", e);
                if let Some(dialog) = self.maintenance_mut() {
                    dialog.form.reject(&e);
                }
                Submission::Rejected
            }
        }
    }

    /// Delete the equipment of the open confirmation; the dialog stays open on failure
    pub async fn confirm_delete(&mut self) -> Submission {
        let Modal::Delete(dialog) = &self.modal else {
            return Submission::Blocked;
        };
        let id = dialog.equipment().id;
        let name = dialog.equipment().name.clone();

        match self.api.delete_equipment(id).await {
            Ok(()) => {
                self.cache.invalidate(QueryScope::EquipmentLists);
                self.notices.push(Notice::success(
                    "Equipment deleted",
                    format!("{} has been removed from the system.", name),
                ));
                self.modal = Modal::Closed;
                Submission::Accepted
            }
            Err(e) => {
                tracing::warn!(id, "Delete failed: {}", e);
                self.notices.push(Notice::error(
                    "Delete failed",
                    "Could not delete this equipment. It may be referenced elsewhere.",
                ));
                Submission::Rejected
            }
        }
    }

    /// Fetch the history of the open maintenance dialog, only while its History tab shows
    pub async fn load_history(&mut self) {
        let Modal::Maintenance(dialog) = &self.modal else {
            return;
        };
        if dialog.tab != MaintenanceTab::History {
            return;
        }
        let id = dialog.equipment().id;
        if self.cache.maintenance_history(id).is_some_and(|cached| !cached.stale) {
            return;
        }

        match self.api.maintenance_history(id).await {
            Ok(history) => {
                self.cache.store_maintenance_history(id, history);
                self.history_error = None;
            }
            Err(e) => {
                tracing::warn!(equipment_id = id, "Failed to load maintenance history: {}", e);
                self.history_error = Some((id, e.user_message(HISTORY_FAILED_MESSAGE)));
            }
        }
    }

    pub fn history_view(&self) -> HistoryView<'_> {
        let Modal::Maintenance(dialog) = &self.modal else {
            return HistoryView::Hidden;
        };
        if dialog.tab != MaintenanceTab::History {
            return HistoryView::Hidden;
        }
        let id = dialog.equipment().id;

        match self.cache.maintenance_history(id) {
            Some(cached) if cached.value.is_empty() => HistoryView::Empty,
            Some(cached) => HistoryView::Entries(cached.value),
            None => match &self.history_error {
                Some((failed, message)) if *failed == id => HistoryView::Failed(message.clone()),
                _ => HistoryView::Loading,
            },
        }
    }

    /// Notices raised since the last call, oldest first
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
