//! List query transitions.
//!
//! The listing's parameters are edited through these methods only, so that
//! every filter, search or sort change starts again from the first page.

use crate::models::{EquipmentStatus, ListParams, SortDirection, SortField};

impl ListParams {
    /// First page of the listing with the given page size
    pub fn with_page_size(size: u32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 0;
    }

    /// `None` shows every status
    pub fn set_status_filter(&mut self, status: Option<EquipmentStatus>) {
        self.status = status;
        self.page = 0;
    }

    /// Same field flips the direction; a new field starts ascending
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_by == field {
            self.sort_dir = self.sort_dir.flipped();
        } else {
            self.sort_by = field;
            self.sort_dir = SortDirection::Asc;
        }
        self.page = 0;
    }

    pub fn set_page_size(&mut self, size: u32) {
        self.size = size;
        self.page = 0;
    }

    /// Move forward, stopping at the last of `total_pages`
    pub fn next_page(&mut self, total_pages: u32) {
        let last = total_pages.saturating_sub(1);
        self.page = self.page.saturating_add(1).min(last);
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Direction arrow for a column header, `None` when unsorted
    pub fn sort_indicator(&self, field: SortField) -> Option<SortDirection> {
        (self.sort_by == field).then_some(self.sort_dir)
    }
}
