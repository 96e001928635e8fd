//! Page envelope returned by listing endpoints

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::equipment::Equipment;

/// A slice of results together with pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[aliases(EquipmentPage = Page<Equipment>)]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page index
    pub page: u32,
    pub size: u32,
    pub total_elements: i64,
    pub total_pages: u32,
    /// Whether this is the final page
    pub last: bool,
}

impl<T> Page<T> {
    /// Build a page from one slice of rows and the unpaged total
    pub fn new(content: Vec<T>, page: u32, size: u32, total_elements: i64) -> Self {
        let size = size.max(1);
        let total = u64::try_from(total_elements).unwrap_or(0);
        let total_pages = u32::try_from(total.div_ceil(u64::from(size))).unwrap_or(u32::MAX);
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
            last: page.saturating_add(1) >= total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
