//! Data models shared by the server and the console

pub mod equipment;
pub mod equipment_type;
pub mod maintenance;
pub mod page;

// Re-export commonly used types
pub use equipment::{
    Equipment, EquipmentRequest, EquipmentStatus, ListParams, SortDirection, SortField,
};
pub use equipment_type::EquipmentType;
pub use maintenance::{MaintenanceLog, MaintenanceRequest};
pub use page::{EquipmentPage, Page};
