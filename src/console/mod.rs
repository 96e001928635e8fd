//! Client-side core of the equipment console.
//!
//! Talks to the record-keeping service through [`EquipmentApi`], keeps the
//! listing parameters and a query cache, and models the dialogs that mutate
//! equipment. Nothing here renders; a front end reads the views and feeds
//! user input back in.

pub mod cache;
pub mod client;
pub mod error;
pub mod forms;
pub mod notice;
pub mod page;
mod query;

pub use cache::{QueryCache, QueryScope};
pub use client::{EquipmentApi, HttpApiClient};
pub use error::{ClientError, ClientResult};
pub use forms::{DeleteDialog, EquipmentForm, FormField, FormMode, MaintenanceDialog, MaintenanceForm, MaintenanceTab};
pub use notice::{Notice, NoticeKind};
pub use page::{HistoryView, ListSnapshot, ListView, Modal, PageController, Stats, Submission};
