//! EquipTrack Equipment Management
//!
//! A REST JSON service for registering equipment, recording its status and
//! logging maintenance, together with the console core that keeps a
//! paginated equipment listing in sync with that service.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
