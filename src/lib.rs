//! Circulade Library Circulation Oversight Service
//!
//! Watches a library backend's loan records for overdue and late-returned
//! loans, aggregates them per borrower, and manages administrator-imposed
//! borrower sanctions over a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod policy;
pub mod services;
pub mod source;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
