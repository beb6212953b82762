//! invoice-service: invoice management backend.
//!
//! Drafts are validated and totaled in pure code, persisted through the
//! [`services::InvoiceStore`] seam, and served over a thin axum HTTP API.

pub mod config;
pub mod editor;
pub mod export;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
pub mod totals;
pub mod validation;

use crate::config::Settings;
use crate::services::Database;
use std::sync::Arc;

/// Shared application state for the HTTP layer.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub settings: Arc<Settings>,
}
