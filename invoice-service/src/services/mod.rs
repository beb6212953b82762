//! Services for invoice-service.

pub mod database;
pub mod metrics;
pub mod pipeline;
pub mod store;

pub use database::Database;
pub use pipeline::{save_draft, SaveOutcome};
pub use store::InvoiceStore;
