//! Persistence seam for invoices.
//!
//! The save pipeline talks to this trait, not to PostgreSQL directly; the
//! production implementation lives on [`crate::services::Database`].

use crate::models::{InvoiceRecord, SaveInvoice};
use async_trait::async_trait;
use service_core::error::AppError;
use uuid::Uuid;

#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Upsert the header and replace the full line-item set, atomically.
    /// A missing id inserts; an id that does not resolve for this user is
    /// a NotFound error, never a silent no-op. Returns the invoice id.
    async fn save_invoice(&self, user_id: Uuid, input: &SaveInvoice) -> Result<Uuid, AppError>;

    /// Header joined with items in insertion order, scoped to the owner.
    async fn fetch_invoice(
        &self,
        user_id: Uuid,
        invoice_id: Uuid,
    ) -> Result<InvoiceRecord, AppError>;

    /// Remove the header; items cascade. Returns whether a row was removed.
    async fn delete_invoice(&self, user_id: Uuid, invoice_id: Uuid) -> Result<bool, AppError>;
}
