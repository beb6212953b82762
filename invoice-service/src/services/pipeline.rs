//! Invoice save pipeline.
//!
//! One asynchronous sequence per save: auth gate, validation, totals and
//! due-date normalization, then the store round trip. Validation failures
//! never reach the store, and the caller always gets the freshly fetched
//! canonical record back rather than its own draft.

use crate::models::{AuthUser, DraftInvoice, InvoiceRecord};
use crate::services::metrics::{ERRORS_TOTAL, INVOICES_SAVED_TOTAL, VALIDATION_REJECTED_TOTAL};
use crate::services::store::InvoiceStore;
use crate::validation::{validate_draft, ValidationReport};
use anyhow::anyhow;
use service_core::error::AppError;
use tracing::{info, instrument, warn};

/// Terminal result of one save attempt that did not error.
#[derive(Debug)]
pub enum SaveOutcome {
    /// Persisted; carries the canonical record as fetched back from the
    /// store, with server-assigned id and timestamps.
    Saved(InvoiceRecord),
    /// Validation failed; the report is surfaced verbatim and nothing was
    /// persisted.
    Rejected(ValidationReport),
}

/// Run one save attempt for a draft.
///
/// Store errors propagate unchanged; there is no retry. Concurrent saves
/// of the same draft are not coordinated here: callers are expected to
/// keep a single save in flight per invoice.
#[instrument(skip(store, user, draft), fields(invoice_id = ?draft.id))]
pub async fn save_draft<S>(
    store: &S,
    user: Option<&AuthUser>,
    draft: &DraftInvoice,
) -> Result<SaveOutcome, AppError>
where
    S: InvoiceStore + ?Sized,
{
    let user = user.ok_or_else(|| {
        warn!("Save attempted without an authenticated user");
        AppError::Unauthorized(anyhow!("Sign in to save invoices"))
    })?;

    let report = validate_draft(draft);
    if !report.is_empty() {
        VALIDATION_REJECTED_TOTAL.inc();
        info!(errors = report.error_count(), "Draft rejected by validation");
        return Ok(SaveOutcome::Rejected(report));
    }

    let input = draft.to_save_input()?;
    let invoice_id = store
        .save_invoice(user.user_id, &input)
        .await
        .map_err(|e| {
            ERRORS_TOTAL.with_label_values(&["persistence"]).inc();
            tracing::error!(error = %e, "Invoice save failed");
            e
        })?;
    let record = store
        .fetch_invoice(user.user_id, invoice_id)
        .await
        .map_err(|e| {
            ERRORS_TOTAL.with_label_values(&["persistence"]).inc();
            tracing::error!(invoice_id = %invoice_id, error = %e, "Canonical fetch failed");
            e
        })?;

    INVOICES_SAVED_TOTAL
        .with_label_values(&[input.status.as_str()])
        .inc();
    info!(invoice_id = %invoice_id, total = %record.invoice.total, "Invoice saved");

    Ok(SaveOutcome::Saved(record))
}
