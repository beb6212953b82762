use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::export::{export_filename, to_csv, to_json_pretty, ExportFormat, INVOICE_COLUMNS};
use crate::models::{AuthUser, DraftInvoice, InvoiceStatus, ListInvoicesFilter, MaybeAuthUser};
use crate::services::metrics::EXPORTS_TOTAL;
use crate::services::{save_draft, InvoiceStore, SaveOutcome};
use crate::AppState;
use service_core::error::AppError;

/// Save a draft. Authentication is checked inside the pipeline so that an
/// unauthenticated attempt fails before any store call, and a validation
/// failure comes back as 422 with the report body.
pub async fn save_invoice(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    Json(draft): Json<DraftInvoice>,
) -> Result<Response, AppError> {
    match save_draft(state.db.as_ref(), user.0.as_ref(), &draft).await? {
        SaveOutcome::Saved(record) => Ok((StatusCode::OK, Json(record)).into_response()),
        SaveOutcome::Rejected(report) => {
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(report)).into_response())
        }
    }
}

pub async fn get_invoice(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let record = state.db.fetch_invoice(user.user_id, id).await?;
    Ok(Json(record).into_response())
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub customer_id: Option<Uuid>,
    pub page_size: Option<i32>,
    pub page_token: Option<Uuid>,
}

pub async fn list_invoices(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    let filter = ListInvoicesFilter {
        status: params.status.as_deref().map(InvoiceStatus::from_string),
        customer_id: params.customer_id,
        page_size: params.page_size.unwrap_or(50),
        page_token: params.page_token,
    };
    let invoices = state.db.list_invoices(user.user_id, &filter).await?;
    Ok(Json(invoices).into_response())
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    if state.db.delete_invoice(user.user_id, id).await? {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Err(AppError::NotFound(anyhow::anyhow!("Invoice not found")))
    }
}

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub format: ExportFormat,
}

pub async fn export_invoices(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ExportParams>,
) -> Result<Response, AppError> {
    let invoices = state.db.list_invoices_for_export(user.user_id).await?;

    let body = match params.format {
        ExportFormat::Csv => to_csv(&invoices, INVOICE_COLUMNS)?,
        ExportFormat::Json => to_json_pretty(&invoices)?,
    };

    EXPORTS_TOTAL
        .with_label_values(&["invoices", params.format.extension()])
        .inc();

    Ok(attachment("invoices", params.format, body))
}

/// Build a file-download response for an export body.
pub(crate) fn attachment(entity: &str, format: ExportFormat, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export_filename(entity, format)),
            ),
        ],
        body,
    )
        .into_response()
}
