use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::export::{to_csv, to_json_pretty, ExportFormat, CUSTOMER_COLUMNS};
use crate::handlers::invoices::{attachment, ExportParams};
use crate::models::{AuthUser, CreateCustomer, UpdateCustomer};
use crate::services::metrics::EXPORTS_TOTAL;
use crate::AppState;
use service_core::error::AppError;

pub async fn create_customer(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateCustomer>,
) -> Result<Response, AppError> {
    input.validate()?;
    let customer = state.db.create_customer(user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(customer)).into_response())
}

pub async fn get_customer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let customer = state
        .db
        .get_customer(user.user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Customer not found")))?;
    Ok(Json(customer).into_response())
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page_size: Option<i32>,
    pub page_token: Option<Uuid>,
}

pub async fn list_customers(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    let customers = state
        .db
        .list_customers(user.user_id, params.page_size.unwrap_or(50), params.page_token)
        .await?;
    Ok(Json(customers).into_response())
}

pub async fn update_customer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateCustomer>,
) -> Result<Response, AppError> {
    input.validate()?;
    let customer = state
        .db
        .update_customer(user.user_id, id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Customer not found")))?;
    Ok(Json(customer).into_response())
}

pub async fn delete_customer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    if state.db.delete_customer(user.user_id, id).await? {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Err(AppError::NotFound(anyhow::anyhow!("Customer not found")))
    }
}

pub async fn export_customers(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ExportParams>,
) -> Result<Response, AppError> {
    let customers = state.db.list_customers_for_export(user.user_id).await?;

    let body = match params.format {
        ExportFormat::Csv => to_csv(&customers, CUSTOMER_COLUMNS)?,
        ExportFormat::Json => to_json_pretty(&customers)?,
    };

    EXPORTS_TOTAL
        .with_label_values(&["customers", params.format.extension()])
        .inc();

    Ok(attachment("customers", params.format, body))
}
