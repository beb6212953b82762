use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::export::{to_csv, to_json_pretty, ExportFormat, PRODUCT_COLUMNS};
use crate::handlers::invoices::{attachment, ExportParams};
use crate::models::{AuthUser, CreateProduct, UpdateProduct};
use crate::services::metrics::EXPORTS_TOTAL;
use crate::AppState;
use service_core::error::AppError;

pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProduct>,
) -> Result<Response, AppError> {
    input.validate()?;
    if input.price < Decimal::ZERO || input.tax_rate < Decimal::ZERO {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Price and tax rate must be non-negative"
        )));
    }
    let product = state.db.create_product(user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(product)).into_response())
}

pub async fn get_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let product = state
        .db
        .get_product(user.user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Product not found")))?;
    Ok(Json(product).into_response())
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page_size: Option<i32>,
    pub page_token: Option<Uuid>,
}

pub async fn list_products(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    let products = state
        .db
        .list_products(user.user_id, params.page_size.unwrap_or(50), params.page_token)
        .await?;
    Ok(Json(products).into_response())
}

pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProduct>,
) -> Result<Response, AppError> {
    input.validate()?;
    if input.price.is_some_and(|p| p < Decimal::ZERO)
        || input.tax_rate.is_some_and(|t| t < Decimal::ZERO)
    {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Price and tax rate must be non-negative"
        )));
    }
    let product = state
        .db
        .update_product(user.user_id, id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Product not found")))?;
    Ok(Json(product).into_response())
}

pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    if state.db.delete_product(user.user_id, id).await? {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Err(AppError::NotFound(anyhow::anyhow!("Product not found")))
    }
}

pub async fn export_products(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ExportParams>,
) -> Result<Response, AppError> {
    let products = state.db.list_products_for_export(user.user_id).await?;

    let body = match params.format {
        ExportFormat::Csv => to_csv(&products, PRODUCT_COLUMNS)?,
        ExportFormat::Json => to_json_pretty(&products)?,
    };

    EXPORTS_TOTAL
        .with_label_values(&["products", params.format.extension()])
        .inc();

    Ok(attachment("products", params.format, body))
}
