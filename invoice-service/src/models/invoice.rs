//! Invoice model for invoice-service.

use crate::models::line_item::{LineItem, LineItemInput};
use crate::totals::InvoiceTotals;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Invoice status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "sent" => InvoiceStatus::Sent,
            "paid" => InvoiceStatus::Paid,
            "overdue" => InvoiceStatus::Overdue,
            _ => InvoiceStatus::Draft,
        }
    }
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Draft
    }
}

/// Currency code and display symbol, stored as a JSONB sub-object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            code: "USD".to_string(),
            symbol: "$".to_string(),
        }
    }
}

/// Shipping block, stored as a JSONB sub-object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingInfo {
    pub recipient: String,
    pub method: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub cost: Decimal,
}

/// One named tax definition applied to the invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxLine {
    pub id: Uuid,
    pub name: String,
    pub rate: Decimal,
}

/// Persisted invoice header.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: String,
    pub company_address: String,
    pub client: String,
    pub client_address: String,
    pub invoice_number: String,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub logo: Option<String>,
    pub logo_zoom: f64,
    pub status: String,
    pub customer_id: Option<Uuid>,
    pub template_id: Option<String>,
    pub currency: Json<Currency>,
    pub show_shipping: bool,
    pub show_discount: bool,
    pub show_tax_column: bool,
    pub show_signature: bool,
    pub show_payment_details: bool,
    pub shipping: Json<ShippingInfo>,
    pub taxes: Json<Vec<TaxLine>>,
    pub discount_percent: Decimal,
    pub subtotal: Decimal,
    pub tax_total: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Canonical persisted record: header joined with its line items in
/// insertion order. This is what callers observe after a save.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceRecord {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub items: Vec<LineItem>,
}

/// Store input for one save: header fields plus the full replacement item
/// set and the recomputed aggregates.
#[derive(Debug, Clone)]
pub struct SaveInvoice {
    pub id: Option<Uuid>,
    pub company: String,
    pub company_address: String,
    pub client: String,
    pub client_address: String,
    pub invoice_number: String,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub logo: Option<String>,
    pub logo_zoom: f64,
    pub status: InvoiceStatus,
    pub customer_id: Option<Uuid>,
    pub template_id: Option<String>,
    pub currency: Currency,
    pub show_shipping: bool,
    pub show_discount: bool,
    pub show_tax_column: bool,
    pub show_signature: bool,
    pub show_payment_details: bool,
    pub shipping: ShippingInfo,
    pub taxes: Vec<TaxLine>,
    pub discount_percent: Decimal,
    pub totals: InvoiceTotals,
    pub items: Vec<LineItemInput>,
}

/// Filter parameters for listing invoices.
#[derive(Debug, Clone, Default)]
pub struct ListInvoicesFilter {
    pub status: Option<InvoiceStatus>,
    pub customer_id: Option<Uuid>,
    pub page_size: i32,
    pub page_token: Option<Uuid>,
}
